mod cli;

use crate::cli::Cli;

use anyhow::{Context, Result};
use clap::Parser;
use socialseed::config::{ENDPOINT_VAR, TOKEN_VAR};
use socialseed::{
    BackendKind, Config, DataApiStore, DocumentStore, Generator, MemoryStore, MongoStore,
    SeedPlan, SeedProfile,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Cli::parse();
    init_tracing(args.debug);

    let config = if args.dry_run {
        None
    } else {
        match Config::from_parts(args.endpoint.clone(), args.token.clone(), args.keyspace.clone()) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("❗️ Error: {}", e);
                eprintln!("Set the connection settings before running:");
                eprintln!("  export {}='https://<database-id>-<region>.apps.astra.datastax.com'", ENDPOINT_VAR);
                eprintln!("  export {}='AstraCS:...'", TOKEN_VAR);
                std::process::exit(1);
            }
        }
    };

    let profile = match &args.profile {
        Some(path) => SeedProfile::load(path)
            .with_context(|| format!("failed to load profile {}", path.display()))?,
        None => SeedProfile::default(),
    };

    let Some(config) = config else {
        println!("Dry run: using an in-memory store.");
        return seed(&MemoryStore::new(), &args, &profile).await;
    };

    match config.backend()? {
        BackendKind::DataApi => {
            let store = DataApiStore::new(&config.endpoint, &config.token, &config.keyspace)
                .with_chunk_size(args.chunk_size);
            seed(&store, &args, &profile).await
        }
        BackendKind::Mongo => {
            let store = MongoStore::connect(&config.endpoint, &config.token, &config.keyspace)
                .await
                .context("failed to connect to MongoDB")?;
            seed(&store, &args, &profile).await
        }
    }
}

async fn seed<S: DocumentStore>(store: &S, args: &Cli, profile: &SeedProfile) -> Result<()> {
    let messages = Generator::new(profile, args.seed)?.generate(args.count)?;
    for msg in &messages {
        debug!(?msg, "generated");
    }

    let plan = SeedPlan {
        collection: args.collection.clone(),
        target_user: args.user.clone(),
    };
    let mut out = std::io::stdout().lock();
    socialseed::run(store, &plan, &messages, &profile.topics, &mut out)
        .await
        .context("seeding failed")?;
    Ok(())
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
