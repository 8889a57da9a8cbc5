// src/bin/socialseed/cli.rs
use clap::Parser;
use socialseed::seed::{DEFAULT_COLLECTION, DEFAULT_TARGET_USER};
use std::path::PathBuf;

/// Seed a document collection with synthetic social messages and report
/// topic frequencies per user.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Data API endpoint, or a mongodb:// connection string
    #[arg(long, env = "ASTRA_DB_API_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Application token
    #[arg(long, env = "ASTRA_DB_APPLICATION_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Keyspace (database name for MongoDB endpoints)
    #[arg(long, env = "ASTRA_DB_KEYSPACE")]
    pub keyspace: Option<String>,

    #[arg(long, default_value = DEFAULT_COLLECTION)]
    pub collection: String,

    /// Number of messages to generate
    #[arg(long, default_value_t = 25)]
    pub count: usize,

    /// User whose messages are fetched individually
    #[arg(long, default_value = DEFAULT_TARGET_USER)]
    pub user: String,

    /// YAML file overriding users, ages, topics and message templates
    #[arg(long)]
    pub profile: Option<PathBuf>,

    /// RNG seed for reproducible messages
    #[arg(long)]
    pub seed: Option<u64>,

    /// Documents per insertMany request (Data API only)
    #[arg(long, default_value_t = socialseed::store::DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Run against an in-memory store; no connection settings needed
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long)]
    pub debug: bool,
}
