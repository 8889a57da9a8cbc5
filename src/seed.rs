// src/seed.rs
use crate::error::SeedError;
use crate::message::{Filter, Message};
use crate::report::{banner, TopicReport};
use crate::store::DocumentStore;

use std::io::Write;
use tracing::{info, warn};

pub const DEFAULT_COLLECTION: &str = "social_messages";
pub const DEFAULT_TARGET_USER: &str = "user_001";

const PREVIEW_IDS: usize = 5;

#[derive(Debug, Clone)]
pub struct SeedPlan {
    pub collection: String,
    pub target_user: String,
}

impl Default for SeedPlan {
    fn default() -> Self {
        SeedPlan {
            collection: DEFAULT_COLLECTION.to_string(),
            target_user: DEFAULT_TARGET_USER.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SeedSummary {
    pub inserted: usize,
    pub stored: u64,
    pub user_messages: usize,
    pub report: TopicReport,
}

/// Recreates the collection, inserts `messages`, then reads them back and
/// prints the topic report. A failed drop is reported and skipped, any other
/// store failure ends the run.
pub async fn run<S, W>(
    store: &S,
    plan: &SeedPlan,
    messages: &[Message],
    topics: &[String],
    out: &mut W,
) -> Result<SeedSummary, SeedError>
where
    S: DocumentStore,
    W: Write,
{
    let collection = plan.collection.as_str();

    let existing = store.list_collections().await?;
    info!(collections = existing.len(), "connected");
    writeln!(out, "Connected. Collections: {:?}", existing)?;

    match store.drop_collection(collection).await {
        Ok(()) => writeln!(out, "Collection '{}' dropped (if it existed).", collection)?,
        Err(e) => {
            info!(collection, error = %e, "drop failed, continuing");
            writeln!(out, "Info: {}", e)?;
        }
    }

    store.create_collection(collection).await?;
    writeln!(out, "Collection '{}' created.", collection)?;

    let ids = store.insert_many(collection, messages).await?;
    info!(collection, inserted = ids.len(), "inserted messages");
    writeln!(out, "\n{} messages inserted.", ids.len())?;
    let preview: Vec<&str> = ids.iter().take(PREVIEW_IDS).map(String::as_str).collect();
    writeln!(out, "Inserted IDs: {:?}... (first {})", preview, PREVIEW_IDS)?;

    section(out, "Fetch a message from one user")?;
    let by_user = Filter::eq("user_id", plan.target_user.as_str());
    match store.find_one(collection, &by_user).await? {
        Some(msg) => write_message(out, &plan.target_user, &msg)?,
        None => writeln!(out, "No message found for user {}", plan.target_user)?,
    }
    let user_messages = store.find(collection, &by_user).await?;
    writeln!(
        out,
        "\nTotal messages from {}: {}",
        plan.target_user,
        user_messages.len()
    )?;

    section(out, "Topic frequency per user")?;
    writeln!(out, "Note: indexing is managed by the database service; no index is created.")?;
    let all = store.find(collection, &Filter::all()).await?;
    let report = TopicReport::from_messages(&all);
    report.write_frequencies(out)?;
    report.write_statistics(out, topics)?;

    let stored = store.count(collection, &Filter::all()).await?;
    if stored != ids.len() as u64 {
        warn!(collection, stored, inserted = ids.len(), "document count does not match inserts");
        writeln!(
            out,
            "\nWarning: collection holds {} documents, {} were inserted.",
            stored,
            ids.len()
        )?;
    }

    writeln!(out, "\n{}", banner())?;
    writeln!(out, "Done.")?;
    writeln!(out, "{}", banner())?;

    Ok(SeedSummary {
        inserted: ids.len(),
        stored,
        user_messages: user_messages.len(),
        report,
    })
}

fn section<W: Write>(out: &mut W, title: &str) -> std::io::Result<()> {
    writeln!(out, "\n{}", banner())?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", banner())
}

fn write_message<W: Write>(out: &mut W, user: &str, msg: &Message) -> std::io::Result<()> {
    writeln!(out, "\nMessage found for user {}:", user)?;
    writeln!(out, "  ID: {}", msg.id)?;
    writeln!(out, "  User: {}", msg.user_id)?;
    writeln!(out, "  Age: {}", msg.user_age)?;
    writeln!(out, "  Topic: {}", msg.topic)?;
    writeln!(out, "  Text: {}", msg.message_text)?;
    writeln!(out, "  Timestamp: {}", msg.timestamp)
}
