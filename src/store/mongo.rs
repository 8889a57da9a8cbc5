// src/store/mongo.rs
use super::DocumentStore;
use crate::error::StoreResult;
use crate::message::{Filter, Message};

use bson::{Bson, Document};
use futures::stream::TryStreamExt;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use tracing::debug;

/// Store backed by a MongoDB-compatible service. The keyspace names the
/// database.
#[derive(Debug, Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Connects with `uri`. A user named in the URI without a password gets
    /// `token` as its password.
    pub async fn connect(uri: &str, token: &str, database: &str) -> StoreResult<Self> {
        let mut client_options = ClientOptions::parse(uri).await?;
        apply_token(&mut client_options, token);
        let client = Client::with_options(client_options)?;
        Ok(Self {
            db: client.database(database),
        })
    }

    fn collection(&self, name: &str) -> Collection<Message> {
        self.db.collection::<Message>(name)
    }
}

fn apply_token(options: &mut ClientOptions, token: &str) {
    if let Some(credential) = options.credential.as_mut() {
        if credential.username.is_some() && credential.password.is_none() {
            debug!("using application token as MongoDB password");
            credential.password = Some(token.to_string());
        }
    }
}

fn to_filter(filter: &Filter) -> StoreResult<Document> {
    Ok(bson::to_document(filter)?)
}

fn id_to_string(id: Bson) -> String {
    match id {
        Bson::String(s) => s,
        other => other.to_string(),
    }
}

impl DocumentStore for MongoStore {
    async fn list_collections(&self) -> StoreResult<Vec<String>> {
        Ok(self.db.list_collection_names().await?)
    }

    async fn drop_collection(&self, name: &str) -> StoreResult<()> {
        self.collection(name).drop().await?;
        Ok(())
    }

    async fn create_collection(&self, name: &str) -> StoreResult<()> {
        self.db.create_collection(name).await?;
        Ok(())
    }

    async fn insert_many(&self, collection: &str, docs: &[Message]) -> StoreResult<Vec<String>> {
        if docs.is_empty() {
            return Ok(Vec::new());
        }
        let result = self.collection(collection).insert_many(docs).await?;
        let mut inserted: Vec<(usize, Bson)> = result.inserted_ids.into_iter().collect();
        inserted.sort_by_key(|(index, _)| *index);
        Ok(inserted.into_iter().map(|(_, id)| id_to_string(id)).collect())
    }

    async fn find_one(&self, collection: &str, filter: &Filter) -> StoreResult<Option<Message>> {
        Ok(self.collection(collection).find_one(to_filter(filter)?).await?)
    }

    async fn find(&self, collection: &str, filter: &Filter) -> StoreResult<Vec<Message>> {
        let cursor = self.collection(collection).find(to_filter(filter)?).await?;
        Ok(cursor.try_collect::<Vec<Message>>().await?)
    }

    async fn count(&self, collection: &str, filter: &Filter) -> StoreResult<u64> {
        Ok(self
            .collection(collection)
            .count_documents(to_filter(filter)?)
            .await?)
    }
}
