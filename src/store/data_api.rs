// src/store/data_api.rs
//! Client for the JSON Data API of a managed document database.
//!
//! Every operation is a `POST` of a single-command JSON body, either to the
//! keyspace (`{endpoint}/api/json/v1/{keyspace}`) or to one of its collections.
//! The API reports command failures in an `errors` array, usually with a 200
//! status, so both the status code and the body are checked.

use super::DocumentStore;
use crate::error::{StoreError, StoreResult};
use crate::message::{Filter, Message};

use futures::stream::{self, Stream, TryStreamExt};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::debug;

const API_PATH: &str = "api/json/v1";

/// Maximum documents per `insertMany` request.
pub const DEFAULT_CHUNK_SIZE: usize = 20;

#[derive(Debug, Clone)]
pub struct DataApiStore {
    http: Client,
    keyspace_url: String,
    token: String,
    chunk_size: usize,
}

#[derive(Debug, Deserialize)]
struct CommandResponse {
    #[serde(default)]
    status: Option<CommandStatus>,
    #[serde(default)]
    data: Option<CommandData>,
    #[serde(default)]
    errors: Vec<ApiError>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommandStatus {
    #[serde(default)]
    collections: Vec<String>,
    #[serde(default)]
    inserted_ids: Vec<Value>,
    count: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommandData {
    document: Option<Message>,
    #[serde(default)]
    documents: Vec<Message>,
    next_page_state: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiError {
    message: String,
    error_code: Option<String>,
}

impl DataApiStore {
    pub fn new(endpoint: &str, token: &str, keyspace: &str) -> Self {
        Self {
            http: Client::new(),
            keyspace_url: format!("{}/{}/{}", endpoint.trim_end_matches('/'), API_PATH, keyspace),
            token: token.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    async fn command(
        &self,
        collection: Option<&str>,
        name: &str,
        payload: Value,
    ) -> StoreResult<CommandResponse> {
        let url = match collection {
            Some(collection) => format!("{}/{}", self.keyspace_url, collection),
            None => self.keyspace_url.clone(),
        };
        let mut body = Map::new();
        body.insert(name.to_string(), payload);

        debug!(%url, command = name, "sending Data API command");
        let response = self
            .http
            .post(&url)
            .header("Token", &self.token)
            .json(&Value::Object(body))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status { status, body });
        }

        let parsed: CommandResponse = response.json().await?;
        if let Some(first) = parsed.errors.first() {
            let message = parsed
                .errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(StoreError::Api {
                code: first.error_code.clone(),
                message,
            });
        }
        Ok(parsed)
    }

    async fn fetch_page(
        &self,
        collection: &str,
        filter: &Filter,
        page_state: Option<String>,
    ) -> StoreResult<(Vec<Message>, Option<String>)> {
        let mut payload = json!({ "filter": filter });
        if let Some(state) = page_state {
            payload["options"] = json!({ "pageState": state });
        }
        let data = self
            .command(Some(collection), "find", payload)
            .await?
            .data
            .unwrap_or_default();
        let next = data.next_page_state.filter(|s| !s.is_empty());
        debug!(collection, documents = data.documents.len(), more = next.is_some(), "fetched page");
        Ok((data.documents, next))
    }

    /// Pages of `find` results, following `nextPageState` until the server
    /// stops returning one.
    fn pages<'s>(
        &'s self,
        collection: &'s str,
        filter: &'s Filter,
    ) -> impl Stream<Item = StoreResult<Vec<Message>>> + 's {
        stream::try_unfold(Some(None), move |cursor: Option<Option<String>>| async move {
            match cursor {
                None => Ok(None),
                Some(page_state) => self
                    .fetch_page(collection, filter, page_state)
                    .await
                    .map(|(documents, next)| Some((documents, next.map(Some)))),
            }
        })
    }
}

impl DocumentStore for DataApiStore {
    async fn list_collections(&self) -> StoreResult<Vec<String>> {
        let response = self.command(None, "findCollections", json!({})).await?;
        Ok(response.status.unwrap_or_default().collections)
    }

    async fn drop_collection(&self, name: &str) -> StoreResult<()> {
        self.command(None, "deleteCollection", json!({ "name": name }))
            .await?;
        Ok(())
    }

    async fn create_collection(&self, name: &str) -> StoreResult<()> {
        self.command(None, "createCollection", json!({ "name": name }))
            .await?;
        Ok(())
    }

    async fn insert_many(&self, collection: &str, docs: &[Message]) -> StoreResult<Vec<String>> {
        let mut ids = Vec::with_capacity(docs.len());
        for chunk in docs.chunks(self.chunk_size) {
            let payload = json!({ "documents": chunk, "options": { "ordered": false } });
            let response = self.command(Some(collection), "insertMany", payload).await?;
            let inserted = response.status.unwrap_or_default().inserted_ids;
            if inserted.len() != chunk.len() {
                return Err(StoreError::UnexpectedResponse(format!(
                    "insertMany acknowledged {} of {} documents",
                    inserted.len(),
                    chunk.len()
                )));
            }
            // Unordered inserts may acknowledge out of order; ids are ours anyway.
            ids.extend(chunk.iter().map(|m| m.id.clone()));
        }
        Ok(ids)
    }

    async fn find_one(&self, collection: &str, filter: &Filter) -> StoreResult<Option<Message>> {
        let response = self
            .command(Some(collection), "findOne", json!({ "filter": filter }))
            .await?;
        Ok(response.data.and_then(|d| d.document))
    }

    async fn find(&self, collection: &str, filter: &Filter) -> StoreResult<Vec<Message>> {
        self.pages(collection, filter).try_concat().await
    }

    async fn count(&self, collection: &str, filter: &Filter) -> StoreResult<u64> {
        let response = self
            .command(Some(collection), "countDocuments", json!({ "filter": filter }))
            .await?;
        response
            .status
            .and_then(|s| s.count)
            .ok_or_else(|| StoreError::UnexpectedResponse("countDocuments returned no count".into()))
    }
}
