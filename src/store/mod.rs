// src/store/mod.rs
//! Collection-level access to the document database.

mod data_api;
mod memory;
mod mongo;

pub use data_api::{DataApiStore, DEFAULT_CHUNK_SIZE};
pub use memory::MemoryStore;
pub use mongo::MongoStore;

use crate::error::StoreResult;
use crate::message::{Filter, Message};

/// The operations the seeder needs from a backend. Every call completes
/// before the next one is issued.
#[allow(async_fn_in_trait)]
pub trait DocumentStore {
    async fn list_collections(&self) -> StoreResult<Vec<String>>;

    async fn drop_collection(&self, name: &str) -> StoreResult<()>;

    async fn create_collection(&self, name: &str) -> StoreResult<()>;

    /// Inserts all documents and returns their ids in input order.
    async fn insert_many(&self, collection: &str, docs: &[Message]) -> StoreResult<Vec<String>>;

    async fn find_one(&self, collection: &str, filter: &Filter) -> StoreResult<Option<Message>>;

    async fn find(&self, collection: &str, filter: &Filter) -> StoreResult<Vec<Message>>;

    async fn count(&self, collection: &str, filter: &Filter) -> StoreResult<u64>;
}
