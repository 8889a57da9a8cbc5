// src/lib.rs
//! Seeds a document database with synthetic social-media messages and reports
//! how often each user writes about each topic.

pub mod config;
pub mod error;
pub mod generate;
pub mod message;
pub mod profile;
pub mod report;
pub mod seed;
pub mod store;
pub mod template;

pub use config::{BackendKind, Config};
pub use error::{ConfigError, ProfileError, SeedError, StoreError};
pub use generate::Generator;
pub use message::{Filter, Message};
pub use profile::SeedProfile;
pub use report::TopicReport;
pub use seed::{run, SeedPlan, SeedSummary};
pub use store::{DataApiStore, DocumentStore, MemoryStore, MongoStore};
