// src/error.rs
use thiserror::Error;

/// Missing or unusable connection settings.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("invalid endpoint '{0}'")]
    InvalidEndpoint(String),
}

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("failed to read profile: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse profile: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid profile: {0}")]
    Invalid(String),

    #[error("invalid text format: {0}")]
    Template(#[from] minijinja::Error),
}

/// Errors raised by a document store backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The Data API answered with an `errors` array
    #[error("Data API error: {message} ({})", .code.as_deref().unwrap_or("no error code"))]
    Api {
        code: Option<String>,
        message: String,
    },

    /// Non-success HTTP status
    #[error("HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("collection '{0}' does not exist")]
    CollectionNotFound(String),

    #[error("document with _id '{0}' already exists")]
    DuplicateId(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("BSON error: {0}")]
    Bson(#[from] bson::ser::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum SeedError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}
