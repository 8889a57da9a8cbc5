// src/config.rs
use crate::error::ConfigError;

pub const ENDPOINT_VAR: &str = "ASTRA_DB_API_ENDPOINT";
pub const TOKEN_VAR: &str = "ASTRA_DB_APPLICATION_TOKEN";
pub const KEYSPACE_VAR: &str = "ASTRA_DB_KEYSPACE";

pub const DEFAULT_KEYSPACE: &str = "default_keyspace";

/// Which client a given endpoint is served by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    DataApi,
    Mongo,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: String,
    pub token: String,
    pub keyspace: String,
}

impl Config {
    /// Builds a config from raw values. Empty strings count as missing, the
    /// endpoint is checked before the token.
    pub fn from_parts(
        endpoint: Option<String>,
        token: Option<String>,
        keyspace: Option<String>,
    ) -> Result<Self, ConfigError> {
        let endpoint = non_empty(endpoint).ok_or(ConfigError::MissingVar(ENDPOINT_VAR))?;
        let token = non_empty(token).ok_or(ConfigError::MissingVar(TOKEN_VAR))?;
        let keyspace = non_empty(keyspace).unwrap_or_else(|| DEFAULT_KEYSPACE.to_string());

        let config = Config {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token,
            keyspace,
        };
        config.backend()?;
        Ok(config)
    }

    pub fn backend(&self) -> Result<BackendKind, ConfigError> {
        let scheme = self
            .endpoint
            .split_once("://")
            .map(|(scheme, _)| scheme.to_ascii_lowercase())
            .ok_or_else(|| ConfigError::InvalidEndpoint(self.endpoint.clone()))?;

        match scheme.as_str() {
            "http" | "https" => Ok(BackendKind::DataApi),
            "mongodb" | "mongodb+srv" => Ok(BackendKind::Mongo),
            _ => Err(ConfigError::InvalidEndpoint(self.endpoint.clone())),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
