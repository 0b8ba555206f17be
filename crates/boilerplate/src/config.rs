//! Runtime configuration.
//!
//! Built from the parsed command line; clap reads the environment variables
//! for each flag, so there is no separate env loading step here.

use std::sync::Arc;

use boilerplate_core::storage::UserStore;
use clap::ValueEnum;
use thiserror::Error;

use crate::storage::InMemoryStore;

pub const DEFAULT_SQLITE_PATH: &str = "users.db";
pub const DEFAULT_TABLE_NAME: &str = "users";
pub const DEFAULT_INDEX_NAME: &str = "GSI1";
pub const DEFAULT_REGION: &str = "us-east-1";

/// Which store implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Backend {
    /// Process-local map, lost on exit.
    Memory,
    /// SQLite database file.
    #[default]
    Sqlite,
    /// DynamoDB table.
    Dynamodb,
}

impl Backend {
    /// Cargo feature that compiles this backend in, if it needs one.
    pub fn feature(&self) -> Option<&'static str> {
        match self {
            Backend::Memory => None,
            Backend::Sqlite => Some("sqlite"),
            Backend::Dynamodb => Some("dynamodb"),
        }
    }
}

/// Where the DynamoDB store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamoDbConfig {
    pub table_name: String,
    /// Global secondary index used to list users.
    pub index_name: String,
    pub region: String,
    /// Custom endpoint URL (for local DynamoDB).
    pub endpoint_url: Option<String>,
}

impl Default for DynamoDbConfig {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            index_name: DEFAULT_INDEX_NAME.to_string(),
            region: DEFAULT_REGION.to_string(),
            endpoint_url: None,
        }
    }
}

impl DynamoDbConfig {
    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("local DynamoDB ({url})"),
            None => format!("AWS DynamoDB (region: {})", self.region),
        }
    }
}

/// Errors raised while turning configuration into a store.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("backend '{backend:?}' is not available: rebuild with the '{feature}' feature")]
    BackendNotCompiled {
        backend: Backend,
        feature: &'static str,
    },

    #[cfg(feature = "sqlite")]
    #[error("could not open sqlite database at '{path}': {source}")]
    Sqlite {
        path: String,
        #[source]
        source: tokio_rusqlite::Error,
    },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub backend: Backend,
    /// Path to SQLite database file, or `:memory:`.
    pub sqlite_path: String,
    pub dynamodb: DynamoDbConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            sqlite_path: DEFAULT_SQLITE_PATH.to_string(),
            dynamodb: DynamoDbConfig::default(),
        }
    }
}

impl Config {
    /// Constructs the configured backend.
    pub async fn build_store(&self) -> Result<Arc<dyn UserStore>, ConfigError> {
        tracing::debug!(backend = ?self.backend, "building user store");

        match self.backend {
            Backend::Memory => Ok(Arc::new(InMemoryStore::new())),
            Backend::Sqlite => self.build_sqlite().await,
            Backend::Dynamodb => self.build_dynamodb().await,
        }
    }

    #[cfg(feature = "sqlite")]
    async fn build_sqlite(&self) -> Result<Arc<dyn UserStore>, ConfigError> {
        let store = crate::storage::SqliteStore::new(&self.sqlite_path)
            .await
            .map_err(|source| ConfigError::Sqlite {
                path: self.sqlite_path.clone(),
                source,
            })?;
        Ok(Arc::new(store))
    }

    #[cfg(not(feature = "sqlite"))]
    async fn build_sqlite(&self) -> Result<Arc<dyn UserStore>, ConfigError> {
        Err(not_compiled(Backend::Sqlite))
    }

    #[cfg(feature = "dynamodb")]
    async fn build_dynamodb(&self) -> Result<Arc<dyn UserStore>, ConfigError> {
        let store = crate::storage::DynamoDbStore::from_config(&self.dynamodb).await;
        Ok(Arc::new(store))
    }

    #[cfg(not(feature = "dynamodb"))]
    async fn build_dynamodb(&self) -> Result<Arc<dyn UserStore>, ConfigError> {
        Err(not_compiled(Backend::Dynamodb))
    }
}

#[allow(dead_code)]
fn not_compiled(backend: Backend) -> ConfigError {
    ConfigError::BackendNotCompiled {
        backend,
        feature: backend.feature().unwrap_or_default(),
    }
}
