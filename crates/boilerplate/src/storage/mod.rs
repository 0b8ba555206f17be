//! Storage backend implementations.
//!
//! This module provides concrete implementations of the
//! [`UserStore`](boilerplate_core::storage::UserStore) contract. Which backends
//! are compiled in is controlled by feature flags; which one is used is decided
//! at runtime by [`Config`](crate::config::Config).
//!
//! # Feature Flags
//!
//! - `sqlite` (default): SQLite backend using `rusqlite` and `tokio-rusqlite`
//! - `dynamodb` (default): AWS DynamoDB backend using `aws-sdk-dynamodb`
//!
//! The in-memory backend is always available.
//!
//! # Examples
//!
//! Build with SQLite only:
//! ```bash
//! cargo build -p boilerplate --no-default-features --features sqlite
//! ```

pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;


pub use inmemory::InMemoryStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbStore;
