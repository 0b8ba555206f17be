//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based implementation of the store contract
//! using `aws-sdk-dynamodb`, following a single-table design:
//!
//! | attribute | value |
//! |---|---|
//! | `PK`, `SK` | `USER#<id>` |
//! | `GSI1PK` | `USERS` |
//! | `GSI1SK` | `<id>` |
//! | `user` | map of `id`, `name`, `email`, `createdAt`, `updatedAt` |

mod client;
mod conversions;
mod error;
mod keys;
mod repository;
mod table;

pub use client::create_client;
pub use repository::DynamoDbStore;
pub use table::{create_table, TableCreation, TableError};
