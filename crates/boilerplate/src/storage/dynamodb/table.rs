//! Table provisioning.
//!
//! Creates the single table the store expects: `PK`/`SK` as hash/range key and
//! one global secondary index on `GSI1PK`/`GSI1SK` projecting every attribute.

use std::time::Duration;

use aws_sdk_dynamodb::error::{BuildError, DisplayErrorContext};
use aws_sdk_dynamodb::operation::create_table::CreateTableError;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, GlobalSecondaryIndex, IndexStatus, KeySchemaElement,
    KeyType, Projection, ProjectionType, ScalarAttributeType, TableStatus,
};
use aws_sdk_dynamodb::Client;
use thiserror::Error;

use super::keys;

const MAX_ACTIVATION_ATTEMPTS: u32 = 60;
const ACTIVATION_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Errors that can occur while provisioning the table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("AWS SDK error: {0}")]
    AwsSdk(String),

    #[error("timeout waiting for table '{table_name}' to become active")]
    ActivationTimeout { table_name: String },
}

impl From<BuildError> for TableError {
    fn from(err: BuildError) -> Self {
        Self::AwsSdk(err.to_string())
    }
}

/// Outcome of [`create_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableCreation {
    Created,
    AlreadyExists,
}

fn key_element(name: &str, key_type: KeyType) -> Result<KeySchemaElement, BuildError> {
    KeySchemaElement::builder()
        .attribute_name(name)
        .key_type(key_type)
        .build()
}

fn string_attribute(name: &str) -> Result<AttributeDefinition, BuildError> {
    AttributeDefinition::builder()
        .attribute_name(name)
        .attribute_type(ScalarAttributeType::S)
        .build()
}

/// Creates the users table and waits until it and its index are active.
///
/// An existing table with the same name is reported as
/// [`TableCreation::AlreadyExists`]; its schema is not checked.
pub async fn create_table(
    client: &Client,
    table_name: &str,
    index_name: &str,
) -> Result<TableCreation, TableError> {
    let attribute_definitions = vec![
        string_attribute(keys::PK)?,
        string_attribute(keys::SK)?,
        string_attribute(keys::GSI1PK)?,
        string_attribute(keys::GSI1SK)?,
    ];

    let gsi = GlobalSecondaryIndex::builder()
        .index_name(index_name)
        .key_schema(key_element(keys::GSI1PK, KeyType::Hash)?)
        .key_schema(key_element(keys::GSI1SK, KeyType::Range)?)
        .projection(
            Projection::builder()
                .projection_type(ProjectionType::All)
                .build(),
        )
        .build()?;

    let result = client
        .create_table()
        .table_name(table_name)
        .key_schema(key_element(keys::PK, KeyType::Hash)?)
        .key_schema(key_element(keys::SK, KeyType::Range)?)
        .set_attribute_definitions(Some(attribute_definitions))
        .global_secondary_indexes(gsi)
        .billing_mode(BillingMode::PayPerRequest)
        .send()
        .await;

    match result {
        Ok(_) => {
            tracing::info!(table = table_name, "created table, waiting for it to become active");
        }
        Err(err) => {
            let already_exists = matches!(
                err.as_service_error(),
                Some(CreateTableError::ResourceInUseException(_))
            );
            if already_exists {
                tracing::info!(table = table_name, "table already exists");
                return Ok(TableCreation::AlreadyExists);
            }
            return Err(TableError::AwsSdk(DisplayErrorContext(&err).to_string()));
        }
    }

    wait_for_table_active(client, table_name).await?;
    Ok(TableCreation::Created)
}

/// Whether the table and all of its indexes are active.
async fn is_table_active(client: &Client, table_name: &str) -> Result<bool, TableError> {
    let response = client
        .describe_table()
        .table_name(table_name)
        .send()
        .await
        .map_err(|e| TableError::AwsSdk(DisplayErrorContext(&e).to_string()))?;

    let Some(table) = response.table() else {
        return Ok(false);
    };

    let table_active = table.table_status() == Some(&TableStatus::Active);
    let indexes_active = table
        .global_secondary_indexes()
        .iter()
        .all(|gsi| gsi.index_status() == Some(&IndexStatus::Active));

    Ok(table_active && indexes_active)
}

async fn wait_for_table_active(client: &Client, table_name: &str) -> Result<(), TableError> {
    for _ in 0..MAX_ACTIVATION_ATTEMPTS {
        if is_table_active(client, table_name).await? {
            return Ok(());
        }
        tokio::time::sleep(ACTIVATION_POLL_INTERVAL).await;
    }

    Err(TableError::ActivationTimeout {
        table_name: table_name.to_string(),
    })
}
