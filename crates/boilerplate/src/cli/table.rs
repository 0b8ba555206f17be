//! DynamoDB table CLI commands.

use clap::{Parser, Subcommand};

use crate::config::DynamoDbConfig;
use crate::storage::dynamodb::{create_client, create_table, TableCreation, TableError};

/// DynamoDB table management commands.
#[derive(Debug, Parser)]
pub struct TableCommand {
    #[command(subcommand)]
    pub action: TableAction,
}

/// Available table actions.
#[derive(Debug, Subcommand)]
pub enum TableAction {
    /// Create the users table and its index, then wait until they are active.
    Create,
}

impl TableAction {
    /// Runs the action against the table described by `config`.
    pub async fn execute(self, config: &DynamoDbConfig) -> Result<String, TableError> {
        match self {
            TableAction::Create => {
                tracing::info!(
                    table = %config.table_name,
                    index = %config.index_name,
                    target = %config.target_display(),
                    "creating table"
                );
                let client = create_client(config).await;
                let outcome =
                    create_table(&client, &config.table_name, &config.index_name).await?;
                Ok(creation_message(&config.table_name, outcome))
            }
        }
    }
}

fn creation_message(table_name: &str, outcome: TableCreation) -> String {
    match outcome {
        TableCreation::Created => format!("Created table {table_name}"),
        TableCreation::AlreadyExists => format!("Table {table_name} already exists"),
    }
}
