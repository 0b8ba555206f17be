//! CLI command definitions.

#[cfg(feature = "dynamodb")]
pub mod table;
pub mod users;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::{
    Backend, Config, DynamoDbConfig, DEFAULT_INDEX_NAME, DEFAULT_REGION, DEFAULT_SQLITE_PATH,
    DEFAULT_TABLE_NAME,
};
use crate::logging::{LogConfig, LogFormat};

/// Manage users in a SQLite or DynamoDB store.
#[derive(Debug, Parser)]
#[command(name = "boilerplate")]
#[command(about = "Manage users in a SQLite or DynamoDB store", long_about = None)]
pub struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write logs as JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Output format.
    #[arg(long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    #[command(flatten)]
    pub store: StoreArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Store selection flags.
#[derive(Debug, Clone, Args)]
pub struct StoreArgs {
    /// Storage backend.
    #[arg(long, global = true, env = "STORE_BACKEND", default_value = "sqlite")]
    pub backend: Backend,

    /// Path to the SQLite database file (`:memory:` for a throwaway database).
    #[arg(long, global = true, env = "SQLITE_PATH", default_value = DEFAULT_SQLITE_PATH)]
    pub sqlite_path: String,

    /// DynamoDB table name.
    #[arg(long, global = true, env = "DYNAMODB_TABLE_NAME", default_value = DEFAULT_TABLE_NAME)]
    pub table: String,

    /// DynamoDB index used to list users.
    #[arg(long, global = true, env = "DYNAMODB_INDEX_NAME", default_value = DEFAULT_INDEX_NAME)]
    pub index: String,

    /// AWS region.
    #[arg(long, global = true, env = "AWS_REGION", default_value = DEFAULT_REGION)]
    pub region: String,

    /// Custom DynamoDB endpoint, e.g. a local DynamoDB.
    #[arg(long, global = true, env = "AWS_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// User management.
    User(users::UserCommand),
    /// DynamoDB table management.
    #[cfg(feature = "dynamodb")]
    Table(table::TableCommand),
}

impl Cli {
    pub fn config(&self) -> Config {
        Config {
            backend: self.store.backend,
            sqlite_path: self.store.sqlite_path.clone(),
            dynamodb: DynamoDbConfig {
                table_name: self.store.table.clone(),
                index_name: self.store.index.clone(),
                region: self.store.region.clone(),
                endpoint_url: self.store.endpoint_url.clone(),
            },
        }
    }

    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            verbose: self.verbose,
            format: if self.json {
                LogFormat::Json
            } else {
                LogFormat::Text
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_store_flags_build_config() {
        let cli = Cli::try_parse_from([
            "boilerplate",
            "--backend",
            "dynamodb",
            "--table",
            "people",
            "--index",
            "ByName",
            "--endpoint-url",
            "http://localhost:8000",
            "user",
            "list",
        ])
        .unwrap();

        let config = cli.config();

        assert_eq!(config.backend, Backend::Dynamodb);
        assert_eq!(config.dynamodb.table_name, "people");
        assert_eq!(config.dynamodb.index_name, "ByName");
        assert_eq!(
            config.dynamodb.endpoint_url.as_deref(),
            Some("http://localhost:8000")
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "boilerplate",
            "user",
            "list",
            "--backend",
            "memory",
            "--json",
            "--verbose",
        ])
        .unwrap();

        assert_eq!(cli.store.backend, Backend::Memory);
        assert_eq!(
            cli.log_config(),
            LogConfig {
                verbose: true,
                format: LogFormat::Json,
            }
        );
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let result = Cli::try_parse_from(["boilerplate", "--backend", "redis", "user", "list"]);

        assert!(result.is_err());
    }
}
