//! boilerplate CLI entry point.

use std::process::ExitCode;

use anyhow::Context;
use boilerplate::cli::{Cli, Commands};
use boilerplate::logging::build_dispatch;
use boilerplate::service::UserService;
use boilerplate_core::context::{RequestContext, RequestId};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::instrument::WithSubscriber;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let dispatch = build_dispatch(&cli.log_config());

    let cancellation = CancellationToken::new();
    tokio::spawn(cancel_on_ctrl_c(cancellation.clone()).with_subscriber(dispatch.clone()));

    match run(cli, cancellation).with_subscriber(dispatch).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Fires `cancellation` on the first Ctrl+C.
async fn cancel_on_ctrl_c(cancellation: CancellationToken) {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("received Ctrl+C, cancelling");
        cancellation.cancel();
    }
}

async fn run(cli: Cli, cancellation: CancellationToken) -> anyhow::Result<ExitCode> {
    let config = cli.config();

    match cli.command {
        Commands::User(user_cmd) => {
            let store = config
                .build_store()
                .await
                .context("could not build user store")?;
            let service = UserService::new(store);
            let ctx = RequestContext::new(RequestId::new()).with_cancellation(cancellation);

            match user_cmd.action.execute(&service, &ctx, cli.format).await {
                Ok(output) => {
                    println!("{output}");
                    Ok(ExitCode::SUCCESS)
                }
                Err(err) => {
                    eprintln!("Error: {err}");
                    Ok(ExitCode::from(err.exit_code()))
                }
            }
        }
        #[cfg(feature = "dynamodb")]
        Commands::Table(table_cmd) => {
            let output = table_cmd
                .action
                .execute(&config.dynamodb)
                .await
                .context("could not provision table")?;
            println!("{output}");
            Ok(ExitCode::SUCCESS)
        }
    }
}
