//! User CLI commands.

use boilerplate_core::context::RequestContext;
use boilerplate_core::user::{
    CreateUserRequest, DeleteUserRequest, GetUserRequest, ListUsersRequest, UpdateUserRequest,
};
use clap::{Parser, Subcommand};

use super::OutputFormat;
use crate::output::{render_deleted, render_user, render_users};
use crate::service::{ServiceError, UserService};

/// User management commands.
#[derive(Debug, Parser)]
pub struct UserCommand {
    #[command(subcommand)]
    pub action: UserAction,
}

/// Available user actions.
#[derive(Debug, Subcommand)]
pub enum UserAction {
    /// List all users.
    List,
    /// Get user by ID.
    Get {
        /// User ID.
        #[arg(long)]
        id: String,
    },
    /// Create a new user.
    Create {
        /// User name.
        #[arg(long)]
        name: String,
        /// User email.
        #[arg(long)]
        email: String,
    },
    /// Replace the name and email of an existing user.
    Update {
        /// User ID.
        #[arg(long)]
        id: String,
        /// New user name.
        #[arg(long)]
        name: String,
        /// New user email.
        #[arg(long)]
        email: String,
    },
    /// Delete user by ID.
    Delete {
        /// User ID.
        #[arg(long)]
        id: String,
    },
}

impl UserAction {
    /// Runs the action and renders its result in `format`.
    pub async fn execute(
        self,
        service: &UserService,
        ctx: &RequestContext,
        format: OutputFormat,
    ) -> Result<String, ServiceError> {
        let output = match self {
            UserAction::List => {
                let response = service
                    .list_users(ctx, ListUsersRequest::default())
                    .await?;
                render_users(&response.users, format)
            }
            UserAction::Get { id } => {
                let response = service.get_user(ctx, GetUserRequest { id }).await?;
                render_user(&response.user, format, None)
            }
            UserAction::Create { name, email } => {
                let response = service
                    .create_user(ctx, CreateUserRequest { name, email })
                    .await?;
                render_user(&response.user, format, Some("Created"))
            }
            UserAction::Update { id, name, email } => {
                let response = service
                    .update_user(ctx, UpdateUserRequest { id, name, email })
                    .await?;
                render_user(&response.user, format, Some("Updated"))
            }
            UserAction::Delete { id } => {
                service
                    .delete_user(ctx, DeleteUserRequest { id: id.clone() })
                    .await?;
                render_deleted(&id, format)
            }
        };

        Ok(output)
    }
}
