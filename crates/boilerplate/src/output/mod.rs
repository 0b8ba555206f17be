//! Output formatting functions.
//!
//! JSON output is the serde form of the core types; pretty output is meant for
//! people and is not stable.

pub mod json;
pub mod pretty;

use boilerplate_core::user::User;

use crate::cli::OutputFormat;

/// Renders a single user, prefixing pretty output with `heading` when given.
pub fn render_user(user: &User, format: OutputFormat, heading: Option<&str>) -> String {
    match (format, heading) {
        (OutputFormat::Json, _) => json::format_json(user),
        (OutputFormat::Pretty, Some(heading)) => {
            format!("{heading}:\n{}", pretty::format_user(user))
        }
        (OutputFormat::Pretty, None) => pretty::format_user(user),
    }
}

pub fn render_users(users: &[User], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_json(users),
        OutputFormat::Pretty => pretty::format_users(users),
    }
}

/// Renders the outcome of a delete. JSON output is the empty response object.
pub fn render_deleted(id: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_json(&boilerplate_core::user::DeleteUserResponse {}),
        OutputFormat::Pretty => format!("Deleted user {id}"),
    }
}
