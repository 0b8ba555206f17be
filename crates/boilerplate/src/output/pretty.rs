//! Pretty output formatting.

use boilerplate_core::user::User;

/// Format a user for display.
pub fn format_user(user: &User) -> String {
    format!(
        "{}\n  ID: {}\n  Email: {}\n  Created: {}\n  Updated: {}",
        user.name,
        user.id,
        user.email,
        user.created_at.to_rfc3339(),
        user.updated_at.to_rfc3339()
    )
}

/// Format users for display.
pub fn format_users(users: &[User]) -> String {
    if users.is_empty() {
        return "No users found.".to_string();
    }
    let mut output = format!("USERS ({})\n", users.len());
    output.push_str(&"-".repeat(40));
    for user in users {
        output.push_str(&format!("\n{}", format_user(user)));
        output.push('\n');
    }
    output
}
