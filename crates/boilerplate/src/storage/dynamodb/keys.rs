//! DynamoDB key generation functions.
//!
//! Pure functions for generating partition and sort keys following the single-table design.
//! All functions are sync and have no side effects.

// ============================================================================
// Attribute names
// ============================================================================

pub const PK: &str = "PK";
pub const SK: &str = "SK";
pub const GSI1PK: &str = "GSI1PK";
pub const GSI1SK: &str = "GSI1SK";

/// Name of the nested map attribute holding the user's fields.
pub const USER_ATTRIBUTE: &str = "user";

// ============================================================================
// Key prefixes
// ============================================================================

pub const USER_PREFIX: &str = "USER#";

/// Partition value shared by every user in GSI1, so a single query lists them all.
pub const USERS_PARTITION: &str = "USERS";

// ============================================================================
// User keys
// ============================================================================

/// Generate primary key for a User.
///
/// Pattern: `USER#<user_id>`
pub fn user_pk(user_id: &str) -> String {
    format!("{USER_PREFIX}{user_id}")
}

/// Generate sort key for a User.
///
/// Pattern: `USER#<user_id>` (same as PK for single-item queries)
pub fn user_sk(user_id: &str) -> String {
    format!("{USER_PREFIX}{user_id}")
}

/// Generate GSI1 partition key for listing users.
///
/// Pattern: `USERS`
pub fn user_gsi1_pk() -> String {
    USERS_PARTITION.to_string()
}

/// Generate GSI1 sort key for listing users.
///
/// Pattern: `<user_id>`
pub fn user_gsi1_sk(user_id: &str) -> String {
    user_id.to_string()
}
