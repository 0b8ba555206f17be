use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user of the service.
///
/// The `id` is opaque to the store: it is supplied by the caller on create and
/// used verbatim as the storage key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Set once on create, never modified afterwards.
    pub created_at: DateTime<Utc>,
    /// Set on every create and update.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a user whose `created_at` and `updated_at` are both `at`.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            created_at: at,
            updated_at: at,
        }
    }
}
