//! Pure constructors used by the service layer.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::requests::{CreateUserRequest, UpdateUserRequest};
use super::types::User;

/// Builds the user persisted by a create call.
///
/// The id is a fresh random UUID; both timestamps are `now`.
pub fn new_user(request: &CreateUserRequest, now: DateTime<Utc>) -> User {
    User::new(
        Uuid::new_v4().to_string(),
        request.name.clone(),
        request.email.clone(),
        now,
    )
}

/// Builds the user written by an update call.
///
/// Name and email are taken verbatim from the request. `created_at` is set to
/// `now` only to fill the field; stores ignore it on update.
pub fn replacement_user(request: &UpdateUserRequest, now: DateTime<Utc>) -> User {
    User::new(
        request.id.clone(),
        request.name.clone(),
        request.email.clone(),
        now,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-15T10:30:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_new_user_generates_uuid_id() {
        let request = CreateUserRequest {
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
        };

        let user = new_user(&request, now());

        assert!(Uuid::parse_str(&user.id).is_ok());
        assert_eq!(user.name, "John Doe");
        assert_eq!(user.email, "john@example.com");
        assert_eq!(user.created_at, now());
        assert_eq!(user.updated_at, now());
    }

    #[test]
    fn test_new_user_ids_are_unique() {
        let request = CreateUserRequest {
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
        };

        let a = new_user(&request, now());
        let b = new_user(&request, now());

        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_replacement_user_keeps_request_fields() {
        let request = UpdateUserRequest {
            id: "1".to_string(),
            name: "John Smith".to_string(),
            email: "johnsmith@example.com".to_string(),
        };

        let user = replacement_user(&request, now());

        assert_eq!(user.id, "1");
        assert_eq!(user.name, "John Smith");
        assert_eq!(user.email, "johnsmith@example.com");
        assert_eq!(user.updated_at, now());
    }
}
