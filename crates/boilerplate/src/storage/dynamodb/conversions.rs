//! DynamoDB item conversion functions.
//!
//! Pure functions for converting between DynamoDB items and domain types.
//! These are testable in isolation without database access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use boilerplate_core::user::User;
use chrono::{DateTime, Utc};
use thiserror::Error;

use super::keys;

/// A stored item that doesn't decode into a [`User`].
#[derive(Debug, Error, PartialEq)]
pub enum ConversionError {
    #[error("missing or invalid field: {0}")]
    MissingField(&'static str),

    #[error("invalid timestamp in {field}: {value}")]
    InvalidTimestamp { field: &'static str, value: String },
}

/// Primary key of the item holding `user_id`.
pub fn user_key(user_id: &str) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (keys::PK.to_string(), AttributeValue::S(keys::user_pk(user_id))),
        (keys::SK.to_string(), AttributeValue::S(keys::user_sk(user_id))),
    ])
}

/// Convert a User to a DynamoDB item.
pub fn user_to_item(user: &User) -> HashMap<String, AttributeValue> {
    let mut item = user_key(&user.id);

    // GSI1 keys
    item.insert(
        keys::GSI1PK.to_string(),
        AttributeValue::S(keys::user_gsi1_pk()),
    );
    item.insert(
        keys::GSI1SK.to_string(),
        AttributeValue::S(keys::user_gsi1_sk(&user.id)),
    );

    // Data
    let mut data = HashMap::new();
    data.insert("id".to_string(), AttributeValue::S(user.id.clone()));
    data.insert("name".to_string(), AttributeValue::S(user.name.clone()));
    data.insert("email".to_string(), AttributeValue::S(user.email.clone()));
    data.insert(
        "createdAt".to_string(),
        AttributeValue::S(user.created_at.to_rfc3339()),
    );
    data.insert(
        "updatedAt".to_string(),
        AttributeValue::S(user.updated_at.to_rfc3339()),
    );
    item.insert(keys::USER_ATTRIBUTE.to_string(), AttributeValue::M(data));

    item
}

/// Convert a DynamoDB item to a User.
pub fn item_to_user(item: &HashMap<String, AttributeValue>) -> Result<User, ConversionError> {
    let data = item
        .get(keys::USER_ATTRIBUTE)
        .and_then(|v| v.as_m().ok())
        .ok_or(ConversionError::MissingField(keys::USER_ATTRIBUTE))?;

    Ok(User {
        id: get_string(data, "id")?,
        name: get_string(data, "name")?,
        email: get_string(data, "email")?,
        created_at: get_datetime(data, "createdAt")?,
        updated_at: get_datetime(data, "updatedAt")?,
    })
}

// ============================================================================
// Helper functions
// ============================================================================

fn get_string(
    item: &HashMap<String, AttributeValue>,
    key: &'static str,
) -> Result<String, ConversionError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or(ConversionError::MissingField(key))
}

fn get_datetime(
    item: &HashMap<String, AttributeValue>,
    key: &'static str,
) -> Result<DateTime<Utc>, ConversionError> {
    let s = get_string(item, key)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ConversionError::InvalidTimestamp {
            field: key,
            value: s,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        let created_at = DateTime::parse_from_rfc3339("2024-01-15T10:30:00.123456789Z")
            .unwrap()
            .with_timezone(&Utc);
        User::new("user-1", "John Doe", "john@example.com", created_at)
    }

    #[test]
    fn test_user_round_trip() {
        let user = sample_user();

        let item = user_to_item(&user);
        let decoded = item_to_user(&item).unwrap();

        assert_eq!(decoded, user);
    }

    #[test]
    fn test_user_item_has_correct_keys() {
        let item = user_to_item(&sample_user());

        assert_eq!(item.get("PK").unwrap().as_s().unwrap(), "USER#user-1");
        assert_eq!(item.get("SK").unwrap().as_s().unwrap(), "USER#user-1");
        assert_eq!(item.get("GSI1PK").unwrap().as_s().unwrap(), "USERS");
        assert_eq!(item.get("GSI1SK").unwrap().as_s().unwrap(), "user-1");
    }

    #[test]
    fn test_user_fields_are_nested_under_user_map() {
        let item = user_to_item(&sample_user());

        assert!(!item.contains_key("name"));
        let data = item.get("user").unwrap().as_m().unwrap();
        assert_eq!(data.get("name").unwrap().as_s().unwrap(), "John Doe");
        assert_eq!(data.get("email").unwrap().as_s().unwrap(), "john@example.com");
        assert!(data.contains_key("createdAt"));
        assert!(data.contains_key("updatedAt"));
    }

    #[test]
    fn test_user_key_matches_item_key() {
        let item = user_to_item(&sample_user());
        let key = user_key("user-1");

        assert_eq!(key.len(), 2);
        assert_eq!(key.get("PK"), item.get("PK"));
        assert_eq!(key.get("SK"), item.get("SK"));
    }

    #[test]
    fn test_missing_user_map_is_rejected() {
        let item = user_key("user-1");

        assert_eq!(
            item_to_user(&item),
            Err(ConversionError::MissingField("user"))
        );
    }

    #[test]
    fn test_get_string_missing_field() {
        let mut item = user_to_item(&sample_user());
        if let Some(AttributeValue::M(data)) = item.get_mut("user") {
            data.remove("email");
        }

        assert_eq!(
            item_to_user(&item),
            Err(ConversionError::MissingField("email"))
        );
    }

    #[test]
    fn test_invalid_timestamp_is_rejected() {
        let mut item = user_to_item(&sample_user());
        if let Some(AttributeValue::M(data)) = item.get_mut("user") {
            data.insert(
                "createdAt".to_string(),
                AttributeValue::S("yesterday".to_string()),
            );
        }

        assert_eq!(
            item_to_user(&item),
            Err(ConversionError::InvalidTimestamp {
                field: "createdAt",
                value: "yesterday".to_string(),
            })
        );
    }

    #[test]
    fn test_wrong_attribute_type_is_rejected() {
        let mut item = user_to_item(&sample_user());
        if let Some(AttributeValue::M(data)) = item.get_mut("user") {
            data.insert("name".to_string(), AttributeValue::N("42".to_string()));
        }

        assert_eq!(
            item_to_user(&item),
            Err(ConversionError::MissingField("name"))
        );
    }
}
