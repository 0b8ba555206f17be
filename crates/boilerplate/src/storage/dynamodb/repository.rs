//! DynamoDB repository implementation.
//!
//! Implements the [`UserStore`] contract from `boilerplate_core::storage` using DynamoDB.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;

use boilerplate_core::storage::{ErrorKind, Result, StoreError, UserStore};
use boilerplate_core::user::User;

use crate::config::DynamoDbConfig;

use super::client::create_client;
use super::conversions::{item_to_user, user_key, user_to_item};
use super::error::{
    map_delete_item_error, map_get_item_error, map_put_item_error, map_query_error,
    map_update_item_error,
};
use super::keys;

/// Creates only; fails when the primary key is already taken.
const CONDITION_NOT_EXISTS: &str = "attribute_not_exists(PK)";
/// Updates and deletes only touch an existing item.
const CONDITION_EXISTS: &str = "attribute_exists(PK)";

/// `createdAt` is never part of the update.
const UPDATE_EXPRESSION: &str =
    "SET #user.#name = :name, #user.#email = :email, #user.#updatedAt = :updatedAt";

/// DynamoDB-based store implementation.
///
/// The SDK client is cheap to clone and safe to share across concurrent calls.
pub struct DynamoDbStore {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DynamoDbStore {
    /// Creates a new store with the given DynamoDB client, table and index names.
    pub fn new(
        client: Client,
        table_name: impl Into<String>,
        index_name: impl Into<String>,
    ) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            index_name: index_name.into(),
        }
    }

    /// Creates a new store, building the client from `config`.
    pub async fn from_config(config: &DynamoDbConfig) -> Self {
        let client = create_client(config).await;
        tracing::debug!(
            table = %config.table_name,
            target = %config.target_display(),
            "opened dynamodb user store"
        );
        Self::new(client, &config.table_name, &config.index_name)
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl UserStore for DynamoDbStore {
    async fn create_user(&self, user: &User) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(user_to_item(user)))
            .condition_expression(CONDITION_NOT_EXISTS)
            .send()
            .await
            .map_err(|e| map_put_item_error(e, &user.id))?;

        Ok(())
    }

    async fn get_user(&self, id: &str) -> Result<User> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(user_key(id)))
            .consistent_read(true)
            .send()
            .await
            .map_err(|e| map_get_item_error(e, id))?;

        let Some(item) = result.item else {
            tracing::warn!(user_id = id, "user not found");
            return Err(StoreError::CouldNotGet(ErrorKind::NotFound));
        };

        item_to_user(&item).map_err(|e| {
            tracing::error!(error = %e, user_id = id, "stored user could not be decoded");
            StoreError::CouldNotGet(ErrorKind::Corrupt)
        })
    }

    /// Returns the item as written. `createdAt` comes from the stored item,
    /// never from `user`.
    async fn update_user(&self, user: &User) -> Result<User> {
        let output = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .set_key(Some(user_key(&user.id)))
            .update_expression(UPDATE_EXPRESSION)
            .condition_expression(CONDITION_EXISTS)
            .expression_attribute_names("#user", keys::USER_ATTRIBUTE)
            .expression_attribute_names("#name", "name")
            .expression_attribute_names("#email", "email")
            .expression_attribute_names("#updatedAt", "updatedAt")
            .expression_attribute_values(":name", AttributeValue::S(user.name.clone()))
            .expression_attribute_values(":email", AttributeValue::S(user.email.clone()))
            .expression_attribute_values(
                ":updatedAt",
                AttributeValue::S(user.updated_at.to_rfc3339()),
            )
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map_err(|e| map_update_item_error(e, &user.id))?;

        let item = output.attributes.unwrap_or_default();
        item_to_user(&item).map_err(|e| {
            tracing::error!(error = %e, user_id = %user.id, "updated user could not be decoded");
            StoreError::CouldNotUpdate(ErrorKind::Corrupt)
        })
    }

    async fn delete_user(&self, id: &str) -> Result<()> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(user_key(id)))
            .condition_expression(CONDITION_EXISTS)
            .send()
            .await
            .map_err(|e| map_delete_item_error(e, id))?;

        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let mut users = Vec::new();
        let mut exclusive_start_key = None;

        loop {
            let output = self
                .client
                .query()
                .table_name(&self.table_name)
                .index_name(&self.index_name)
                .key_condition_expression("#pk = :pk")
                .expression_attribute_names("#pk", keys::GSI1PK)
                .expression_attribute_values(":pk", AttributeValue::S(keys::user_gsi1_pk()))
                .set_exclusive_start_key(exclusive_start_key)
                .send()
                .await
                .map_err(map_query_error)?;

            for item in output.items.unwrap_or_default() {
                match item_to_user(&item) {
                    Ok(user) => users.push(user),
                    Err(e) => {
                        let pk = item.get(keys::PK).and_then(|v| v.as_s().ok());
                        tracing::warn!(error = %e, ?pk, "skipping user that could not be decoded");
                    }
                }
            }

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => exclusive_start_key = Some(key),
                _ => break,
            }
        }

        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::contract_tests::store_contract_tests;
    use crate::storage::dynamodb::table::create_table;

    /// Builds a store on a fresh table when `DYNAMODB_TEST_ENDPOINT` points at a
    /// local DynamoDB. Returns `None` otherwise so the suite is skipped.
    async fn local_store() -> Option<DynamoDbStore> {
        let endpoint = std::env::var("DYNAMODB_TEST_ENDPOINT").ok()?;
        let config = DynamoDbConfig {
            table_name: format!("users-test-{}", uuid::Uuid::new_v4()),
            endpoint_url: Some(endpoint),
            ..DynamoDbConfig::default()
        };

        let client = create_client(&config).await;
        create_table(&client, &config.table_name, &config.index_name)
            .await
            .unwrap();

        Some(DynamoDbStore::new(
            client,
            &config.table_name,
            &config.index_name,
        ))
    }

    store_contract_tests!(local_store().await);

    #[tokio::test]
    async fn test_list_skips_undecodable_items() {
        let Some(store) = local_store().await else {
            return;
        };
        let good = User::new("1", "John Doe", "john@example.com", chrono::Utc::now());
        store.create_user(&good).await.unwrap();

        let jane = User::new("2", "Jane", "jane@example.com", chrono::Utc::now());
        let mut broken = user_to_item(&jane);
        broken.remove(keys::USER_ATTRIBUTE);
        store
            .client
            .put_item()
            .table_name(store.table_name())
            .set_item(Some(broken))
            .send()
            .await
            .unwrap();

        let users = store.list_users().await.unwrap();

        assert_eq!(users, vec![good]);
    }

    #[tokio::test]
    async fn test_get_undecodable_item_is_corrupt() {
        let Some(store) = local_store().await else {
            return;
        };
        let jane = User::new("1", "Jane", "jane@example.com", chrono::Utc::now());
        let mut broken = user_to_item(&jane);
        broken.remove(keys::USER_ATTRIBUTE);
        store
            .client
            .put_item()
            .table_name(store.table_name())
            .set_item(Some(broken))
            .send()
            .await
            .unwrap();

        let result = store.get_user("1").await;

        assert_eq!(result, Err(StoreError::CouldNotGet(ErrorKind::Corrupt)));
    }
}
