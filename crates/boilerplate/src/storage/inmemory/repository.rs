//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use boilerplate_core::storage::{ErrorKind, Result, StoreError, UserStore};
use boilerplate_core::user::User;

/// In-memory storage backend.
///
/// Uses a `HashMap` wrapped in `Arc<RwLock<_>>` for thread-safe access.
/// Data is not persisted and is lost when the last clone is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn create_user(&self, user: &User) -> Result<()> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) {
            tracing::warn!(user_id = %user.id, "could not create user: id already exists");
            return Err(StoreError::CouldNotCreate(ErrorKind::AlreadyExists));
        }
        users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn get_user(&self, id: &str) -> Result<User> {
        let users = self.users.read().await;
        users
            .get(id)
            .cloned()
            .ok_or(StoreError::CouldNotGet(ErrorKind::NotFound))
    }

    async fn update_user(&self, user: &User) -> Result<User> {
        let mut users = self.users.write().await;
        let Some(stored) = users.get_mut(&user.id) else {
            tracing::warn!(user_id = %user.id, "could not update user: not found");
            return Err(StoreError::CouldNotUpdate(ErrorKind::NotFound));
        };
        stored.name = user.name.clone();
        stored.email = user.email.clone();
        stored.updated_at = user.updated_at;
        Ok(stored.clone())
    }

    async fn delete_user(&self, id: &str) -> Result<()> {
        let mut users = self.users.write().await;
        if users.remove(id).is_none() {
            tracing::warn!(user_id = %id, "could not delete user: not found");
            return Err(StoreError::CouldNotDelete(ErrorKind::NotFound));
        }
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let users = self.users.read().await;
        Ok(users.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::contract_tests::store_contract_tests;

    store_contract_tests!(Some(InMemoryStore::new()));

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = InMemoryStore::new();
        let clone = store.clone();
        let user = User::new("1", "John Doe", "john@example.com", chrono::Utc::now());

        store.create_user(&user).await.unwrap();

        assert_eq!(clone.get_user("1").await.unwrap(), user);
    }
}
