use async_trait::async_trait;

use crate::user::User;

use super::Result;

/// Persistence contract for users.
///
/// Implementations translate every backend failure into the matching
/// [`StoreError`](super::StoreError) sentinel and log the native cause
/// themselves. Concurrent writes to the same id are resolved by the backend's
/// own primitives (conditional writes, primary-key constraints).
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persists a new user.
    ///
    /// Fails with `CouldNotCreate(AlreadyExists)` if the id is taken; the
    /// existing record is left untouched.
    async fn create_user(&self, user: &User) -> Result<()>;

    /// Gets a user by id. Fails with `CouldNotGet(NotFound)` if absent.
    async fn get_user(&self, id: &str) -> Result<User>;

    /// Overwrites name, email and `updated_at` of an existing user.
    ///
    /// `user.created_at` is ignored. Returns the record as stored after the
    /// write, so its `created_at` is the original one. Fails with
    /// `CouldNotUpdate(NotFound)` if the id does not exist; any failure is
    /// reported as `CouldNotUpdate`.
    async fn update_user(&self, user: &User) -> Result<User>;

    /// Deletes a user by id. Fails with `CouldNotDelete(NotFound)` if absent.
    async fn delete_user(&self, id: &str) -> Result<()>;

    /// Returns every stored user, in no guaranteed order.
    async fn list_users(&self) -> Result<Vec<User>>;
}
