//! User service.
//!
//! A thin orchestrator over a [`UserStore`]: it assigns ids and timestamps,
//! emits log events and forwards every call to the store inside the caller's
//! [`RequestContext`]. It holds nothing but the store handle.

mod error;

use std::sync::Arc;

use chrono::Utc;
use tracing::Instrument;

use boilerplate_core::context::RequestContext;
use boilerplate_core::storage::UserStore;
use boilerplate_core::user::{
    new_user, replacement_user, CreateUserRequest, CreateUserResponse, DeleteUserRequest,
    DeleteUserResponse, GetUserRequest, GetUserResponse, ListUsersRequest, ListUsersResponse,
    UpdateUserRequest, UpdateUserResponse,
};

pub use error::{Result, ServiceError, CANCELLED_EXIT_CODE};

/// Span every service call runs in.
fn service_span(ctx: &RequestContext, method: &'static str) -> tracing::Span {
    tracing::info_span!("user_service", request_id = %ctx.request_id(), method)
}

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Creates a user with a fresh id. Both timestamps are set to now.
    pub async fn create_user(
        &self,
        ctx: &RequestContext,
        request: CreateUserRequest,
    ) -> Result<CreateUserResponse> {
        async {
            tracing::info!(name = %request.name, email = %request.email, "creating user");

            let user = new_user(&request, Utc::now());
            ctx.run(self.store.create_user(&user)).await??;

            Ok::<_, ServiceError>(CreateUserResponse { user })
        }
        .instrument(service_span(ctx, "create_user"))
        .await
    }

    pub async fn get_user(
        &self,
        ctx: &RequestContext,
        request: GetUserRequest,
    ) -> Result<GetUserResponse> {
        async {
            let user = ctx.run(self.store.get_user(&request.id)).await??;
            Ok::<_, ServiceError>(GetUserResponse { user })
        }
        .instrument(service_span(ctx, "get_user"))
        .await
    }

    /// Replaces name and email of an existing user.
    ///
    /// The response is the record the store wrote, so its `created_at` is the
    /// stored one.
    pub async fn update_user(
        &self,
        ctx: &RequestContext,
        request: UpdateUserRequest,
    ) -> Result<UpdateUserResponse> {
        async {
            let replacement = replacement_user(&request, Utc::now());

            let user = ctx.run(self.store.update_user(&replacement)).await??;

            Ok::<_, ServiceError>(UpdateUserResponse { user })
        }
        .instrument(service_span(ctx, "update_user"))
        .await
    }

    pub async fn delete_user(
        &self,
        ctx: &RequestContext,
        request: DeleteUserRequest,
    ) -> Result<DeleteUserResponse> {
        async {
            ctx.run(self.store.delete_user(&request.id)).await??;
            Ok::<_, ServiceError>(DeleteUserResponse {})
        }
        .instrument(service_span(ctx, "delete_user"))
        .await
    }

    pub async fn list_users(
        &self,
        ctx: &RequestContext,
        _request: ListUsersRequest,
    ) -> Result<ListUsersResponse> {
        async {
            tracing::info!("listing users");

            let users = ctx.run(self.store.list_users()).await??;
            Ok::<_, ServiceError>(ListUsersResponse { users })
        }
        .instrument(service_span(ctx, "list_users"))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;
    use async_trait::async_trait;
    use boilerplate_core::storage::{ErrorKind, StoreError};
    use boilerplate_core::user::User;

    fn service() -> UserService {
        UserService::new(Arc::new(InMemoryStore::new()))
    }

    async fn create(service: &UserService, name: &str, email: &str) -> User {
        service
            .create_user(
                &RequestContext::default(),
                CreateUserRequest {
                    name: name.to_string(),
                    email: email.to_string(),
                },
            )
            .await
            .unwrap()
            .user
    }

    /// A store whose calls never complete.
    struct HangingStore;

    #[async_trait]
    impl UserStore for HangingStore {
        async fn create_user(&self, _user: &User) -> boilerplate_core::storage::Result<()> {
            std::future::pending().await
        }

        async fn get_user(&self, _id: &str) -> boilerplate_core::storage::Result<User> {
            std::future::pending().await
        }

        async fn update_user(&self, _user: &User) -> boilerplate_core::storage::Result<User> {
            std::future::pending().await
        }

        async fn delete_user(&self, _id: &str) -> boilerplate_core::storage::Result<()> {
            std::future::pending().await
        }

        async fn list_users(&self) -> boilerplate_core::storage::Result<Vec<User>> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamps() {
        let service = service();

        let user = create(&service, "John Doe", "john@example.com").await;

        assert!(uuid::Uuid::parse_str(&user.id).is_ok());
        assert_eq!(user.name, "John Doe");
        assert_eq!(user.email, "john@example.com");
        assert_eq!(user.created_at, user.updated_at);
    }

    #[tokio::test]
    async fn test_create_generates_distinct_ids() {
        let service = service();

        let first = create(&service, "John Doe", "john@example.com").await;
        let second = create(&service, "John Doe", "john@example.com").await;

        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_get_returns_created_user() {
        let service = service();
        let created = create(&service, "John Doe", "john@example.com").await;

        let response = service
            .get_user(
                &RequestContext::default(),
                GetUserRequest {
                    id: created.id.clone(),
                },
            )
            .await
            .unwrap();

        assert_eq!(response.user, created);
    }

    #[tokio::test]
    async fn test_get_missing_is_store_not_found() {
        let service = service();

        let result = service
            .get_user(
                &RequestContext::default(),
                GetUserRequest {
                    id: "missing".to_string(),
                },
            )
            .await;

        assert_eq!(
            result,
            Err(ServiceError::Store(StoreError::CouldNotGet(ErrorKind::NotFound)))
        );
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_keeps_created_at() {
        let service = service();
        let created = create(&service, "John Doe", "john@example.com").await;

        let response = service
            .update_user(
                &RequestContext::default(),
                UpdateUserRequest {
                    id: created.id.clone(),
                    name: "Jane Doe".to_string(),
                    email: "jane@example.com".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(response.user.id, created.id);
        assert_eq!(response.user.name, "Jane Doe");
        assert_eq!(response.user.email, "jane@example.com");
        assert_eq!(response.user.created_at, created.created_at);
        assert!(response.user.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_fails_and_creates_nothing() {
        let service = service();
        let ctx = RequestContext::default();

        let result = service
            .update_user(
                &ctx,
                UpdateUserRequest {
                    id: "missing".to_string(),
                    name: "Jane Doe".to_string(),
                    email: "jane@example.com".to_string(),
                },
            )
            .await;

        assert_eq!(
            result,
            Err(ServiceError::Store(StoreError::CouldNotUpdate(
                ErrorKind::NotFound
            )))
        );
        let listed = service
            .list_users(&ctx, ListUsersRequest::default())
            .await
            .unwrap();
        assert!(listed.users.is_empty());
    }

    #[tokio::test]
    async fn test_delete_then_get_fails() {
        let service = service();
        let ctx = RequestContext::default();
        let created = create(&service, "John Doe", "john@example.com").await;

        service
            .delete_user(
                &ctx,
                DeleteUserRequest {
                    id: created.id.clone(),
                },
            )
            .await
            .unwrap();

        let result = service
            .get_user(&ctx, GetUserRequest { id: created.id })
            .await;
        assert_eq!(
            result,
            Err(ServiceError::Store(StoreError::CouldNotGet(ErrorKind::NotFound)))
        );
    }

    #[tokio::test]
    async fn test_list_returns_all_users() {
        let service = service();
        for i in 0..3 {
            create(&service, &format!("User {i}"), &format!("user{i}@example.com")).await;
        }

        let response = service
            .list_users(&RequestContext::default(), ListUsersRequest::default())
            .await
            .unwrap();

        assert_eq!(response.users.len(), 3);
    }

    #[tokio::test]
    async fn test_cancelled_context_returns_cancelled() {
        let service = UserService::new(Arc::new(HangingStore));
        let ctx = RequestContext::default();
        let canceller = ctx.clone();

        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            canceller.cancel();
        });

        let result = service
            .list_users(&ctx, ListUsersRequest::default())
            .await;

        assert_eq!(result, Err(ServiceError::Cancelled));
    }

    #[tokio::test]
    async fn test_cancelled_context_does_not_write() {
        let store = Arc::new(InMemoryStore::new());
        let service = UserService::new(store.clone());
        let ctx = RequestContext::default();
        ctx.cancel();

        let result = service
            .create_user(
                &ctx,
                CreateUserRequest {
                    name: "John Doe".to_string(),
                    email: "john@example.com".to_string(),
                },
            )
            .await;

        assert_eq!(result, Err(ServiceError::Cancelled));
        assert!(store.list_users().await.unwrap().is_empty());
    }
}
