//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to the per-operation [`StoreError`] sentinels from
//! `boilerplate_core::storage`. The SDK error is logged here with the user id
//! and then dropped.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use boilerplate_core::storage::{ErrorKind, Operation, StoreError};

/// Error codes DynamoDB uses for throttled requests that have no modeled variant.
const THROTTLING_CODES: &[&str] = &["ThrottlingException", "Throttling"];

fn is_throttling(code: Option<&str>) -> bool {
    code.is_some_and(|c| THROTTLING_CODES.contains(&c))
}

/// Classifies an SDK error, delegating modeled service errors to `service_kind`.
///
/// Transport failures and timeouts are `Unavailable`; anything the SDK could
/// not even send or parse is `Internal`.
fn classify<E, R>(err: &SdkError<E, R>, service_kind: impl FnOnce(&E) -> ErrorKind) -> ErrorKind
where
    E: ProvideErrorMetadata,
{
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => ErrorKind::Unavailable,
        SdkError::ServiceError(service) => {
            let e = service.err();
            match service_kind(e) {
                ErrorKind::Internal if is_throttling(e.code()) => ErrorKind::Unavailable,
                kind => kind,
            }
        }
        _ => ErrorKind::Internal,
    }
}

/// Builds the sentinel and logs the native error next to it.
fn report<E, R>(
    err: &SdkError<E, R>,
    operation: Operation,
    kind: ErrorKind,
    user_id: Option<&str>,
) -> StoreError
where
    E: std::error::Error + 'static,
    R: Debug,
{
    let store_err = StoreError::new(operation, kind);
    let user_id = user_id.unwrap_or_default();
    let error = DisplayErrorContext(err);

    match kind {
        ErrorKind::NotFound | ErrorKind::AlreadyExists => {
            tracing::warn!(%error, user_id, ?kind, "{store_err}")
        }
        _ => tracing::error!(%error, user_id, ?kind, "{store_err}"),
    }

    store_err
}

/// Map a PutItem SDK error. A failed `attribute_not_exists(PK)` means the id is taken.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
    user_id: &str,
) -> StoreError {
    let kind = classify(&err, |e| match e {
        PutItemError::ConditionalCheckFailedException(_) => ErrorKind::AlreadyExists,
        PutItemError::ProvisionedThroughputExceededException(_)
        | PutItemError::RequestLimitExceeded(_)
        | PutItemError::InternalServerError(_)
        | PutItemError::ResourceNotFoundException(_) => ErrorKind::Unavailable,
        _ => ErrorKind::Internal,
    });
    report(&err, Operation::Create, kind, Some(user_id))
}

/// Map a GetItem SDK error.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
    user_id: &str,
) -> StoreError {
    let kind = classify(&err, |e| match e {
        GetItemError::ProvisionedThroughputExceededException(_)
        | GetItemError::RequestLimitExceeded(_)
        | GetItemError::InternalServerError(_)
        | GetItemError::ResourceNotFoundException(_) => ErrorKind::Unavailable,
        _ => ErrorKind::Internal,
    });
    report(&err, Operation::Get, kind, Some(user_id))
}

/// Map an UpdateItem SDK error. A failed `attribute_exists(PK)` means there is nothing to update.
pub fn map_update_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<UpdateItemError, R>,
    user_id: &str,
) -> StoreError {
    let kind = classify(&err, |e| match e {
        UpdateItemError::ConditionalCheckFailedException(_) => ErrorKind::NotFound,
        UpdateItemError::ProvisionedThroughputExceededException(_)
        | UpdateItemError::RequestLimitExceeded(_)
        | UpdateItemError::InternalServerError(_)
        | UpdateItemError::ResourceNotFoundException(_) => ErrorKind::Unavailable,
        _ => ErrorKind::Internal,
    });
    report(&err, Operation::Update, kind, Some(user_id))
}

/// Map a DeleteItem SDK error. A failed `attribute_exists(PK)` means there is nothing to delete.
pub fn map_delete_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteItemError, R>,
    user_id: &str,
) -> StoreError {
    let kind = classify(&err, |e| match e {
        DeleteItemError::ConditionalCheckFailedException(_) => ErrorKind::NotFound,
        DeleteItemError::ProvisionedThroughputExceededException(_)
        | DeleteItemError::RequestLimitExceeded(_)
        | DeleteItemError::InternalServerError(_)
        | DeleteItemError::ResourceNotFoundException(_) => ErrorKind::Unavailable,
        _ => ErrorKind::Internal,
    });
    report(&err, Operation::Delete, kind, Some(user_id))
}

/// Map a Query SDK error.
pub fn map_query_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<QueryError, R>,
) -> StoreError {
    let kind = classify(&err, |e| match e {
        QueryError::ProvisionedThroughputExceededException(_)
        | QueryError::RequestLimitExceeded(_)
        | QueryError::InternalServerError(_)
        | QueryError::ResourceNotFoundException(_) => ErrorKind::Unavailable,
        _ => ErrorKind::Internal,
    });
    report(&err, Operation::List, kind, None)
}
