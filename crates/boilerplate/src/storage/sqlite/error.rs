//! SQLite error mapping.
//!
//! Classifies `tokio_rusqlite::Error` and `rusqlite::Error` into an
//! [`ErrorKind`] and collapses them into the per-operation [`StoreError`]
//! sentinel. The native error is logged here and dropped.

use boilerplate_core::storage::{ErrorKind, Operation, StoreError};

/// Classifies a rusqlite error.
///
/// # Error Mapping
///
/// - `SQLITE_CONSTRAINT_PRIMARYKEY` / `SQLITE_CONSTRAINT_UNIQUE` → `AlreadyExists`
/// - `QueryReturnedNoRows` → `NotFound`
/// - Column decode failures, corrupt database files → `Corrupt`
/// - Busy, locked, unopenable or I/O failures → `Unavailable`
/// - All other errors → `Internal`
fn classify_rusqlite_error(err: &rusqlite::Error) -> ErrorKind {
    match err {
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                || sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            ErrorKind::AlreadyExists
        }

        rusqlite::Error::SqliteFailure(sqlite_err, _) => match sqlite_err.code {
            rusqlite::ErrorCode::CannotOpen
            | rusqlite::ErrorCode::DatabaseBusy
            | rusqlite::ErrorCode::DatabaseLocked
            | rusqlite::ErrorCode::SystemIoFailure
            | rusqlite::ErrorCode::DiskFull
            | rusqlite::ErrorCode::PermissionDenied
            | rusqlite::ErrorCode::ReadOnly => ErrorKind::Unavailable,
            rusqlite::ErrorCode::DatabaseCorrupt | rusqlite::ErrorCode::NotADatabase => {
                ErrorKind::Corrupt
            }
            _ => ErrorKind::Internal,
        },

        rusqlite::Error::QueryReturnedNoRows => ErrorKind::NotFound,

        rusqlite::Error::FromSqlConversionFailure(..)
        | rusqlite::Error::InvalidColumnType(..)
        | rusqlite::Error::Utf8Error(_) => ErrorKind::Corrupt,

        _ => ErrorKind::Internal,
    }
}

/// Classifies a tokio_rusqlite error, unwrapping the inner rusqlite error if present.
fn classify_tokio_rusqlite_error(err: &tokio_rusqlite::Error) -> ErrorKind {
    match err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => classify_rusqlite_error(rusqlite_err),
        tokio_rusqlite::Error::ConnectionClosed | tokio_rusqlite::Error::Close(_) => {
            ErrorKind::Unavailable
        }
        _ => ErrorKind::Internal,
    }
}

/// Maps a tokio_rusqlite error to the sentinel for `operation`.
///
/// This is the main entry point for error mapping in async code. `id` is the
/// user id involved, when the operation has one.
pub fn map_tokio_rusqlite_error(
    err: tokio_rusqlite::Error,
    operation: Operation,
    id: Option<&str>,
) -> StoreError {
    let kind = classify_tokio_rusqlite_error(&err);
    let store_err = StoreError::new(operation, kind);
    let user_id = id.unwrap_or_default();

    match kind {
        ErrorKind::NotFound | ErrorKind::AlreadyExists => {
            tracing::warn!(error = %err, user_id, ?kind, "{store_err}")
        }
        _ => tracing::error!(error = %err, user_id, ?kind, "{store_err}"),
    }

    store_err
}
