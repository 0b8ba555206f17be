use boilerplate_core::context::Cancelled;
use boilerplate_core::storage::{error_kind_to_exit_code, StoreError};
use thiserror::Error;

/// Exit code for a call aborted by its context (128 + SIGINT).
pub const CANCELLED_EXIT_CODE: u8 = 130;

/// Errors returned by [`UserService`](super::UserService).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ServiceError {
    /// The store rejected or failed the call. Displays as the store sentinel.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The request context was cancelled before the store answered.
    #[error("request cancelled")]
    Cancelled,
}

impl From<Cancelled> for ServiceError {
    fn from(_: Cancelled) -> Self {
        Self::Cancelled
    }
}

impl ServiceError {
    /// Returns the underlying store error, if any.
    pub fn store_error(&self) -> Option<&StoreError> {
        match self {
            Self::Store(err) => Some(err),
            Self::Cancelled => None,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Store(err) => error_kind_to_exit_code(err.kind()),
            Self::Cancelled => CANCELLED_EXIT_CODE,
        }
    }
}

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use boilerplate_core::storage::ErrorKind;

    #[test]
    fn test_store_error_display_is_sentinel() {
        let err = ServiceError::from(StoreError::CouldNotGet(ErrorKind::NotFound));

        assert_eq!(err.to_string(), "could not get user");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            ServiceError::Store(StoreError::CouldNotGet(ErrorKind::NotFound)).exit_code(),
            2
        );
        assert_eq!(
            ServiceError::Store(StoreError::CouldNotCreate(ErrorKind::AlreadyExists)).exit_code(),
            3
        );
        assert_eq!(ServiceError::Cancelled.exit_code(), 130);
    }

    #[test]
    fn test_cancelled_has_no_store_error() {
        assert_eq!(ServiceError::from(Cancelled).store_error(), None);
    }
}
