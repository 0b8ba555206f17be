use thiserror::Error;

/// Classification of a store failure.
///
/// Carried by every [`StoreError`] so callers can tell a missing record from an
/// unreachable backend without seeing the backend's own error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The record does not exist.
    NotFound,
    /// A record with the same id already exists.
    AlreadyExists,
    /// The backend could not be reached, timed out or throttled the call.
    Unavailable,
    /// A stored record could not be decoded.
    Corrupt,
    /// Any other backend failure.
    Internal,
}

/// The store operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Get,
    Update,
    Delete,
    List,
}

/// Errors returned by a [`UserStore`](super::UserStore).
///
/// There is exactly one variant per operation. The variant is the error's
/// identity; the backend's native error is logged where it happens and is not
/// carried here.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    #[error("could not create user")]
    CouldNotCreate(ErrorKind),
    #[error("could not get user")]
    CouldNotGet(ErrorKind),
    #[error("could not update user")]
    CouldNotUpdate(ErrorKind),
    #[error("could not delete user")]
    CouldNotDelete(ErrorKind),
    #[error("could not list users")]
    CouldNotList(ErrorKind),
}

impl StoreError {
    /// Builds the sentinel for `operation` with the given classification.
    pub fn new(operation: Operation, kind: ErrorKind) -> Self {
        match operation {
            Operation::Create => Self::CouldNotCreate(kind),
            Operation::Get => Self::CouldNotGet(kind),
            Operation::Update => Self::CouldNotUpdate(kind),
            Operation::Delete => Self::CouldNotDelete(kind),
            Operation::List => Self::CouldNotList(kind),
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            Self::CouldNotCreate(_) => Operation::Create,
            Self::CouldNotGet(_) => Operation::Get,
            Self::CouldNotUpdate(_) => Operation::Update,
            Self::CouldNotDelete(_) => Operation::Delete,
            Self::CouldNotList(_) => Operation::List,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CouldNotCreate(kind)
            | Self::CouldNotGet(kind)
            | Self::CouldNotUpdate(kind)
            | Self::CouldNotDelete(kind)
            | Self::CouldNotList(kind) => *kind,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_already_exists(&self) -> bool {
        self.kind() == ErrorKind::AlreadyExists
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
