//! Pure mapping from store error kinds to process exit codes.

use super::ErrorKind;

/// Maps an [`ErrorKind`] to a process exit code.
///
/// Codes follow `sysexits.h` where one fits:
///
/// - `NotFound` -> 2
/// - `AlreadyExists` -> 3
/// - `Unavailable` -> 69 (`EX_UNAVAILABLE`)
/// - `Corrupt` -> 65 (`EX_DATAERR`)
/// - `Internal` -> 70 (`EX_SOFTWARE`)
///
/// # Examples
///
/// ```
/// use boilerplate_core::storage::{error_kind_to_exit_code, ErrorKind};
///
/// assert_eq!(error_kind_to_exit_code(ErrorKind::NotFound), 2);
/// ```
pub fn error_kind_to_exit_code(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::NotFound => 2,
        ErrorKind::AlreadyExists => 3,
        ErrorKind::Unavailable => 69,
        ErrorKind::Corrupt => 65,
        ErrorKind::Internal => 70,
    }
}
