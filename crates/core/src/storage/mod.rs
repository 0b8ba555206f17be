mod error;
mod exit_code;
mod traits;

pub use error::{ErrorKind, Operation, Result, StoreError};
pub use exit_code::error_kind_to_exit_code;
pub use traits::UserStore;
