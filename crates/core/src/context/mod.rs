//! Request-scoped context passed explicitly through every service call.

mod types;

pub use types::{Cancelled, RequestContext, RequestId};
