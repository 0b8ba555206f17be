//! In-memory storage backend.
//!
//! Keeps users in a `HashMap` for the lifetime of the process. Used by tests
//! and as a scratch backend.

mod repository;

pub use repository::InMemoryStore;
