//! Core types for the connect-boilerplate user service.
//!
//! Everything in this crate is I/O free: the `User` entity and its request and
//! response shapes, the [`storage::UserStore`] contract every backend
//! implements, and the per-call [`context::RequestContext`].

pub mod context;
pub mod storage;
pub mod user;
