//! User service with pluggable storage.
//!
//! The [`service::UserService`] forwards to any
//! [`UserStore`](boilerplate_core::storage::UserStore); [`config::Config`]
//! picks the backend at runtime from [`storage`].

pub mod cli;
pub mod config;
pub mod logging;
pub mod output;
pub mod service;
pub mod storage;
