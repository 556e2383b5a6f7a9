//! Shared types used across all modules.
//!
//! The store, the HTTP handlers and the integration tests all import
//! the record types from here.

pub mod user;

pub use user::{User, UserFields};
