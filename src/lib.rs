//! userstore — in-memory user records over HTTP (library crate).
//!
//! Re-exports public modules for the binary and integration tests.

pub mod config;
pub mod constants;
pub mod env;
pub mod logging;
pub mod models;
pub mod server;
pub mod store;
