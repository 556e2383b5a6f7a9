//! App-wide constants.
//!
//! Centralises the tool name, config paths, environment variable names,
//! and listener defaults so a rename only requires changing this file.

/// Display name of the service (lowercase).
pub const APP_NAME: &str = "userstore";

/// Crate version, as reported by `userstore version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Target triple the binary was built for (set by `build.rs`).
pub const TARGET: &str = env!("TARGET");

/// Local config filename (e.g. `.userstore.toml` in the working directory).
pub const CONFIG_FILENAME: &str = ".userstore.toml";

/// Directory name under `~/.config/` for global config.
pub const CONFIG_DIR: &str = "userstore";

/// Address the listener binds to when nothing else is configured.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Port the listener binds to when nothing else is configured.
pub const DEFAULT_PORT: u16 = 1323;

/// Log level used when neither `RUST_LOG` nor config specify one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// ── Response messages ───────────────────────────────────────────────

pub const MSG_NOT_FOUND: &str = "User not found";
pub const MSG_DELETED: &str = "User deleted";
pub const MSG_ROOT: &str = "Hello, World!";

// ── Environment variable names ──────────────────────────────────────

pub const ENV_HOST: &str = "USERSTORE_HOST";
pub const ENV_PORT: &str = "USERSTORE_PORT";
pub const ENV_LOG: &str = "USERSTORE_LOG";
