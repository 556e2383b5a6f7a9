//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables
//! 3. `--config <file>`, or `.userstore.toml` in the working directory
//! 4. `~/.config/userstore/config.toml` (global defaults)
//! 5. Built-in defaults
//!
//! A file layer overrides exactly the keys it sets.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants::{
    CONFIG_DIR, CONFIG_FILENAME, DEFAULT_HOST, DEFAULT_LOG_LEVEL, DEFAULT_PORT, ENV_HOST,
    ENV_LOG, ENV_PORT,
};
use crate::env::Env;

/// Errors during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub log: LogConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// The `host:port` string handed to the listener.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing` filter directive, e.g. `info` or `userstore=debug`.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// One config file as written on disk.
///
/// Every key is optional so a file only overrides what it actually sets,
/// including values equal to the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    server: ServerFile,
    log: LogFile,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ServerFile {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct LogFile {
    level: Option<String>,
}

/// Values supplied on the command line; `None` leaves the loaded value alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration with proper layering.
    ///
    /// `config_file` is an explicit file that must exist. Without one,
    /// `.userstore.toml` in `work_dir` is used if present.
    pub fn load(
        config_file: Option<&Path>,
        work_dir: Option<&Path>,
        env: &Env,
    ) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                config.merge(Self::load_file(&global_path)?);
            }
        }

        match (config_file, work_dir) {
            (Some(path), _) => config.merge(Self::load_file(path)?),
            (None, Some(dir)) => {
                let local_path = dir.join(CONFIG_FILENAME);
                if local_path.exists() {
                    config.merge(Self::load_file(&local_path)?);
                }
            }
            (None, None) => {}
        }

        config.apply_env_vars(env);

        Ok(config)
    }

    /// Load a config from a specific file.
    fn load_file(path: &Path) -> Result<ConfigFile, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR).join("config.toml"))
    }

    /// Merge a file layer into this one; every key the file sets wins.
    fn merge(&mut self, file: ConfigFile) {
        if let Some(host) = file.server.host {
            self.server.host = host;
        }
        if let Some(port) = file.server.port {
            self.server.port = port;
        }
        if let Some(level) = file.log.level {
            self.log.level = level;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_vars(&mut self, env: &Env) {
        if let Some(host) = env.get(ENV_HOST) {
            self.server.host = host;
        }
        if let Some(val) = env.get(ENV_PORT) {
            match val.parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) => eprintln!("Warning: ignoring invalid {ENV_PORT} value: {val}"),
            }
        }
        if let Some(level) = env.get(ENV_LOG) {
            self.log.level = level;
        }
    }

    /// Apply command-line overrides (highest priority).
    pub fn apply_overrides(&mut self, overrides: Overrides) {
        if let Some(host) = overrides.host {
            self.server.host = host;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(level) = overrides.log_level {
            self.log.level = level;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn no_env() -> Env {
        Env::mock(Vec::<(&str, &str)>::new())
    }

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 1323);
        assert_eq!(config.server.addr(), "0.0.0.0:1323");
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[server]
host = "127.0.0.1"
port = 8080

[log]
level = "debug"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn parse_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str("[server]\nport = 9000\n").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.log, LogConfig::default());
    }

    fn file(toml_str: &str) -> ConfigFile {
        toml::from_str(toml_str).unwrap()
    }

    #[test]
    fn merge_applies_every_key_the_file_sets() {
        let mut base = Config::default();
        base.merge(file(
            "[server]\nhost = \"127.0.0.1\"\nport = 8080\n[log]\nlevel = \"warn\"\n",
        ));
        assert_eq!(base.server.host, "127.0.0.1");
        assert_eq!(base.server.port, 8080);
        assert_eq!(base.log.level, "warn");
    }

    #[test]
    fn merge_keeps_base_for_keys_the_file_omits() {
        let mut base = Config::default();
        base.server.port = 4000;
        base.log.level = "debug".to_string();

        base.merge(file("[server]\nhost = \"::1\"\n"));
        assert_eq!(base.server.host, "::1");
        assert_eq!(base.server.port, 4000);
        assert_eq!(base.log.level, "debug");
    }

    #[test]
    fn later_file_can_restore_a_default_value() {
        let mut base = Config::default();
        base.merge(file("[server]\nport = 8080\n[log]\nlevel = \"debug\"\n"));
        base.merge(file("[server]\nport = 1323\n[log]\nlevel = \"info\"\n"));
        assert_eq!(base.server.port, 1323);
        assert_eq!(base.log.level, "info");
    }

    #[test]
    fn load_file_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "not valid {{ toml").unwrap();

        let err = Config::load_file(&path).unwrap_err();
        assert!(err.to_string().contains("parse"));
    }

    #[test]
    fn load_explicit_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");

        let err = Config::load(Some(&missing), None, &no_env()).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }

    #[test]
    fn load_from_work_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".userstore.toml"), "[server]\nport = 7000\n").unwrap();

        let config = Config::load(None, Some(dir.path()), &no_env()).unwrap();
        assert_eq!(config.server.port, 7000);
    }

    #[test]
    fn explicit_file_wins_over_work_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".userstore.toml"), "[server]\nport = 7000\n").unwrap();
        let explicit = dir.path().join("other.toml");
        std::fs::write(&explicit, "[server]\nport = 7100\n").unwrap();

        let config = Config::load(Some(&explicit), Some(dir.path()), &no_env()).unwrap();
        assert_eq!(config.server.port, 7100);
    }

    #[test]
    fn load_without_any_config_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(None, Some(dir.path()), &no_env()).unwrap();
        assert_eq!(config.server.port, 1323);
    }

    #[test]
    fn env_vars_override_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".userstore.toml"), "[server]\nport = 7000\n").unwrap();
        let env = Env::mock([
            ("USERSTORE_PORT", "7500"),
            ("USERSTORE_HOST", "::1"),
            ("USERSTORE_LOG", "trace"),
        ]);

        let config = Config::load(None, Some(dir.path()), &env).unwrap();
        assert_eq!(config.server.port, 7500);
        assert_eq!(config.server.host, "::1");
        assert_eq!(config.log.level, "trace");
    }

    #[test]
    fn invalid_port_env_is_ignored() {
        let env = Env::mock([("USERSTORE_PORT", "not-a-port")]);
        let mut config = Config::default();
        config.apply_env_vars(&env);
        assert_eq!(config.server.port, 1323);
    }

    #[test]
    fn cli_overrides_win() {
        let env = Env::mock([("USERSTORE_PORT", "7500")]);
        let mut config = Config::load(None, None, &env).unwrap();
        config.apply_overrides(Overrides {
            host: None,
            port: Some(9999),
            log_level: Some("debug".to_string()),
        });
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.log.level, "debug");
    }
}
