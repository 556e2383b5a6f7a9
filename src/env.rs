//! Environment variable abstraction for testability.
//!
//! The server reads its overrides through [`Env::real()`]; config tests
//! build an [`Env::mock()`] instead so they never touch the process
//! environment (and never need `unsafe` `set_var` calls).

use std::collections::HashMap;

/// Environment variable reader.
#[derive(Clone, Debug, Default)]
pub struct Env {
    overrides: Option<HashMap<String, String>>,
}

impl Env {
    /// Read from the real process environment.
    pub fn real() -> Self {
        Self { overrides: None }
    }

    /// Read only from the given key-value pairs.
    #[cfg(test)]
    pub fn mock(vars: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Self {
        Self {
            overrides: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Look up a variable, treating empty values as unset.
    pub fn get(&self, name: &str) -> Option<String> {
        let value = match &self.overrides {
            Some(map) => map.get(name).cloned(),
            None => std::env::var(name).ok(),
        };
        value.filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_env_reads_cargo_manifest_dir() {
        assert!(Env::real().get("CARGO_MANIFEST_DIR").is_some());
    }

    #[test]
    fn mock_env_returns_set_values() {
        let env = Env::mock([("USERSTORE_PORT", "8080"), ("USERSTORE_HOST", "127.0.0.1")]);
        assert_eq!(env.get("USERSTORE_PORT").as_deref(), Some("8080"));
        assert_eq!(env.get("USERSTORE_HOST").as_deref(), Some("127.0.0.1"));
    }

    #[test]
    fn mock_env_missing_and_empty_are_unset() {
        let env = Env::mock([("EMPTY", "")]);
        assert!(env.get("EMPTY").is_none());
        assert!(env.get("NONEXISTENT").is_none());
    }
}
