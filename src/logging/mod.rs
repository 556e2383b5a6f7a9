//! `tracing` subscriber setup.
//!
//! `RUST_LOG` wins when set; otherwise the configured level is used. An
//! unparsable directive falls back to the default level rather than
//! aborting startup.

use tracing_subscriber::EnvFilter;

use crate::constants::DEFAULT_LOG_LEVEL;
use crate::env::Env;

/// Install the global fmt subscriber. Safe to call more than once.
pub fn init(level: &str, env: &Env) {
    let filter = build_filter(env.get(EnvFilter::DEFAULT_ENV).as_deref(), level);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn build_filter(rust_log: Option<&str>, level: &str) -> EnvFilter {
    rust_log
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .or_else(|| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_level_used_without_rust_log() {
        assert_eq!(build_filter(None, "debug").to_string(), "debug");
    }

    #[test]
    fn rust_log_takes_precedence() {
        assert_eq!(
            build_filter(Some("userstore=trace"), "warn").to_string(),
            "userstore=trace"
        );
    }

    #[test]
    fn invalid_level_falls_back_to_default() {
        assert_eq!(build_filter(None, "userstore=notalevel").to_string(), "info");
    }

    #[test]
    fn init_twice_does_not_panic() {
        let env = Env::mock(Vec::<(&str, &str)>::new());
        init("info", &env);
        init("debug", &env);
    }
}
