//! userstore — in-memory user record service.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use userstore::config;
use userstore::constants;
use userstore::env;
use userstore::logging;
use userstore::server;
use userstore::store;

use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use cli::args::{Cli, Command, ServeArgs};
use config::Config;
use env::Env;
use store::UserStore;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => run_serve(args).await,
        Command::Version => run_version(),
    }
}

/// Print detailed version and build information.
fn run_version() -> Result<()> {
    use colored::Colorize;

    println!(
        "{} {}",
        constants::APP_NAME.bold(),
        constants::VERSION.green().bold()
    );
    println!("{}     {}", "target:".dimmed(), constants::TARGET);
    Ok(())
}

/// Load config, bind the listener and serve until a shutdown signal.
async fn run_serve(args: ServeArgs) -> Result<()> {
    let env = Env::real();
    let work_dir = std::env::current_dir().context("failed to resolve working directory")?;

    let mut config = Config::load(args.config.as_deref(), Some(&work_dir), &env)
        .context("failed to load configuration")?;
    config.apply_overrides(args.overrides());

    logging::init(&config.log.level, &env);
    tracing::debug!(?config, "configuration loaded");

    let listener = server::bind(&config.server)
        .await
        .with_context(|| format!("failed to bind {}", config.server.addr()))?;
    let local_addr = listener
        .local_addr()
        .context("failed to read bound address")?;
    tracing::info!(addr = %local_addr, "listening");
    cli::print_listening(&local_addr);

    let store = Arc::new(UserStore::new());
    server::serve(listener, Arc::clone(&store), server::shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!(records = store.len(), "server stopped; discarding in-memory records");
    Ok(())
}
