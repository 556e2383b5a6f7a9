//! Clap argument types.

use clap::Parser;
use std::path::PathBuf;

use userstore::config::Overrides;

/// In-memory user record service.
#[derive(Parser, Debug)]
#[command(
    name = "userstore",
    version = userstore::constants::VERSION,
    about = "Create, read, update and delete user records over HTTP.",
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server.
    Serve(ServeArgs),

    /// Print version and build information.
    Version,
}

/// Arguments for the `serve` subcommand.
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind (default: 0.0.0.0).
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind (default: 1323).
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Config file to load instead of ./.userstore.toml.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `userstore=trace`. `RUST_LOG` still wins.
    #[arg(long)]
    pub log_level: Option<String>,
}

impl ServeArgs {
    /// The subset of config these flags override.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            host: self.host.clone(),
            port: self.port,
            log_level: self.log_level.clone(),
        }
    }
}
