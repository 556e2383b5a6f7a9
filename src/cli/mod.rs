//! CLI command definitions and argument parsing.
//!
//! Uses clap derive macros for ergonomic argument definitions.

pub mod args;

use colored::Colorize;

/// Print the startup line to stderr once the listener is bound.
pub fn print_listening(addr: &std::net::SocketAddr) {
    eprintln!(
        "  {} {} listening on {}",
        "✔".green().bold(),
        userstore::constants::APP_NAME.bold(),
        format!("http://{addr}").cyan(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_listening_does_not_panic() {
        print_listening(&"127.0.0.1:1323".parse().unwrap());
    }
}
