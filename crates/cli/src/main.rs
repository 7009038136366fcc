//! PVZ CLI - Database migrations and token tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply database migrations
//! pvz-cli migrate
//!
//! # Print a bearer token for a role
//! pvz-cli token employee
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `token` - Print the token the server issues for a role

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "pvz-cli")]
#[command(author, version, about = "PVZ service CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Print the bearer token for a role (`moderator`, `employee`)
    Token {
        /// Role to issue a token for
        role: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Token { role } => {
            let token = commands::token::issue(&role)?;
            #[allow(clippy::print_stdout)]
            {
                println!("{token}");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }
}
