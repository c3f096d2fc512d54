//! Unified haven CLI.
//!
//! This binary provides a unified interface to the Haven engagement
//! backend:
//! - `haven serve` - Run the HTTP API server
//!
//! The server can also be run as the standalone `haven-api` binary.

use std::process::ExitCode;

use clap::{Parser, Subcommand};

/// Haven unified CLI.
#[derive(Parser)]
#[command(
    name = "haven",
    version,
    about = "Haven engagement backend: usage quotas, leaderboards, and matchmaking",
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server.
    #[command(name = "serve", alias = "server")]
    Serve(Box<haven_api::ApiArgs>),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(args) => haven_api::cli::run(*args).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
