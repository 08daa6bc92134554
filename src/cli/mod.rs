//! CLI module - Command-line interface for the REST API server

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// restapi - Person and Book REST API with JWT authentication
#[derive(Parser)]
#[command(name = "restapi")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config.toml (otherwise the usual locations are searched)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server (default)
    #[command(alias = "daemon")]
    Serve,

    /// Create default config file with a fresh JWT secret
    #[command(alias = "--init")]
    Init,

    /// Print an Argon2id hash for seeding a user
    HashPassword {
        /// Plain-text password to hash
        password: String,
    },
}
