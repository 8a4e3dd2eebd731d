//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Read-only Airtable proxy
#[derive(Parser, Debug)]
#[command(name = "airtable-proxy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Load environment variables from this file instead of `.env`
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP handler
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Fetch all matching records once and print the response envelope
    Fetch {
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Print the resolved configuration (API key redacted)
    Config,
}
