//! CLI module
//!
//! Command-line interface for running the proxy.
//!
//! # Commands
//!
//! - `serve` - Start the HTTP handler
//! - `fetch` - Run one query and print the response envelope
//! - `config` - Print the resolved configuration

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands};
pub use runner::Runner;
pub use server::{serve, ServerConfig};
