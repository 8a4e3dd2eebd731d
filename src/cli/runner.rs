//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::cli::server::{serve, ServerConfig};
use crate::config::ProxyConfig;
use crate::error::{Error, Result};
use crate::handler::{run_query, AppState, ErrorResponse};
use serde::Serialize;
use tracing::{error, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        self.load_env()?;

        match &self.cli.command {
            Commands::Serve { port } => self.serve(*port).await,
            Commands::Fetch { pretty } => self.fetch(*pretty).await,
            Commands::Config => self.show_config(),
        }
    }

    /// Seed the process environment from a dotenv file
    ///
    /// An explicit `--env-file` must exist; the default `.env` is optional.
    fn load_env(&self) -> Result<()> {
        match &self.cli.env_file {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| {
                    Error::config(format!("Failed to load {}: {e}", path.display()))
                })?;
                info!("Loaded environment from {}", path.display());
            }
            None => {
                if let Ok(path) = dotenvy::dotenv() {
                    info!("Loaded environment from {}", path.display());
                }
            }
        }
        Ok(())
    }

    async fn serve(&self, port: u16) -> Result<()> {
        let config = ProxyConfig::from_env();
        match &config {
            Ok(config) => info!(
                base = %config.base_id,
                table = %config.query.table_id,
                "Proxy configured"
            ),
            Err(e) => error!("Proxy is not configured, requests will fail: {e}"),
        }

        serve(ServerConfig::new(port), AppState::from_result(config)).await
    }

    async fn fetch(&self, pretty: bool) -> Result<()> {
        let result = match ProxyConfig::from_env() {
            Ok(config) => run_query(&config).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(response) => print_json(&response, pretty),
            Err(e) => {
                print_json(&ErrorResponse::from_error(&e), pretty)?;
                Err(e)
            }
        }
    }

    fn show_config(&self) -> Result<()> {
        let config = ProxyConfig::from_env()?;
        print_json(&config.redacted(), true)
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let output = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{output}");
    Ok(())
}
