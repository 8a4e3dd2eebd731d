//! HTTP server mode

use crate::error::{Error, Result};
use crate::handler::{router, AppState};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
}

impl ServerConfig {
    /// Listen on all interfaces
    pub fn new(port: u16) -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port,
        }
    }
}

/// Start the HTTP server
pub async fn serve(config: ServerConfig, state: AppState) -> Result<()> {
    let app = router(state);

    let addr = SocketAddr::new(config.host, config.port);
    tracing::info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to port {}: {e}", config.port)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Other(format!("Server error: {e}")))?;

    Ok(())
}
