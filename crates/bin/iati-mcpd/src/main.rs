//! Daemon entry point for the IATI MCP server.
//!
//! Loads configuration from CLI arguments and the environment, initializes
//! logging on stderr, and serves the MCP protocol over stdio, streamable HTTP,
//! or both.

mod config;

use iati_core::control::IatiControlPlane;
use iati_mcp::server::{serve_stdio, serve_streamable_http};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{IatiConfig, Transport};

fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_ansi(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = IatiConfig::from_args()?;
    init_logging(&config.log_filter);

    if config.upstream.uses_dev_key() {
        warn!("IATI_API_KEY is not set; using the development subscription key");
    }
    info!(base_url = %config.upstream.base_url, "using IATI datastore");

    let control = IatiControlPlane::new(config.upstream);
    match config.transport {
        Transport::Stdio => serve_stdio(control).await?,
        Transport::Http => serve_streamable_http(control, config.http).await?,
        Transport::Both => {
            let http = tokio::spawn(serve_streamable_http(control.clone(), config.http));
            let result = serve_stdio(control).await;
            http.abort();
            result?;
        }
    }
    Ok(())
}
