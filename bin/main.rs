//! X Search MCP Server entry point.

use anyhow::Result;
use rmcp::{transport::stdio, ServiceExt};
use tracing_subscriber::{self, EnvFilter};

use x_search::{Server, XaiConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be loaded before the environment is read.
    dotenvy::dotenv().ok();

    // Logging to stderr only (stdout is reserved for MCP protocol).
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = XaiConfig::from_env();
    if !config.is_configured() {
        tracing::warn!("XAI_API_KEY/GROK_API_KEY not set; tool calls will report the missing configuration");
    }
    tracing::info!(model = %config.model, base = %config.api_base, "Starting X Search MCP Server");

    let service = Server::new(config).serve(stdio()).await?;
    service.waiting().await?;

    tracing::info!("X Search MCP Server stopped");
    Ok(())
}
