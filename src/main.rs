use anyhow::Result;
use rmcp::{transport::stdio, ServiceExt};
use tracing_subscriber;

mod applicator;
mod error;
mod generator;
mod handlers;
mod models;
mod rate_limit;
mod redis;
mod repository;
mod service;
mod sessions;
mod store;
mod validation;

use crate::service::StrategicInsightService;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing to stderr for MCP compatibility
    tracing_subscriber::fmt()
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let service = StrategicInsightService::new().await?;

    // Start the MCP server on stdio transport
    let server = service.serve(stdio()).await?;

    // This keeps the server running until the transport closes
    server.waiting().await?;

    eprintln!("Server shutting down");
    Ok(())
}
