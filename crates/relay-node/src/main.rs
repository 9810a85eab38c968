//! # Journal Relay Node
//!
//! The main entry point for the journal relay service.
//!
//! ## Startup Sequence
//!
//! 1. Initialize tracing (EnvFilter, `RUST_LOG`, default `info`)
//! 2. Load configuration from the environment
//! 3. Fail fast if required values are missing (the error lists every
//!    missing name)
//! 4. Construct the backend and HTTP router
//! 5. Bind and serve until ctrl-c

use anyhow::{Context, Result};
use relay_gateway::{GatewayConfig, GatewayService, VERSION};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!(version = VERSION, "starting journal relay");

    let config = GatewayConfig::from_env().context("failed to load configuration")?;

    let service = GatewayService::new(config).context("failed to construct gateway")?;
    service.start().await.context("gateway terminated")?;

    info!("journal relay stopped");
    Ok(())
}
