//! Gateway service - construction and serve loop.
//!
//! Validates configuration, selects the backend, builds the router, binds,
//! and serves until ctrl-c.

use crate::adapters::{LedgerBackend, MemoryBackend};
use crate::domain::config::{BackendMode, GatewayConfig};
use crate::domain::error::GatewayError;
use crate::router::{build_router, AppState};
use axum::Router;
use std::sync::Arc;
use tracing::info;

/// The assembled relay service.
pub struct GatewayService {
    config: GatewayConfig,
    state: AppState,
}

impl GatewayService {
    /// Validate configuration and construct the active backend.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        config.validate()?;

        let backend: Arc<dyn crate::ports::outbound::JournalBackend> = match config.mode {
            BackendMode::Memory => {
                info!("using in-memory backend, entries are process-lifetime only");
                Arc::new(MemoryBackend::new())
            }
            BackendMode::Ledger => {
                let ledger_config = config.ledger.as_ref().ok_or_else(|| {
                    GatewayError::Backend("ledger mode without ledger config".to_string())
                })?;
                let backend = LedgerBackend::new(ledger_config)?;
                info!(
                    network = %ledger_config.network,
                    rpc_url = %ledger_config.rpc_url,
                    "using ledger backend"
                );
                Arc::new(backend)
            }
        };

        Ok(Self {
            config,
            state: AppState { backend },
        })
    }

    /// The configured router, exposed for in-process testing.
    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Bind and serve until ctrl-c.
    pub async fn start(self) -> Result<(), GatewayError> {
        let addr = self.config.http_addr();
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Bind(format!("{addr}: {e}")))?;
        info!(addr = %addr, "starting HTTP server");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                info!("shutdown signal received");
            })
            .await
            .map_err(|e| GatewayError::Serve(e.to_string()))
    }
}
