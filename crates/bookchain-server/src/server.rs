use std::sync::Arc;

use bookchain_ledger::{InMemoryLedger, LedgerReader};
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// Bookchain HTTP server owning the process's ledger.
pub struct BookchainServer {
    state: AppState,
}

impl BookchainServer {
    /// Server with a fresh ledger.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        Ok(Self {
            state: AppState::with_genesis(config)?,
        })
    }

    /// Server around an existing ledger.
    pub fn with_ledger(config: ServerConfig, ledger: Arc<InMemoryLedger>) -> Self {
        Self {
            state: AppState::new(config, ledger),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.state.config
    }

    pub fn ledger(&self) -> &Arc<InMemoryLedger> {
        &self.state.ledger
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone())
    }

    /// Serve until Ctrl-C; the ledger is discarded on return.
    pub async fn serve(self) -> ServerResult<()> {
        for block in self.state.ledger.snapshot()? {
            tracing::debug!(
                position = block.position(),
                digest = %block.digest(),
                previous = ?block.previous_digest(),
                "initial chain"
            );
        }

        let bind_addr = self.state.config.bind_addr;
        let listener = TcpListener::bind(bind_addr).await?;
        tracing::info!(
            %bind_addr,
            append_mode = %self.state.config.append_mode,
            "bookchain server listening"
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;

        tracing::info!("bookchain server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
