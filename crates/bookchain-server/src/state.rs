use std::sync::Arc;

use bookchain_ledger::InMemoryLedger;

use crate::config::ServerConfig;
use crate::error::ServerResult;

/// Shared application state passed to axum handlers.
///
/// The ledger is created once per process and handed to every handler through
/// this handle; dropping the last clone discards the chain.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<InMemoryLedger>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// State around an existing ledger.
    pub fn new(config: ServerConfig, ledger: Arc<InMemoryLedger>) -> Self {
        Self {
            ledger,
            config: Arc::new(config),
        }
    }

    /// State around a fresh ledger holding only its genesis block.
    pub fn with_genesis(config: ServerConfig) -> ServerResult<Self> {
        let ledger = InMemoryLedger::new()?;
        Ok(Self::new(config, Arc::new(ledger)))
    }
}
