/// Errors produced by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("block rejected: {0}")]
    Rejected(#[from] Rejection),

    #[error("ledger lock poisoned")]
    LockPoisoned,

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("ledger has no genesis block")]
    EmptyLedger,

    #[error("position overflow after {0}")]
    PositionOverflow(u64),
}

/// Why a candidate block may not extend the chain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("previous digest of block {position} does not match its predecessor")]
    BrokenLink { position: u64 },

    #[error("stored digest of block {position} does not match its content")]
    DigestMismatch { position: u64 },

    #[error("expected position {expected}, got {actual}")]
    PositionGap { expected: u64, actual: u64 },

    #[error("genesis payloads are created by the ledger, not appended")]
    GenesisPayload,
}

impl From<bookchain_types::TypeError> for LedgerError {
    fn from(err: bookchain_types::TypeError) -> Self {
        Self::Serialization(err.to_string())
    }
}
