use bookchain_types::Checkout;

use crate::block::Block;
use crate::error::LedgerError;

/// Write boundary for ledger append operations.
pub trait LedgerWriter: Send + Sync {
    /// Build a block for `checkout` after the current tail and append it if valid.
    fn append(&self, checkout: Checkout) -> Result<Block, LedgerError>;

    /// Validate a caller-built block against the current tail and append it.
    fn append_block(&self, candidate: Block) -> Result<Block, LedgerError>;
}

/// Read boundary for ledger queries.
pub trait LedgerReader: Send + Sync {
    /// Owned copy of every block, genesis first.
    fn snapshot(&self) -> Result<Vec<Block>, LedgerError>;

    fn tail(&self) -> Result<Block, LedgerError>;

    fn get(&self, position: u64) -> Result<Option<Block>, LedgerError>;

    fn block_count(&self) -> Result<u64, LedgerError>;
}
