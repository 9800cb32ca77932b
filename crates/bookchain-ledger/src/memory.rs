use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use bookchain_types::{Checkout, Timestamp};

use crate::block::Block;
use crate::error::{LedgerError, Rejection};
use crate::traits::{LedgerReader, LedgerWriter};
use crate::validation::{ChainValidator, ValidationReport};

/// The process-wide checkout ledger.
///
/// Appends hold the write lock from reading the tail until the new block is
/// pushed, so two appends can never extend the same predecessor. Readers take
/// the read lock and copy out; they only ever see fully built blocks.
pub struct InMemoryLedger {
    inner: RwLock<Vec<Block>>,
}

impl InMemoryLedger {
    /// Create a ledger holding a freshly built genesis block.
    pub fn new() -> Result<Self, LedgerError> {
        let genesis = Block::genesis(Timestamp::now())?;
        tracing::debug!(digest = %genesis.digest(), "created genesis block");
        Ok(Self {
            inner: RwLock::new(vec![genesis]),
        })
    }

    /// Whole-chain validation over a snapshot.
    pub fn validate(&self) -> Result<ValidationReport, LedgerError> {
        let blocks = self.read()?;
        Ok(ChainValidator::validate_chain(&blocks))
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Block>>, LedgerError> {
        self.inner.read().map_err(|_| LedgerError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Block>>, LedgerError> {
        self.inner.write().map_err(|_| LedgerError::LockPoisoned)
    }

    fn extend(blocks: &mut Vec<Block>, candidate: Block) -> Result<Block, LedgerError> {
        let tail = blocks.last().ok_or(LedgerError::EmptyLedger)?;
        if let Err(rejection) = ChainValidator::check_extension(&candidate, tail) {
            tracing::warn!(
                position = candidate.position(),
                tail = tail.position(),
                %rejection,
                "rejected candidate block"
            );
            return Err(rejection.into());
        }

        tracing::debug!(
            position = candidate.position(),
            digest = %candidate.digest(),
            "appended block"
        );
        blocks.push(candidate.clone());
        Ok(candidate)
    }
}

impl LedgerWriter for InMemoryLedger {
    fn append(&self, checkout: Checkout) -> Result<Block, LedgerError> {
        if checkout.is_genesis {
            tracing::warn!(book_id = %checkout.book_id, "refused genesis-flagged checkout");
            return Err(Rejection::GenesisPayload.into());
        }

        let mut blocks = self.write()?;
        let tail = blocks.last().ok_or(LedgerError::EmptyLedger)?;
        let candidate = Block::next(tail, checkout, Timestamp::now())?;
        Self::extend(&mut blocks, candidate)
    }

    fn append_block(&self, candidate: Block) -> Result<Block, LedgerError> {
        if candidate.payload().is_genesis {
            return Err(Rejection::GenesisPayload.into());
        }

        let mut blocks = self.write()?;
        Self::extend(&mut blocks, candidate)
    }
}

impl LedgerReader for InMemoryLedger {
    fn snapshot(&self) -> Result<Vec<Block>, LedgerError> {
        Ok(self.read()?.clone())
    }

    fn tail(&self) -> Result<Block, LedgerError> {
        self.read()?.last().cloned().ok_or(LedgerError::EmptyLedger)
    }

    fn get(&self, position: u64) -> Result<Option<Block>, LedgerError> {
        let blocks = self.read()?;
        Ok(usize::try_from(position)
            .ok()
            .and_then(|index| blocks.get(index))
            .cloned())
    }

    fn block_count(&self) -> Result<u64, LedgerError> {
        Ok(self.read()?.len() as u64)
    }
}
