//! Append-only checkout ledger for Bookchain.
//!
//! This crate is the heart of Bookchain. It provides:
//! - [`Block`] with its digest computation over position, timestamp, payload and link
//! - [`ChainValidator`] extension rules and whole-chain reports
//! - `LedgerWriter` / `LedgerReader` trait boundaries
//! - [`InMemoryLedger`], the single-writer, many-reader ledger the server owns

pub mod block;
pub mod error;
pub mod memory;
pub mod traits;
pub mod validation;

pub use block::{compute_digest, digest_input, Block};
pub use error::{LedgerError, Rejection};
pub use memory::InMemoryLedger;
pub use traits::{LedgerReader, LedgerWriter};
pub use validation::{ChainValidator, ValidationReport, Violation, ViolationKind};
