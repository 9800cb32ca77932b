//! Foundation types for Bookchain.
//!
//! Every other Bookchain crate depends on `bookchain-types`.
//!
//! # Key Types
//!
//! - [`Digest`]: 32-byte SHA-256 output, hex on the wire
//! - [`Checkout`]: the book borrowing event carried by each block
//! - [`Book`] / [`NewBook`] / [`BookId`]: book metadata with a content-derived identifier
//! - [`Timestamp`]: textual wall-clock snapshot embedded in block digests

pub mod book;
pub mod checkout;
pub mod digest;
pub mod error;
pub mod timestamp;

pub use book::{Book, BookId, NewBook};
pub use checkout::Checkout;
pub use digest::Digest;
pub use error::TypeError;
pub use timestamp::Timestamp;
