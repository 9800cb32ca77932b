//! Cryptographic primitives for Bookchain.
//!
//! Provides SHA-256 hashing over concatenated parts and MD5 content-derived
//! book identifiers.
//!
//! All crypto operations wrap established libraries; no custom cryptography.

pub mod hasher;

pub use hasher::{book_id, ContentHasher};
