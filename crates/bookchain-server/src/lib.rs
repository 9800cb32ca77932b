//! HTTP server for Bookchain.
//!
//! Exposes the checkout ledger over a small JSON API:
//!
//! - `GET /`: the full chain
//! - `POST /`: append a checkout
//! - `POST /new`: register a book under a content-derived identifier
//! - `GET /v1/health`, `GET /v1/info`, `GET /v1/verify`

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use config::{AppendMode, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use server::BookchainServer;
pub use state::AppState;
