use axum::body::Bytes;
use axum::extract::State;
use axum::response::Json;
use bookchain_ledger::{Block, LedgerError, LedgerReader, LedgerWriter, ValidationReport};
use bookchain_types::{Book, Checkout, Digest, NewBook};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::AppendMode;
use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub block_count: u64,
    pub tail_digest: Digest,
    pub append_mode: AppendMode,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub valid: bool,
    #[serde(flatten)]
    pub report: ValidationReport,
}

/// GET /: every block, genesis first.
pub async fn list_chain(State(state): State<AppState>) -> ServerResult<Json<Vec<Block>>> {
    Ok(Json(state.ledger.snapshot()?))
}

/// POST /: append one checkout and echo it back.
pub async fn append_checkout(
    State(state): State<AppState>,
    body: Bytes,
) -> ServerResult<Json<Checkout>> {
    let mode = state.config.append_mode;
    let checkout: Checkout = decode_body(&body)?;

    match state.ledger.append(checkout.clone()) {
        Ok(block) => {
            tracing::info!(
                position = block.position(),
                book_id = %checkout.book_id,
                user = %checkout.user,
                "checkout recorded"
            );
            Ok(Json(checkout))
        }
        Err(LedgerError::Rejected(rejection)) if mode == AppendMode::Lenient => {
            tracing::warn!(%rejection, "checkout not recorded");
            Ok(Json(checkout))
        }
        Err(err) => Err(err.into()),
    }
}

/// POST /new: derive a book's identifier from its ISBN and publish date.
pub async fn new_book(body: Bytes) -> ServerResult<Json<Book>> {
    let new_book: NewBook = decode_body(&body)?;
    let id = bookchain_crypto::book_id(&new_book.isbn, &new_book.publish_date);
    tracing::debug!(%id, isbn = %new_book.isbn, "created book");
    Ok(Json(new_book.into_book(id)))
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Info handler.
pub async fn info_handler(State(state): State<AppState>) -> ServerResult<Json<InfoResponse>> {
    let tail = state.ledger.tail()?;
    Ok(Json(InfoResponse {
        name: "bookchain-server",
        version: env!("CARGO_PKG_VERSION"),
        block_count: tail.position() + 1,
        tail_digest: tail.digest(),
        append_mode: state.config.append_mode,
    }))
}

/// GET /v1/verify: whole-chain validation report.
pub async fn verify_handler(State(state): State<AppState>) -> ServerResult<Json<VerifyResponse>> {
    let report = state.ledger.validate()?;
    Ok(Json(VerifyResponse {
        valid: report.is_valid(),
        report,
    }))
}

/// Undecodable bodies are a server error whatever the append mode.
fn decode_body<T: DeserializeOwned>(body: &[u8]) -> ServerResult<T> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::warn!(error = %e, "could not decode request body");
        ServerError::Decode(e.to_string())
    })
}
