use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bookchain_ledger::LedgerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// Body could not be decoded; always reported as a server fault.
    #[error("could not decode request body: {0}")]
    Decode(String),

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Ledger(LedgerError::Rejected(_)) => StatusCode::CONFLICT,
            Self::Decode(_)
            | Self::Ledger(_)
            | Self::Config(_)
            | Self::Io(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = serde_json::json!({
            "error": {
                "code": status.as_u16(),
                "message": self.to_string(),
            }
        });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use bookchain_ledger::Rejection;

    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            ServerError::Decode("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ServerError::from(LedgerError::Rejected(Rejection::GenesisPayload)).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServerError::from(LedgerError::LockPoisoned).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn response_carries_status() {
        let response =
            ServerError::from(LedgerError::Rejected(Rejection::GenesisPayload)).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
