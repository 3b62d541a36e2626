use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

pub enum ApiError {
    HTTPError(axum::http::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::HTTPError(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("HTTP error: {e}"),
            )
                .into_response(),
        }
    }
}

impl From<axum::http::Error> for ApiError {
    fn from(e: axum::http::Error) -> Self {
        Self::HTTPError(e)
    }
}

/// Failures on the fire-and-forget UDP leg. Logged, never surfaced to the
/// HTTP client.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to encode datagram: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("encoded datagram of {0} bytes exceeds the single-datagram limit")]
    Oversize(usize),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no live connection to the document store")]
    Unavailable,

    #[error("document store write failed: {0}")]
    Write(#[from] mongodb::error::Error),

    #[error("document store did not acknowledge the write")]
    Unacknowledged,
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("failed to bind UDP socket on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
}
