//! API error types and HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use recap_index::IndexError;
use recap_pipeline::PipelineError;
use recap_providers::ProviderError;
use thiserror::Error;
use tracing::warn;

/// Errors surfaced by API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid client input.
    #[error("{0}")]
    BadRequest(String),

    /// Missing resource.
    #[error("{0}")]
    NotFound(String),

    /// Pipeline failure.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// Direct provider failure (query embedding, follow-up planning).
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Store failure.
    #[error(transparent)]
    Index(#[from] IndexError),

    /// Server-side I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// Create a bad-request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Pipeline(PipelineError::SessionNotFound(_)) => StatusCode::NOT_FOUND,
            Self::Pipeline(PipelineError::Store(IndexError::NotFound(_))) => StatusCode::NOT_FOUND,
            Self::Index(IndexError::NotFound(_)) => StatusCode::NOT_FOUND,
            // Upstream model failures are gateway errors from the client's view.
            Self::Pipeline(
                PipelineError::Transcription(_)
                | PipelineError::Analysis(_)
                | PipelineError::Embedding(_)
                | PipelineError::Generation(_),
            ) => StatusCode::BAD_GATEWAY,
            Self::Provider(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!(error = %self, "request failed");
        }

        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
