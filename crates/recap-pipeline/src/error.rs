//! Pipeline error types.

use recap_index::IndexError;
use recap_providers::ProviderError;
use thiserror::Error;

/// Errors from the processing pipeline.
///
/// Each provider-backed stage gets its own variant so the first failure in
/// the fixed sequence is reported with the stage that produced it.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Speech-to-text failed.
    #[error("Transcription failed: {0}")]
    Transcription(#[source] ProviderError),

    /// Transcript analysis failed.
    #[error("Analysis failed: {0}")]
    Analysis(#[source] ProviderError),

    /// Embedding generation failed.
    #[error("Embedding failed: {0}")]
    Embedding(#[source] ProviderError),

    /// Visual generation failed.
    #[error("Visual generation failed: {0}")]
    Generation(#[source] ProviderError),

    /// Record store failure.
    #[error("Store error: {0}")]
    Store(#[from] IndexError),

    /// Live session id is unknown or already ended.
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// I/O error reading local audio.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
