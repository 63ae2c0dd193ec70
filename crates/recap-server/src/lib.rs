//! HTTP API server for Recap.
//!
//! Exposes the processing pipeline, meeting store, semantic search, and
//! live transcription sessions over a JSON REST interface.

pub mod error;
pub mod handlers;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use server::{Server, DEFAULT_PORT};
pub use state::AppState;

/// Result type for API handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
