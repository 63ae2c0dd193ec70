//! Semantic search over stored meetings.
//!
//! This crate provides:
//! - Cosine-similarity ranking of embedding records against a query vector
//! - Meeting record storage with flat-file JSON persistence
//! - Cross-meeting insight aggregation

pub mod error;
pub mod insights;
pub mod ranker;
pub mod store;

pub use error::IndexError;
pub use insights::{meeting_insights, CrossMeetingInsights};
pub use ranker::{
    cosine_similarity, rank, EmbeddingRecord, RankedResult, Ranking, DEFAULT_MIN_SCORE,
    DEFAULT_TOP_K, EXCERPT_LEN,
};
pub use store::{JsonFileStore, MeetingStore, MemoryStore};

/// Result type for index operations.
pub type Result<T> = std::result::Result<T, IndexError>;
