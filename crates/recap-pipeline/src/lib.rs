//! Meeting processing pipeline for Recap.
//!
//! Orchestrates the fixed provider sequence (transcribe, analyze, embed,
//! visualize, persist), backfills embeddings on startup, plans calendar and
//! task integrations from analysis results, and runs live transcription
//! sessions.

pub mod backfill;
pub mod error;
pub mod integrations;
pub mod live;
pub mod processor;

pub use backfill::backfill_embeddings;
pub use error::PipelineError;
pub use integrations::{plan_calendar_events, plan_task_assignments};
pub use live::{ChunkOutcome, LiveSessionManager, LiveSessionSummary, SessionInfo};
pub use processor::MeetingPipeline;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
