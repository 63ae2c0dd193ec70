//! Shared application state for handlers.

use recap_core::Config;
use recap_index::MeetingStore;
use recap_pipeline::{LiveSessionManager, MeetingPipeline};
use recap_providers::{Analyzer, Embedder};
use std::sync::Arc;

/// State shared across all request handlers.
pub struct AppState {
    /// Loaded configuration.
    pub config: Config,

    /// Meeting record store.
    pub store: Arc<dyn MeetingStore>,

    /// Processing pipeline.
    pub pipeline: Arc<MeetingPipeline>,

    /// Embedder for search queries.
    pub embedder: Arc<dyn Embedder>,

    /// Analyzer for follow-up planning.
    pub analyzer: Arc<dyn Analyzer>,

    /// Live transcription sessions.
    pub live: Arc<LiveSessionManager>,

    /// Server start time, for uptime reporting.
    pub started_at: std::time::Instant,
}

impl AppState {
    /// Create new application state.
    pub fn new(
        config: Config,
        store: Arc<dyn MeetingStore>,
        pipeline: Arc<MeetingPipeline>,
        embedder: Arc<dyn Embedder>,
        analyzer: Arc<dyn Analyzer>,
        live: Arc<LiveSessionManager>,
    ) -> Self {
        Self {
            config,
            store,
            pipeline,
            embedder,
            analyzer,
            live,
            started_at: std::time::Instant::now(),
        }
    }
}
