//! AI model provider implementations for Recap.
//!
//! Each processing-pipeline collaborator is a trait with one production
//! implementation backed by the OpenAI HTTP API:
//!
//! - [`Transcriber`]: speech-to-text over uploaded audio
//! - [`Analyzer`]: structured meeting analysis via forced function calling
//! - [`Embedder`]: fixed-dimensionality text embeddings
//! - [`ImageGenerator`]: visual summaries from meeting content
//!
//! Every call returns an explicit `Result<T, ProviderError>`; callers decide
//! what a failure means, nothing is suppressed here.

mod error;
mod openai;
mod types;

pub use error::{ProviderError, Result};
pub use openai::OpenAiClient;
pub use types::{TranscriptSegment, Transcription};

use async_trait::async_trait;
use bytes::Bytes;
use recap_core::{FollowUpPlan, MeetingAnalysis};

/// Speech-to-text over a bounded audio payload.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe audio bytes to plain text.
    async fn transcribe(&self, filename: &str, audio: Bytes) -> Result<String>;

    /// Transcribe with per-segment timestamps.
    async fn transcribe_verbose(&self, filename: &str, audio: Bytes) -> Result<Transcription>;
}

/// Structured analysis of transcript text.
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Extract a structured analysis from a transcript.
    async fn analyze(&self, transcript: &str) -> Result<MeetingAnalysis>;

    /// Turn an analysis into suggested calendar events and task assignments.
    async fn plan_follow_ups(&self, analysis: &MeetingAnalysis) -> Result<FollowUpPlan>;
}

/// Text embedding generation.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Get the embedding dimension.
    fn dimension(&self) -> usize;

    /// Generate an embedding for a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Image generation from text prompts.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate an infographic-style visual from a meeting summary.
    /// Returns a hosted image URL.
    async fn visual_summary(&self, summary: &str) -> Result<String>;

    /// Generate a presentation slide background from key points.
    async fn presentation_asset(&self, key_points: &[String]) -> Result<String>;

    /// Generate a conceptual illustration for a single idea.
    async fn concept_illustration(&self, concept: &str) -> Result<String>;
}
