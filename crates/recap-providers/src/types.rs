//! Common types for provider responses.

use serde::{Deserialize, Serialize};

/// A transcription with segment-level timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcription {
    /// Full transcript text.
    pub text: String,

    /// Detected language, if reported.
    #[serde(default)]
    pub language: Option<String>,

    /// Audio duration in seconds, if reported.
    #[serde(default)]
    pub duration: Option<f64>,

    /// Timestamped segments.
    #[serde(default)]
    pub segments: Vec<TranscriptSegment>,
}

/// One timestamped span of a transcription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Segment start in seconds.
    pub start: f64,

    /// Segment end in seconds.
    pub end: f64,

    /// Segment text.
    pub text: String,
}
