//! Live transcription session types.

use serde::{Deserialize, Serialize};

/// Summary metadata kept on records captured through a live session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveRecap {
    /// Originating session id.
    pub session_id: String,

    /// Approximate audio duration in seconds.
    pub duration_seconds: f64,

    /// Number of transcribed segments.
    pub segment_count: usize,

    /// Final state of the running keyword analysis.
    pub live_analysis: LiveAnalysis,
}

/// Lightweight running analysis updated as segments arrive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveAnalysis {
    /// Total words transcribed so far.
    pub word_count: usize,

    /// Last topic bucket matched by keyword scan.
    pub current_topic: String,

    /// Keyword-derived sentiment.
    pub sentiment: Sentiment,

    /// Count of segments containing action-item indicators.
    pub action_items_detected: usize,
}

impl Default for LiveAnalysis {
    fn default() -> Self {
        Self {
            word_count: 0,
            current_topic: "unknown".to_string(),
            sentiment: Sentiment::Neutral,
            action_items_detected: 0,
        }
    }
}

/// Coarse sentiment classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

/// A single transcribed segment within a live session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveSegment {
    /// Wall-clock timestamp of transcription.
    pub timestamp: chrono::DateTime<chrono::Utc>,

    /// Transcribed text.
    pub text: String,

    /// Approximate audio duration covered, in seconds.
    pub duration_seconds: f64,
}
