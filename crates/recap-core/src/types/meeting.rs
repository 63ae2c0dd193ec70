//! Meeting record types.

use super::{LiveRecap, MeetingAnalysis};
use serde::{Deserialize, Serialize};

/// A fully processed meeting, as persisted in the meetings file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingRecord {
    /// Unique identifier.
    pub id: String,

    /// Human-facing title.
    pub title: String,

    /// Original upload filename.
    pub filename: String,

    /// Processing timestamp.
    pub timestamp: chrono::DateTime<chrono::Utc>,

    /// Attendees as provided at upload time.
    #[serde(default)]
    pub attendees: Vec<String>,

    /// Full transcript text.
    pub transcript: String,

    /// Structured analysis.
    pub analysis: MeetingAnalysis,

    /// Embedding vector for semantic search. Empty when embedding failed;
    /// such records are excluded from ranking rather than erroring.
    #[serde(default)]
    pub embedding: Vec<f32>,

    /// URL of the generated visual summary, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_url: Option<String>,

    /// Present for meetings captured through a live session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live: Option<LiveRecap>,
}

impl MeetingRecord {
    /// Create a new record with a fresh id and the current timestamp.
    pub fn new(
        title: impl Into<String>,
        filename: impl Into<String>,
        transcript: impl Into<String>,
        analysis: MeetingAnalysis,
        embedding: Vec<f32>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            filename: filename.into(),
            timestamp: chrono::Utc::now(),
            attendees: Vec::new(),
            transcript: transcript.into(),
            analysis,
            embedding,
            visual_url: None,
            live: None,
        }
    }

    /// Set the attendee list.
    pub fn with_attendees(mut self, attendees: Vec<String>) -> Self {
        self.attendees = attendees;
        self
    }

    /// Set the visual summary URL.
    pub fn with_visual_url(mut self, url: impl Into<String>) -> Self {
        self.visual_url = Some(url.into());
        self
    }

    /// Attach live-session metadata.
    pub fn with_live(mut self, live: LiveRecap) -> Self {
        self.live = Some(live);
        self
    }

    /// Whether this record carries a usable embedding.
    pub fn has_embedding(&self) -> bool {
        !self.embedding.is_empty()
    }
}

/// Truncate a summary for list views, appending an ellipsis when cut.
pub fn truncate_summary(summary: &str, max_chars: usize) -> String {
    if summary.chars().count() <= max_chars {
        summary.to_string()
    } else {
        let cut: String = summary.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_has_unique_ids() {
        let a = MeetingRecord::new("a", "a.mp3", "t", MeetingAnalysis::default(), vec![]);
        let b = MeetingRecord::new("b", "b.mp3", "t", MeetingAnalysis::default(), vec![]);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_has_embedding() {
        let mut record =
            MeetingRecord::new("a", "a.mp3", "t", MeetingAnalysis::default(), vec![]);
        assert!(!record.has_embedding());
        record.embedding = vec![0.1, 0.2];
        assert!(record.has_embedding());
    }

    #[test]
    fn test_truncate_summary() {
        assert_eq!(truncate_summary("short", 10), "short");
        assert_eq!(truncate_summary("a longer summary", 8), "a longer...");
    }

    #[test]
    fn test_record_json_roundtrip() {
        let record = MeetingRecord::new(
            "Weekly sync",
            "sync.mp3",
            "hello",
            MeetingAnalysis::default(),
            vec![1.0, 0.0],
        )
        .with_visual_url("https://example.com/img.png");

        let json = serde_json::to_string(&record).unwrap();
        let back: MeetingRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, record.id);
        assert_eq!(back.embedding, vec![1.0, 0.0]);
        assert_eq!(back.visual_url.as_deref(), Some("https://example.com/img.png"));
    }
}
