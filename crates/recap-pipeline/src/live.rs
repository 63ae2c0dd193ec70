//! Live transcription sessions.
//!
//! Clients stream base64 audio chunks over plain HTTP; chunks buffer until
//! roughly three seconds of 16 kHz 16-bit mono audio accumulate, then the
//! buffer is framed as WAV and transcribed as one segment. A lightweight
//! keyword analysis runs per segment so callers get live feedback without
//! extra model calls.

use crate::{PipelineError, Result};
use bytes::Bytes;
use once_cell::sync::Lazy;
use recap_core::{LiveAnalysis, LiveSegment, Sentiment};
use recap_providers::Transcriber;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Expected sample rate of incoming PCM audio.
const SAMPLE_RATE: u32 = 16_000;

/// Bytes per 16-bit mono sample.
const BYTES_PER_SAMPLE: usize = 2;

/// Buffered bytes that trigger a transcription pass (~3 seconds).
const BUFFER_THRESHOLD: usize = SAMPLE_RATE as usize * BYTES_PER_SAMPLE * 3;

/// Topic buckets matched against segment text.
static TOPIC_KEYWORDS: Lazy<Vec<(&'static str, Vec<&'static str>)>> = Lazy::new(|| {
    vec![
        ("planning", vec!["plan", "schedule", "timeline", "roadmap"]),
        ("technical", vec!["code", "bug", "feature", "development", "api"]),
        ("business", vec!["revenue", "customer", "market", "sales"]),
        ("meeting", vec!["agenda", "action", "decision", "review"]),
    ]
});

static ACTION_INDICATORS: &[&str] = &["todo", "action", "assign", "responsible", "deadline", "due"];

static POSITIVE_WORDS: &[&str] = &["good", "great", "excellent", "success", "positive"];

static NEGATIVE_WORDS: &[&str] = &["issue", "problem", "concern", "difficult", "challenge"];

/// An active session's mutable state.
struct LiveSession {
    created_at: chrono::DateTime<chrono::Utc>,
    buffer: Vec<u8>,
    chunk_count: usize,
    total_audio_bytes: usize,
    segments: Vec<LiveSegment>,
    analysis: LiveAnalysis,
}

/// Public view of a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionInfo {
    /// Session id.
    pub id: String,

    /// Creation time.
    pub created_at: chrono::DateTime<chrono::Utc>,

    /// Segments transcribed so far.
    pub segment_count: usize,

    /// Chunks received so far.
    pub chunks_received: usize,
}

/// Result of feeding one chunk into a session.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChunkOutcome {
    /// Not enough audio buffered yet.
    Buffering {
        buffered_bytes: usize,
        chunks_received: usize,
    },

    /// A segment was transcribed.
    Transcribed {
        segment: LiveSegment,
        live_analysis: LiveAnalysis,
        total_segments: usize,
    },

    /// The buffer was transcribed but produced no speech.
    NoSpeech,
}

/// Final state of an ended session.
#[derive(Debug, Clone, Serialize)]
pub struct LiveSessionSummary {
    /// Session id.
    pub session_id: String,

    /// Creation time.
    pub created_at: chrono::DateTime<chrono::Utc>,

    /// End time.
    pub ended_at: chrono::DateTime<chrono::Utc>,

    /// Segments transcribed.
    pub total_segments: usize,

    /// Chunks received.
    pub total_chunks: usize,

    /// Joined transcript text.
    pub transcript: String,

    /// Final live analysis.
    pub live_analysis: LiveAnalysis,

    /// Approximate audio duration in seconds.
    pub duration_seconds: f64,
}

/// Registry of in-flight live sessions.
pub struct LiveSessionManager {
    transcriber: Arc<dyn Transcriber>,
    sessions: RwLock<HashMap<String, LiveSession>>,
}

impl LiveSessionManager {
    /// Create a manager over the given transcriber.
    pub fn new(transcriber: Arc<dyn Transcriber>) -> Self {
        Self {
            transcriber,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Start a new session and return its info.
    pub async fn start_session(&self) -> SessionInfo {
        let id = uuid::Uuid::new_v4().to_string();
        let created_at = chrono::Utc::now();

        let mut sessions = self.sessions.write().await;
        sessions.insert(
            id.clone(),
            LiveSession {
                created_at,
                buffer: Vec::new(),
                chunk_count: 0,
                total_audio_bytes: 0,
                segments: Vec::new(),
                analysis: LiveAnalysis::default(),
            },
        );

        info!(session = %id, "live session started");

        SessionInfo {
            id,
            created_at,
            segment_count: 0,
            chunks_received: 0,
        }
    }

    /// Feed raw PCM bytes into a session.
    pub async fn process_chunk(&self, id: &str, chunk: &[u8]) -> Result<ChunkOutcome> {
        // Buffer under the write lock; transcription happens outside it.
        let pcm = {
            let mut sessions = self.sessions.write().await;
            let session = sessions
                .get_mut(id)
                .ok_or_else(|| PipelineError::SessionNotFound(id.to_string()))?;

            session.buffer.extend_from_slice(chunk);
            session.chunk_count += 1;
            session.total_audio_bytes += chunk.len();

            if session.buffer.len() < BUFFER_THRESHOLD {
                return Ok(ChunkOutcome::Buffering {
                    buffered_bytes: session.buffer.len(),
                    chunks_received: session.chunk_count,
                });
            }

            std::mem::take(&mut session.buffer)
        };

        debug!(session = id, bytes = pcm.len(), "transcribing buffered audio");
        let wav = wav_from_pcm16(&pcm, SAMPLE_RATE);
        let text = self
            .transcriber
            .transcribe("live.wav", Bytes::from(wav))
            .await
            .map_err(PipelineError::Transcription)?;

        if text.trim().is_empty() {
            return Ok(ChunkOutcome::NoSpeech);
        }

        let segment = LiveSegment {
            timestamp: chrono::Utc::now(),
            text: text.clone(),
            duration_seconds: pcm.len() as f64 / (SAMPLE_RATE as usize * BYTES_PER_SAMPLE) as f64,
        };

        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| PipelineError::SessionNotFound(id.to_string()))?;

        session.segments.push(segment.clone());
        update_live_analysis(&mut session.analysis, &text);

        Ok(ChunkOutcome::Transcribed {
            segment,
            live_analysis: session.analysis.clone(),
            total_segments: session.segments.len(),
        })
    }

    /// End a session, removing it from the registry.
    pub async fn end_session(&self, id: &str) -> Result<LiveSessionSummary> {
        let session = {
            let mut sessions = self.sessions.write().await;
            sessions
                .remove(id)
                .ok_or_else(|| PipelineError::SessionNotFound(id.to_string()))?
        };

        let transcript = session
            .segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        info!(session = id, segments = session.segments.len(), "live session ended");

        Ok(LiveSessionSummary {
            session_id: id.to_string(),
            created_at: session.created_at,
            ended_at: chrono::Utc::now(),
            total_segments: session.segments.len(),
            total_chunks: session.chunk_count,
            transcript,
            live_analysis: session.analysis,
            duration_seconds: session.total_audio_bytes as f64
                / (SAMPLE_RATE as usize * BYTES_PER_SAMPLE) as f64,
        })
    }

    /// Ids of active sessions.
    pub async fn active_sessions(&self) -> Vec<SessionInfo> {
        let sessions = self.sessions.read().await;
        let mut infos: Vec<SessionInfo> = sessions
            .iter()
            .map(|(id, s)| SessionInfo {
                id: id.clone(),
                created_at: s.created_at,
                segment_count: s.segments.len(),
                chunks_received: s.chunk_count,
            })
            .collect();
        infos.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        infos
    }
}

/// Update the running keyword analysis with a new segment.
fn update_live_analysis(analysis: &mut LiveAnalysis, text: &str) {
    let lower = text.to_lowercase();

    analysis.word_count += lower.split_whitespace().count();

    for (topic, keywords) in TOPIC_KEYWORDS.iter() {
        if keywords.iter().any(|k| lower.contains(k)) {
            analysis.current_topic = topic.to_string();
            break;
        }
    }

    if ACTION_INDICATORS.iter().any(|k| lower.contains(k)) {
        analysis.action_items_detected += 1;
    }

    let positive = POSITIVE_WORDS.iter().filter(|w| lower.contains(*w)).count();
    let negative = NEGATIVE_WORDS.iter().filter(|w| lower.contains(*w)).count();
    analysis.sentiment = match positive.cmp(&negative) {
        std::cmp::Ordering::Greater => Sentiment::Positive,
        std::cmp::Ordering::Less => Sentiment::Negative,
        std::cmp::Ordering::Equal => Sentiment::Neutral,
    };
}

/// Frame raw 16-bit mono PCM as a WAV file.
fn wav_from_pcm16(pcm: &[u8], sample_rate: u32) -> Vec<u8> {
    let data_len = pcm.len() as u32;
    let byte_rate = sample_rate * BYTES_PER_SAMPLE as u32;

    let mut wav = Vec::with_capacity(44 + pcm.len());
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes()); // fmt chunk size
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&1u16.to_le_bytes()); // mono
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&(BYTES_PER_SAMPLE as u16).to_le_bytes()); // block align
    wav.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    wav.extend_from_slice(pcm);
    wav
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use recap_providers::{ProviderError, Transcription};

    struct FixedTranscriber {
        text: &'static str,
    }

    #[async_trait]
    impl Transcriber for FixedTranscriber {
        async fn transcribe(
            &self,
            _filename: &str,
            _audio: Bytes,
        ) -> std::result::Result<String, ProviderError> {
            Ok(self.text.to_string())
        }

        async fn transcribe_verbose(
            &self,
            _filename: &str,
            _audio: Bytes,
        ) -> std::result::Result<Transcription, ProviderError> {
            Ok(Transcription {
                text: self.text.to_string(),
                language: None,
                duration: None,
                segments: vec![],
            })
        }
    }

    fn manager(text: &'static str) -> LiveSessionManager {
        LiveSessionManager::new(Arc::new(FixedTranscriber { text }))
    }

    #[tokio::test]
    async fn test_small_chunks_buffer() {
        let manager = manager("hello");
        let session = manager.start_session().await;

        let outcome = manager
            .process_chunk(&session.id, &[0u8; 1024])
            .await
            .unwrap();
        assert!(matches!(outcome, ChunkOutcome::Buffering { .. }));
    }

    #[tokio::test]
    async fn test_threshold_triggers_transcription() {
        let manager = manager("we shipped a great feature");
        let session = manager.start_session().await;

        let outcome = manager
            .process_chunk(&session.id, &vec![0u8; BUFFER_THRESHOLD])
            .await
            .unwrap();

        match outcome {
            ChunkOutcome::Transcribed {
                segment,
                live_analysis,
                total_segments,
            } => {
                assert_eq!(segment.text, "we shipped a great feature");
                assert_eq!(total_segments, 1);
                assert_eq!(live_analysis.word_count, 5);
                assert_eq!(live_analysis.current_topic, "technical");
                assert_eq!(live_analysis.sentiment, Sentiment::Positive);
            }
            other => panic!("expected Transcribed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let manager = manager("x");
        let err = manager.process_chunk("missing", &[0u8; 8]).await.unwrap_err();
        assert!(matches!(err, PipelineError::SessionNotFound(_)));
    }

    #[tokio::test]
    async fn test_end_session_joins_segments() {
        let manager = manager("segment text");
        let session = manager.start_session().await;

        manager
            .process_chunk(&session.id, &vec![0u8; BUFFER_THRESHOLD])
            .await
            .unwrap();
        manager
            .process_chunk(&session.id, &vec![0u8; BUFFER_THRESHOLD])
            .await
            .unwrap();

        let summary = manager.end_session(&session.id).await.unwrap();
        assert_eq!(summary.total_segments, 2);
        assert_eq!(summary.transcript, "segment text segment text");
        assert!((summary.duration_seconds - 6.0).abs() < 1e-9);

        // Session is gone after ending.
        assert!(manager.end_session(&session.id).await.is_err());
        assert!(manager.active_sessions().await.is_empty());
    }

    #[tokio::test]
    async fn test_active_sessions_listing() {
        let manager = manager("x");
        let a = manager.start_session().await;
        let b = manager.start_session().await;

        let active = manager.active_sessions().await;
        let ids: Vec<&str> = active.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(active.len(), 2);
        assert!(ids.contains(&a.id.as_str()));
        assert!(ids.contains(&b.id.as_str()));
    }

    #[test]
    fn test_wav_header() {
        let pcm = vec![0u8; 32_000];
        let wav = wav_from_pcm16(&pcm, SAMPLE_RATE);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(wav.len(), 44 + pcm.len());
        let data_len = u32::from_le_bytes(wav[40..44].try_into().unwrap());
        assert_eq!(data_len as usize, pcm.len());
    }

    #[test]
    fn test_live_analysis_sentiment() {
        let mut analysis = LiveAnalysis::default();
        update_live_analysis(&mut analysis, "there is a problem and an issue");
        assert_eq!(analysis.sentiment, Sentiment::Negative);
        update_live_analysis(&mut analysis, "great success all around, no concern at all");
        assert_eq!(analysis.sentiment, Sentiment::Positive);
    }

    #[test]
    fn test_live_analysis_action_detection() {
        let mut analysis = LiveAnalysis::default();
        update_live_analysis(&mut analysis, "the action item is due friday");
        assert_eq!(analysis.action_items_detected, 1);
    }
}
