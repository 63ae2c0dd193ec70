//! Pipeline sequencing integration tests.
//!
//! Exercises the full processing flow over scripted collaborators and a
//! file-backed store: stage ordering, first-failure reporting, and the
//! startup embedding backfill.

use async_trait::async_trait;
use bytes::Bytes;
use recap_core::{FollowUpPlan, MeetingAnalysis};
use recap_index::{JsonFileStore, MeetingStore, MemoryStore};
use recap_pipeline::{backfill_embeddings, MeetingPipeline, PipelineError};
use recap_providers::{
    Analyzer, Embedder, ImageGenerator, ProviderError, Transcriber, Transcription,
};
use std::sync::{Arc, Mutex};

/// Scripted collaborator recording stage order, optionally failing a stage.
struct Scripted {
    calls: Mutex<Vec<&'static str>>,
    fail_stage: Option<&'static str>,
}

impl Scripted {
    fn ok() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            fail_stage: None,
        })
    }

    fn failing(stage: &'static str) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            fail_stage: Some(stage),
        })
    }

    fn visit(&self, stage: &'static str) -> Result<(), ProviderError> {
        self.calls.lock().unwrap().push(stage);
        if self.fail_stage == Some(stage) {
            Err(ProviderError::internal(format!("{} unavailable", stage)))
        } else {
            Ok(())
        }
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transcriber for Scripted {
    async fn transcribe(&self, _filename: &str, _audio: Bytes) -> Result<String, ProviderError> {
        self.visit("transcribe")?;
        Ok("quarterly planning transcript".to_string())
    }

    async fn transcribe_verbose(
        &self,
        _filename: &str,
        _audio: Bytes,
    ) -> Result<Transcription, ProviderError> {
        self.visit("transcribe")?;
        Ok(Transcription {
            text: "quarterly planning transcript".to_string(),
            language: None,
            duration: None,
            segments: vec![],
        })
    }
}

#[async_trait]
impl Analyzer for Scripted {
    async fn analyze(&self, _transcript: &str) -> Result<MeetingAnalysis, ProviderError> {
        self.visit("analyze")?;
        Ok(MeetingAnalysis {
            summary: "planning summary".to_string(),
            ..Default::default()
        })
    }

    async fn plan_follow_ups(
        &self,
        _analysis: &MeetingAnalysis,
    ) -> Result<FollowUpPlan, ProviderError> {
        Ok(FollowUpPlan::default())
    }
}

#[async_trait]
impl Embedder for Scripted {
    fn dimension(&self) -> usize {
        3
    }

    async fn embed(&self, _text: &str) -> Result<Vec<f32>, ProviderError> {
        self.visit("embed")?;
        Ok(vec![0.1, 0.2, 0.3])
    }
}

#[async_trait]
impl ImageGenerator for Scripted {
    async fn visual_summary(&self, _summary: &str) -> Result<String, ProviderError> {
        self.visit("visualize")?;
        Ok("https://images.example/visual.png".to_string())
    }

    async fn presentation_asset(&self, _key_points: &[String]) -> Result<String, ProviderError> {
        Ok("https://images.example/asset.png".to_string())
    }

    async fn concept_illustration(&self, _concept: &str) -> Result<String, ProviderError> {
        Ok("https://images.example/concept.png".to_string())
    }
}

fn pipeline(script: Arc<Scripted>, store: Arc<dyn MeetingStore>) -> MeetingPipeline {
    MeetingPipeline::new(
        script.clone(),
        script.clone(),
        script.clone(),
        script,
        store,
    )
}

#[tokio::test]
async fn test_full_sequence_persists_to_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("meetings.json");
    let store = Arc::new(JsonFileStore::new(path.clone()).unwrap());
    let script = Scripted::ok();

    let record = pipeline(script.clone(), store)
        .process(
            "planning.mp3",
            Bytes::from_static(b"audio"),
            Some("Q3 planning".to_string()),
            vec!["kim".to_string()],
        )
        .await
        .unwrap();

    assert_eq!(
        script.calls(),
        vec!["transcribe", "analyze", "embed", "visualize"]
    );
    assert_eq!(record.title, "Q3 planning");
    assert_eq!(record.attendees, vec!["kim"]);

    // Record survives a store reopen.
    let reopened = JsonFileStore::new(path).unwrap();
    let loaded = reopened.get(&record.id).await.unwrap().unwrap();
    assert_eq!(loaded.embedding, vec![0.1, 0.2, 0.3]);
    assert_eq!(
        loaded.visual_url.as_deref(),
        Some("https://images.example/visual.png")
    );
}

#[tokio::test]
async fn test_transcription_failure_stops_everything() {
    let store = Arc::new(MemoryStore::new());
    let script = Scripted::failing("transcribe");

    let err = pipeline(script.clone(), store.clone())
        .process("x.mp3", Bytes::from_static(b"audio"), None, vec![])
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Transcription(_)));
    assert_eq!(script.calls(), vec!["transcribe"]);
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_visual_failure_reported_after_earlier_stages() {
    let store = Arc::new(MemoryStore::new());
    let script = Scripted::failing("visualize");

    let err = pipeline(script.clone(), store.clone())
        .process("x.mp3", Bytes::from_static(b"audio"), None, vec![])
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Generation(_)));
    assert_eq!(
        script.calls(),
        vec!["transcribe", "analyze", "embed", "visualize"]
    );
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_backfill_after_failed_embedding_run() {
    let store = Arc::new(MemoryStore::new());

    // Seed a record that never got an embedding.
    let record = recap_core::MeetingRecord::new(
        "old meeting",
        "old.mp3",
        "old transcript",
        MeetingAnalysis::default(),
        vec![],
    );
    store.append(record.clone()).await.unwrap();

    let script = Scripted::ok();
    let updated = backfill_embeddings(store.as_ref(), script.as_ref())
        .await
        .unwrap();

    assert_eq!(updated, 1);
    let loaded = store.get(&record.id).await.unwrap().unwrap();
    assert_eq!(loaded.embedding, vec![0.1, 0.2, 0.3]);
}
