//! The fixed processing sequence for uploaded recordings.

use crate::{PipelineError, Result};
use bytes::Bytes;
use recap_core::{LiveRecap, MeetingRecord};
use recap_index::MeetingStore;
use recap_providers::{Analyzer, Embedder, ImageGenerator, Transcriber};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Runs uploaded audio through transcribe → analyze → embed → visualize →
/// persist. The first failing stage aborts the run; there is no partial
/// persistence and no retry here.
pub struct MeetingPipeline {
    transcriber: Arc<dyn Transcriber>,
    analyzer: Arc<dyn Analyzer>,
    embedder: Arc<dyn Embedder>,
    images: Arc<dyn ImageGenerator>,
    store: Arc<dyn MeetingStore>,
}

impl MeetingPipeline {
    /// Create a pipeline over the given collaborators.
    pub fn new(
        transcriber: Arc<dyn Transcriber>,
        analyzer: Arc<dyn Analyzer>,
        embedder: Arc<dyn Embedder>,
        images: Arc<dyn ImageGenerator>,
        store: Arc<dyn MeetingStore>,
    ) -> Self {
        Self {
            transcriber,
            analyzer,
            embedder,
            images,
            store,
        }
    }

    /// Process an uploaded recording and persist the resulting record.
    pub async fn process(
        &self,
        filename: &str,
        audio: Bytes,
        title: Option<String>,
        attendees: Vec<String>,
    ) -> Result<MeetingRecord> {
        let title = title.unwrap_or_else(|| format!("Meeting - {}", filename));

        info!(filename, "transcribing audio");
        let transcript = self
            .transcriber
            .transcribe(filename, audio)
            .await
            .map_err(PipelineError::Transcription)?;

        info!(filename, "analyzing transcript");
        let analysis = self
            .analyzer
            .analyze(&transcript)
            .await
            .map_err(PipelineError::Analysis)?;

        info!(filename, "creating embedding");
        let embedding = self
            .embedder
            .embed(&transcript)
            .await
            .map_err(PipelineError::Embedding)?;

        info!(filename, "generating visual summary");
        let visual_url = self
            .images
            .visual_summary(&analysis.summary)
            .await
            .map_err(PipelineError::Generation)?;

        let record = MeetingRecord::new(title, filename, transcript, analysis, embedding)
            .with_attendees(attendees)
            .with_visual_url(visual_url);

        self.store.append(record.clone()).await?;
        info!(id = %record.id, "meeting processed and stored");

        Ok(record)
    }

    /// Process a recording from a local file path.
    pub async fn process_file(
        &self,
        path: &Path,
        title: Option<String>,
        attendees: Vec<String>,
    ) -> Result<MeetingRecord> {
        let audio = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "recording".to_string());

        self.process(&filename, Bytes::from(audio), title, attendees)
            .await
    }

    /// Regenerate the visual summary for a stored record and persist the
    /// new URL.
    pub async fn regenerate_visual(&self, id: &str) -> Result<String> {
        let mut record = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| PipelineError::Store(recap_index::IndexError::NotFound(id.to_string())))?;

        let url = self
            .images
            .visual_summary(&record.analysis.summary)
            .await
            .map_err(PipelineError::Generation)?;

        record.visual_url = Some(url.clone());
        self.store.update(record).await?;

        Ok(url)
    }

    /// Persist a finished live session as a regular meeting record.
    ///
    /// Sessions that produced no speech yield `Ok(None)`. Visual generation
    /// runs only when the analysis carries a summary.
    pub async fn finalize_live(
        &self,
        summary: crate::live::LiveSessionSummary,
    ) -> Result<Option<MeetingRecord>> {
        if summary.transcript.trim().is_empty() {
            return Ok(None);
        }

        let analysis = self
            .analyzer
            .analyze(&summary.transcript)
            .await
            .map_err(PipelineError::Analysis)?;

        let embedding = self
            .embedder
            .embed(&summary.transcript)
            .await
            .map_err(PipelineError::Embedding)?;

        let visual_url = if analysis.summary.trim().is_empty() {
            None
        } else {
            Some(
                self.images
                    .visual_summary(&analysis.summary)
                    .await
                    .map_err(PipelineError::Generation)?,
            )
        };

        let mut record = MeetingRecord::new(
            format!("Live session {}", summary.session_id),
            format!("live_session_{}", summary.session_id),
            summary.transcript.clone(),
            analysis,
            embedding,
        )
        .with_live(LiveRecap {
            session_id: summary.session_id.clone(),
            duration_seconds: summary.duration_seconds,
            segment_count: summary.total_segments,
            live_analysis: summary.live_analysis.clone(),
        });
        record.visual_url = visual_url;

        self.store.append(record.clone()).await?;
        info!(id = %record.id, session = %summary.session_id, "live session stored");

        Ok(Some(record))
    }
}
