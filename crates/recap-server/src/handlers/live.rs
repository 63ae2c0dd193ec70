//! Live transcription session handlers.

use crate::state::AppState;
use crate::{ApiError, Result};
use axum::extract::{Path, State};
use axum::Json;
use base64::Engine as _;
use recap_pipeline::{ChunkOutcome, LiveSessionSummary, SessionInfo};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Session start response.
#[derive(Debug, Serialize)]
pub struct StartSessionResponse {
    pub success: bool,
    pub session: SessionInfo,
}

/// Start a new live transcription session.
pub async fn start_session(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StartSessionResponse>> {
    let session = state.live.start_session().await;

    Ok(Json(StartSessionResponse {
        success: true,
        session,
    }))
}

/// Chunk upload body.
#[derive(Debug, Deserialize)]
pub struct ChunkRequest {
    /// Base64-encoded raw PCM audio.
    pub audio_data: String,
}

/// Chunk response.
#[derive(Debug, Serialize)]
pub struct ChunkResponse {
    pub success: bool,
    pub result: ChunkOutcome,
}

/// Feed an audio chunk into a live session.
pub async fn process_chunk(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<ChunkRequest>,
) -> Result<Json<ChunkResponse>> {
    if request.audio_data.is_empty() {
        return Err(ApiError::bad_request("Missing audio_data"));
    }

    let audio = base64::engine::general_purpose::STANDARD
        .decode(&request.audio_data)
        .map_err(|e| ApiError::bad_request(format!("Invalid base64 audio data: {}", e)))?;

    let result = state.live.process_chunk(&id, &audio).await?;

    Ok(Json(ChunkResponse {
        success: true,
        result,
    }))
}

/// Session end response.
#[derive(Debug, Serialize)]
pub struct EndSessionResponse {
    pub success: bool,
    pub summary: LiveSessionSummary,

    /// Id of the persisted meeting record, when the session produced speech.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_id: Option<String>,
}

/// End a live session, persisting it as a meeting when it produced speech.
pub async fn end_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<EndSessionResponse>> {
    let summary = state.live.end_session(&id).await?;
    let meeting = state.pipeline.finalize_live(summary.clone()).await?;

    Ok(Json(EndSessionResponse {
        success: true,
        summary,
        meeting_id: meeting.map(|m| m.id),
    }))
}

/// Active sessions response.
#[derive(Debug, Serialize)]
pub struct SessionsResponse {
    pub success: bool,
    pub active_sessions: Vec<SessionInfo>,
}

/// List active live sessions.
pub async fn list_sessions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionsResponse>> {
    Ok(Json(SessionsResponse {
        success: true,
        active_sessions: state.live.active_sessions().await,
    }))
}
