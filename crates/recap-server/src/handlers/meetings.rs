//! Meeting listing and retrieval handlers.

use crate::state::AppState;
use crate::{ApiError, Result};
use axum::extract::{Path, State};
use axum::Json;
use recap_core::{truncate_summary, LiveRecap, MeetingAnalysis, MeetingRecord};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

/// Characters of summary shown in list views.
const LIST_SUMMARY_LEN: usize = 200;

/// Listing response.
#[derive(Debug, Serialize)]
pub struct MeetingListResponse {
    pub meetings: Vec<MeetingListItem>,
}

/// One row of the meeting list.
#[derive(Debug, Serialize)]
pub struct MeetingListItem {
    pub id: String,
    pub title: String,
    pub filename: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub attendees: Vec<String>,
    pub summary: String,
}

/// List all stored meetings with truncated summaries.
pub async fn list_meetings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MeetingListResponse>> {
    let records = state.store.list().await?;

    let meetings = records
        .into_iter()
        .map(|r| MeetingListItem {
            summary: truncate_summary(&r.analysis.summary, LIST_SUMMARY_LEN),
            id: r.id,
            title: r.title,
            filename: r.filename,
            timestamp: r.timestamp,
            attendees: r.attendees,
        })
        .collect();

    Ok(Json(MeetingListResponse { meetings }))
}

/// Full meeting response.
#[derive(Debug, Serialize)]
pub struct MeetingResponse {
    pub meeting: MeetingDetail,
}

/// Full record view. The embedding vector stays server-side.
#[derive(Debug, Serialize)]
pub struct MeetingDetail {
    pub id: String,
    pub title: String,
    pub filename: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub attendees: Vec<String>,
    pub transcript: String,
    pub analysis: MeetingAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visual_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live: Option<LiveRecap>,
}

impl From<MeetingRecord> for MeetingDetail {
    fn from(r: MeetingRecord) -> Self {
        Self {
            id: r.id,
            title: r.title,
            filename: r.filename,
            timestamp: r.timestamp,
            attendees: r.attendees,
            transcript: r.transcript,
            analysis: r.analysis,
            visual_url: r.visual_url,
            live: r.live,
        }
    }
}

/// Fetch one meeting. A missing or invalid visual URL is regenerated
/// best-effort before responding; failure to regenerate is not fatal.
pub async fn get_meeting(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MeetingResponse>> {
    let mut record = state
        .store
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Meeting not found"))?;

    if !has_valid_visual(&record) && !record.analysis.summary.trim().is_empty() {
        match state.pipeline.regenerate_visual(&id).await {
            Ok(url) => record.visual_url = Some(url),
            Err(e) => warn!(id = %id, error = %e, "visual regeneration failed"),
        }
    }

    Ok(Json(MeetingResponse {
        meeting: record.into(),
    }))
}

/// Regeneration response.
#[derive(Debug, Serialize)]
pub struct RegenerateVisualResponse {
    pub success: bool,
    pub visual_url: String,
}

/// Force regeneration of a meeting's visual summary.
pub async fn regenerate_visual(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<RegenerateVisualResponse>> {
    let record = state
        .store
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Meeting not found"))?;

    if record.analysis.summary.trim().is_empty() {
        return Err(ApiError::bad_request(
            "No summary available for visual generation",
        ));
    }

    let visual_url = state.pipeline.regenerate_visual(&id).await?;

    Ok(Json(RegenerateVisualResponse {
        success: true,
        visual_url,
    }))
}

/// Whether the record carries a parseable http(s) visual URL.
fn has_valid_visual(record: &MeetingRecord) -> bool {
    record
        .visual_url
        .as_deref()
        .and_then(|u| url::Url::parse(u).ok())
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(visual: Option<&str>) -> MeetingRecord {
        let mut r = MeetingRecord::new("m", "m.mp3", "t", MeetingAnalysis::default(), vec![]);
        r.visual_url = visual.map(|v| v.to_string());
        r
    }

    #[test]
    fn test_has_valid_visual() {
        assert!(has_valid_visual(&record(Some("https://img.example/x.png"))));
        assert!(has_valid_visual(&record(Some("http://img.example/x.png"))));
        assert!(!has_valid_visual(&record(Some("not a url"))));
        assert!(!has_valid_visual(&record(Some("ftp://img.example/x.png"))));
        assert!(!has_valid_visual(&record(None)));
    }
}
