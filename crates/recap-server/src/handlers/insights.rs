//! Cross-meeting insights handler.

use crate::state::AppState;
use crate::Result;
use axum::extract::State;
use axum::Json;
use recap_index::{meeting_insights, CrossMeetingInsights};
use serde::Serialize;
use std::sync::Arc;

/// Insights response.
#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    pub success: bool,
    pub insights: CrossMeetingInsights,
}

/// Aggregate insights across all stored meetings.
pub async fn insights(State(state): State<Arc<AppState>>) -> Result<Json<InsightsResponse>> {
    let records = state.store.list().await?;

    Ok(Json(InsightsResponse {
        success: true,
        insights: meeting_insights(&records),
    }))
}
