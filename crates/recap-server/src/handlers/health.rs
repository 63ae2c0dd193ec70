//! Health and statistics handlers.

use crate::state::AppState;
use crate::Result;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,

    /// Server version.
    pub version: String,

    /// Uptime in seconds.
    pub uptime_seconds: u64,

    /// Stored meeting count.
    pub meetings: usize,
}

/// Health check handler.
pub async fn health(State(state): State<Arc<AppState>>) -> Result<Json<HealthResponse>> {
    let meetings = state.store.count().await?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        meetings,
    }))
}

/// Aggregate statistics response.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    /// Stored meeting count.
    pub total_meetings: usize,

    /// Action items across all meetings.
    pub total_action_items: usize,

    /// Key decisions across all meetings.
    pub total_decisions: usize,

    /// Live sessions currently active.
    pub active_live_sessions: usize,
}

/// Statistics handler.
pub async fn stats(State(state): State<Arc<AppState>>) -> Result<Json<StatsResponse>> {
    let records = state.store.list().await?;

    let total_action_items = records.iter().map(|r| r.analysis.action_items.len()).sum();
    let total_decisions = records.iter().map(|r| r.analysis.key_decisions.len()).sum();
    let active_live_sessions = state.live.active_sessions().await.len();

    Ok(Json(StatsResponse {
        total_meetings: records.len(),
        total_action_items,
        total_decisions,
        active_live_sessions,
    }))
}
