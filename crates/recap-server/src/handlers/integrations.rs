//! Calendar and task integration handlers.

use crate::state::AppState;
use crate::{ApiError, Result};
use axum::extract::State;
use axum::Json;
use recap_core::{CalendarEvent, FollowUpPlan, MeetingRecord, TaskAssignment};
use recap_pipeline::{plan_calendar_events, plan_task_assignments};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Request body naming the meeting to plan from.
#[derive(Debug, Deserialize)]
pub struct IntegrationRequest {
    pub meeting_id: String,
}

async fn load_meeting(state: &AppState, id: &str) -> Result<MeetingRecord> {
    state
        .store
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Meeting not found"))
}

/// Calendar planning response.
#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub success: bool,
    pub events_created: usize,
    pub events: Vec<CalendarEvent>,
}

/// Plan calendar events from a meeting's analysis.
pub async fn calendar_events(
    State(state): State<Arc<AppState>>,
    Json(request): Json<IntegrationRequest>,
) -> Result<Json<CalendarResponse>> {
    let record = load_meeting(&state, &request.meeting_id).await?;
    let events = plan_calendar_events(&record.analysis, chrono::Utc::now());

    Ok(Json(CalendarResponse {
        success: true,
        events_created: events.len(),
        events,
    }))
}

/// Task planning response.
#[derive(Debug, Serialize)]
pub struct TasksResponse {
    pub success: bool,
    pub tasks_created: usize,
    pub tasks: Vec<TaskAssignment>,
}

/// Plan task assignments from a meeting's analysis.
pub async fn task_assignments(
    State(state): State<Arc<AppState>>,
    Json(request): Json<IntegrationRequest>,
) -> Result<Json<TasksResponse>> {
    let record = load_meeting(&state, &request.meeting_id).await?;
    let tasks = plan_task_assignments(&record.analysis, chrono::Utc::now());

    Ok(Json(TasksResponse {
        success: true,
        tasks_created: tasks.len(),
        tasks,
    }))
}

/// Follow-up planning response.
#[derive(Debug, Serialize)]
pub struct FollowUpsResponse {
    pub success: bool,
    pub plan: FollowUpPlan,
}

/// Ask the model for follow-up suggestions from a meeting's analysis.
pub async fn follow_ups(
    State(state): State<Arc<AppState>>,
    Json(request): Json<IntegrationRequest>,
) -> Result<Json<FollowUpsResponse>> {
    let record = load_meeting(&state, &request.meeting_id).await?;
    let plan = state.analyzer.plan_follow_ups(&record.analysis).await?;

    Ok(Json(FollowUpsResponse {
        success: true,
        plan,
    }))
}
