//! Calendar and task integration types.

use serde::{Deserialize, Serialize};

/// A calendar event planned from meeting analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Unique identifier.
    pub id: String,

    /// Event title.
    pub title: String,

    /// Event description.
    pub description: String,

    /// Scheduled start time.
    pub start_time: chrono::DateTime<chrono::Utc>,

    /// Duration in minutes.
    pub duration_minutes: u32,

    /// Attendees.
    pub attendees: Vec<String>,

    /// Location or call link hint.
    pub location: String,

    /// Scheduling status (confirmed, tentative).
    pub status: EventStatus,

    /// Creation timestamp.
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Calendar event status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Confirmed,
    Tentative,
}

/// A task assignment planned from meeting analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskAssignment {
    /// Unique identifier.
    pub id: String,

    /// Task title.
    pub title: String,

    /// Task description.
    pub description: String,

    /// Assignee name.
    pub assignee: String,

    /// Priority carried over from the action item.
    pub priority: super::Priority,

    /// Due date.
    pub due_date: chrono::DateTime<chrono::Utc>,

    /// Task status.
    pub status: TaskStatus,

    /// Project bucket.
    pub project: String,

    /// Classification tags.
    pub tags: Vec<String>,

    /// Creation timestamp.
    pub created_at: chrono::DateTime<chrono::Utc>,

    /// Rough effort estimate in hours.
    pub estimated_hours: u32,
}

/// Task assignment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    NotStarted,
    InProgress,
    Done,
}

/// Follow-up plan produced by the model from a meeting analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FollowUpPlan {
    /// Suggested calendar events.
    #[serde(default)]
    pub calendar_events: Vec<FollowUpEvent>,

    /// Suggested task assignments.
    #[serde(default)]
    pub task_assignments: Vec<FollowUpTask>,
}

impl FollowUpPlan {
    /// Whether the plan contains no suggestions.
    pub fn is_empty(&self) -> bool {
        self.calendar_events.is_empty() && self.task_assignments.is_empty()
    }
}

/// A model-suggested calendar event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FollowUpEvent {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Suggested date as free text from the model.
    #[serde(default)]
    pub suggested_date: String,

    #[serde(default)]
    pub duration: Option<u32>,

    #[serde(default)]
    pub attendees: Vec<String>,
}

/// A model-suggested task assignment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FollowUpTask {
    #[serde(default)]
    pub task_title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub assignee: String,

    #[serde(default)]
    pub due_date: String,

    #[serde(default)]
    pub project: String,
}
