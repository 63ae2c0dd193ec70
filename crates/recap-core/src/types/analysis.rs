//! Meeting analysis types.

use serde::{Deserialize, Serialize};

/// Structured analysis of a meeting transcript.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeetingAnalysis {
    /// Concise meeting summary.
    #[serde(default)]
    pub summary: String,

    /// Key decisions made during the meeting.
    #[serde(default)]
    pub key_decisions: Vec<KeyDecision>,

    /// Action items with owners.
    #[serde(default)]
    pub action_items: Vec<ActionItem>,

    /// Meeting participants.
    #[serde(default)]
    pub participants: Vec<String>,

    /// Main topics discussed.
    #[serde(default)]
    pub topics_discussed: Vec<String>,

    /// Meeting effectiveness score (1-10).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_effectiveness_score: Option<u8>,

    /// Recommendations for follow-up.
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// A decision extracted from a transcript.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeyDecision {
    /// The decision itself.
    #[serde(default)]
    pub decision: String,

    /// Context in which the decision was made.
    #[serde(default)]
    pub context: String,

    /// Expected business impact.
    #[serde(default)]
    pub impact: String,
}

/// A normalized action item.
///
/// Source data is heterogeneous (a bare task string or a full object); both
/// shapes deserialize into this single representation so downstream code
/// never branches on shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "ActionItemWire")]
pub struct ActionItem {
    /// Task description.
    pub task: String,

    /// Responsible person, if identified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// Deadline as stated in the meeting (free text).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,

    /// Priority level.
    pub priority: Priority,
}

impl ActionItem {
    /// Create an action item from a task description.
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            owner: None,
            deadline: None,
            priority: Priority::default(),
        }
    }

    /// Set the owner.
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Set the deadline.
    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

/// Wire representation of an action item.
#[derive(Deserialize)]
#[serde(untagged)]
enum ActionItemWire {
    Task(String),
    Full {
        #[serde(default)]
        task: String,
        #[serde(default)]
        owner: Option<String>,
        #[serde(default)]
        deadline: Option<String>,
        #[serde(default)]
        priority: Option<String>,
    },
}

impl From<ActionItemWire> for ActionItem {
    fn from(wire: ActionItemWire) -> Self {
        match wire {
            ActionItemWire::Task(task) => ActionItem::new(task),
            ActionItemWire::Full {
                task,
                owner,
                deadline,
                priority,
            } => ActionItem {
                task,
                owner: owner.filter(|o| !o.is_empty()),
                deadline: deadline.filter(|d| !d.is_empty()),
                priority: priority
                    .as_deref()
                    .map(Priority::parse_lenient)
                    .unwrap_or_default(),
            },
        }
    }
}

/// Action item priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Parse a priority string, defaulting to medium for unknown values.
    pub fn parse_lenient(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "high" => Self::High,
            "low" => Self::Low,
            _ => Self::Medium,
        }
    }

    /// Lowercase string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}
