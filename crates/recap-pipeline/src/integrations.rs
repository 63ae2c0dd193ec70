//! Deterministic calendar and task planning from meeting analysis.
//!
//! These planners run without any model call; the rules only look at the
//! normalized analysis. Timestamps are computed from a caller-supplied
//! reference time so output is reproducible.

use chrono::{DateTime, Duration, Utc};
use recap_core::{
    CalendarEvent, EventStatus, KeyDecision, MeetingAnalysis, Priority, TaskAssignment,
    TaskStatus,
};

/// Plan calendar events for an analysis.
///
/// One 30-minute follow-up per action item that carries a deadline, plus a
/// tentative one-week-out review meeting when more than three action items
/// exist.
pub fn plan_calendar_events(analysis: &MeetingAnalysis, now: DateTime<Utc>) -> Vec<CalendarEvent> {
    let mut events = Vec::new();

    for item in &analysis.action_items {
        if item.deadline.is_none() {
            continue;
        }

        let owner = item.owner.clone().unwrap_or_else(|| "Unassigned".to_string());
        events.push(CalendarEvent {
            id: uuid::Uuid::new_v4().to_string(),
            title: format!("Follow-up: {}", item.task),
            description: format!("Action item from meeting. Owner: {}", owner),
            start_time: parse_deadline(item.deadline.as_deref(), now),
            duration_minutes: 30,
            attendees: vec![owner],
            location: "Meeting Room / Video Call".to_string(),
            status: EventStatus::Confirmed,
            created_at: now,
        });
    }

    if analysis.action_items.len() > 3 {
        let mut attendees: Vec<String> = analysis
            .action_items
            .iter()
            .map(|i| i.owner.clone().unwrap_or_else(|| "Unassigned".to_string()))
            .collect();
        attendees.sort();
        attendees.dedup();

        events.push(CalendarEvent {
            id: uuid::Uuid::new_v4().to_string(),
            title: "Action Items Follow-up Meeting".to_string(),
            description: format!(
                "Review progress on {} action items from meeting",
                analysis.action_items.len()
            ),
            start_time: now + Duration::weeks(1),
            duration_minutes: 60,
            attendees,
            location: "Conference Room A".to_string(),
            status: EventStatus::Tentative,
            created_at: now,
        });
    }

    events
}

/// Plan task assignments for an analysis.
///
/// One task per action item, plus high-priority implementation tasks for
/// key decisions whose stated impact is high.
pub fn plan_task_assignments(analysis: &MeetingAnalysis, now: DateTime<Utc>) -> Vec<TaskAssignment> {
    let mut tasks = Vec::new();

    for item in &analysis.action_items {
        tasks.push(TaskAssignment {
            id: uuid::Uuid::new_v4().to_string(),
            title: item.task.clone(),
            description: "Action item from meeting analysis".to_string(),
            assignee: item.owner.clone().unwrap_or_else(|| "Unassigned".to_string()),
            priority: item.priority,
            due_date: parse_deadline(item.deadline.as_deref(), now),
            status: TaskStatus::NotStarted,
            project: "General".to_string(),
            tags: vec!["meeting-action-item".to_string(), "auto-generated".to_string()],
            created_at: now,
            estimated_hours: estimate_hours(&item.task),
        });
    }

    for decision in &analysis.key_decisions {
        if !is_high_impact(decision) {
            continue;
        }

        let headline: String = decision.decision.chars().take(50).collect();
        tasks.push(TaskAssignment {
            id: uuid::Uuid::new_v4().to_string(),
            title: format!("Implement decision: {}", headline),
            description: format!(
                "Follow-up on high-impact decision. Context: {}",
                decision.context
            ),
            assignee: "Project Manager".to_string(),
            priority: Priority::High,
            due_date: now + Duration::days(7),
            status: TaskStatus::NotStarted,
            project: "General".to_string(),
            tags: vec!["decision-implementation".to_string(), "high-impact".to_string()],
            created_at: now,
            estimated_hours: 4,
        });
    }

    tasks
}

fn is_high_impact(decision: &KeyDecision) -> bool {
    decision.impact.to_lowercase().contains("high")
}

/// Turn a free-text deadline into a concrete due date.
///
/// The buckets are intentionally coarse: meeting transcripts rarely carry
/// machine-parseable dates.
pub fn parse_deadline(deadline: Option<&str>, now: DateTime<Utc>) -> DateTime<Utc> {
    let deadline = match deadline {
        Some(d) if !d.trim().is_empty() => d.to_lowercase(),
        _ => return now + Duration::weeks(2),
    };

    if matches!(deadline.as_str(), "none" | "no deadline" | "tbd") {
        return now + Duration::weeks(2);
    }

    if deadline.contains("week") {
        let weeks = if deadline.contains("two") || deadline.contains('2') {
            2
        } else {
            1
        };
        return now + Duration::weeks(weeks);
    }

    if deadline.contains("day") || deadline.contains("tomorrow") {
        let days = if deadline.contains("tomorrow") {
            1
        } else if deadline.contains("few") {
            3
        } else {
            7
        };
        return now + Duration::days(days);
    }

    if deadline.contains("month") {
        return now + Duration::days(30);
    }

    now + Duration::weeks(1)
}

/// Rough effort estimate in hours from task wording.
fn estimate_hours(task: &str) -> u32 {
    let task = task.to_lowercase();

    if ["research", "analyze", "investigate"].iter().any(|w| task.contains(w)) {
        4
    } else if ["implement", "develop", "create", "build"].iter().any(|w| task.contains(w)) {
        8
    } else if ["review", "check", "verify"].iter().any(|w| task.contains(w)) {
        2
    } else if ["meeting", "discuss", "call"].iter().any(|w| task.contains(w)) {
        1
    } else {
        3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recap_core::ActionItem;

    fn now() -> DateTime<Utc> {
        "2026-03-02T09:00:00Z".parse().unwrap()
    }

    fn analysis_with_items(items: Vec<ActionItem>) -> MeetingAnalysis {
        MeetingAnalysis {
            action_items: items,
            ..Default::default()
        }
    }

    #[test]
    fn test_calendar_events_only_for_deadlined_items() {
        let analysis = analysis_with_items(vec![
            ActionItem::new("write notes"),
            ActionItem::new("ship fix").with_deadline("tomorrow").with_owner("kim"),
        ]);

        let events = plan_calendar_events(&analysis, now());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Follow-up: ship fix");
        assert_eq!(events[0].attendees, vec!["kim"]);
        assert_eq!(events[0].start_time, now() + Duration::days(1));
        assert_eq!(events[0].status, EventStatus::Confirmed);
    }

    #[test]
    fn test_follow_up_meeting_added_for_many_items() {
        let analysis = analysis_with_items(vec![
            ActionItem::new("a").with_owner("kim"),
            ActionItem::new("b").with_owner("kim"),
            ActionItem::new("c").with_owner("lee"),
            ActionItem::new("d"),
        ]);

        let events = plan_calendar_events(&analysis, now());
        let review = events.last().unwrap();
        assert_eq!(review.title, "Action Items Follow-up Meeting");
        assert_eq!(review.status, EventStatus::Tentative);
        // Owners deduplicated.
        assert_eq!(review.attendees, vec!["Unassigned", "kim", "lee"]);
    }

    #[test]
    fn test_task_per_action_item() {
        let analysis = analysis_with_items(vec![
            ActionItem::new("research competitors").with_priority(Priority::High),
            ActionItem::new("book room"),
        ]);

        let tasks = plan_task_assignments(&analysis, now());
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].priority, Priority::High);
        assert_eq!(tasks[0].estimated_hours, 4);
        assert_eq!(tasks[1].assignee, "Unassigned");
        assert_eq!(tasks[1].estimated_hours, 3);
    }

    #[test]
    fn test_high_impact_decisions_spawn_tasks() {
        let analysis = MeetingAnalysis {
            key_decisions: vec![
                KeyDecision {
                    decision: "Migrate billing".to_string(),
                    context: "cost overruns".to_string(),
                    impact: "High impact on revenue".to_string(),
                },
                KeyDecision {
                    decision: "New snack budget".to_string(),
                    impact: "low".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        let tasks = plan_task_assignments(&analysis, now());
        assert_eq!(tasks.len(), 1);
        assert!(tasks[0].title.starts_with("Implement decision: Migrate billing"));
        assert_eq!(tasks[0].priority, Priority::High);
        assert_eq!(tasks[0].due_date, now() + Duration::days(7));
    }

    #[test]
    fn test_parse_deadline_buckets() {
        let n = now();
        assert_eq!(parse_deadline(None, n), n + Duration::weeks(2));
        assert_eq!(parse_deadline(Some("tbd"), n), n + Duration::weeks(2));
        assert_eq!(parse_deadline(Some("next week"), n), n + Duration::weeks(1));
        assert_eq!(parse_deadline(Some("two weeks"), n), n + Duration::weeks(2));
        assert_eq!(parse_deadline(Some("tomorrow"), n), n + Duration::days(1));
        assert_eq!(parse_deadline(Some("in a few days"), n), n + Duration::days(3));
        assert_eq!(parse_deadline(Some("next month"), n), n + Duration::days(30));
        assert_eq!(parse_deadline(Some("by friday"), n), n + Duration::weeks(1));
    }

    #[test]
    fn test_estimate_hours_buckets() {
        assert_eq!(estimate_hours("research the market"), 4);
        assert_eq!(estimate_hours("implement login"), 8);
        assert_eq!(estimate_hours("review the PR"), 2);
        assert_eq!(estimate_hours("schedule a call"), 1);
        assert_eq!(estimate_hours("other work"), 3);
    }
}
