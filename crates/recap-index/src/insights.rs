//! Cross-meeting insight aggregation.

use recap_core::MeetingRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maximum common themes reported.
const MAX_THEMES: usize = 5;

/// Aggregated view across all stored meetings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossMeetingInsights {
    /// Topics recurring across more than one meeting, most frequent first.
    pub common_themes: Vec<String>,

    /// Total stored meetings.
    pub total_meetings: usize,

    /// Total action items across all meetings.
    pub total_action_items: usize,

    /// Follow-up recommendations.
    pub recommendations: Vec<String>,
}

/// Compute cross-meeting insights from a record snapshot.
///
/// Pure aggregation: topic strings are case-folded and counted, and only
/// topics appearing in more than one place qualify as common themes.
pub fn meeting_insights(records: &[MeetingRecord]) -> CrossMeetingInsights {
    if records.is_empty() {
        return CrossMeetingInsights {
            common_themes: Vec::new(),
            total_meetings: 0,
            total_action_items: 0,
            recommendations: vec!["No meetings to analyze".to_string()],
        };
    }

    let mut topic_counts: HashMap<String, usize> = HashMap::new();
    let mut total_action_items = 0;

    for record in records {
        for topic in &record.analysis.topics_discussed {
            let key = topic.trim().to_lowercase();
            if !key.is_empty() {
                *topic_counts.entry(key).or_insert(0) += 1;
            }
        }
        total_action_items += record.analysis.action_items.len();
    }

    let mut recurring: Vec<(String, usize)> = topic_counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .collect();
    // Count descending, then alphabetical so output is deterministic.
    recurring.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let common_themes = recurring
        .into_iter()
        .take(MAX_THEMES)
        .map(|(topic, _)| topic)
        .collect();

    CrossMeetingInsights {
        common_themes,
        total_meetings: records.len(),
        total_action_items,
        recommendations: vec![
            "Consider consolidating meetings on similar topics".to_string(),
            "Review recurring action items for process improvements".to_string(),
            "Set up automated follow-ups for high-priority items".to_string(),
        ],
    }
}
