//! The `insights` command.

use super::open_store;
use console::style;
use recap_core::Config;
use recap_index::{meeting_insights, MeetingStore};

/// Print cross-meeting insights.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let store = open_store(&config)?;
    let records = store.list().await?;
    let insights = meeting_insights(&records);

    println!("{}", style("Cross-meeting insights").bold());
    println!("  Meetings analyzed: {}", insights.total_meetings);
    println!("  Action items: {}", insights.total_action_items);

    if insights.common_themes.is_empty() {
        println!("  No recurring themes yet.");
    } else {
        println!("  Recurring themes:");
        for theme in &insights.common_themes {
            println!("    - {}", theme);
        }
    }

    println!();
    println!("{}", style("Recommendations").bold());
    for recommendation in &insights.recommendations {
        println!("  - {}", recommendation);
    }

    Ok(())
}
