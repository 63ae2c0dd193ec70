//! The `list` and `show` commands.

use super::open_store;
use console::style;
use recap_core::{truncate_summary, Config};
use recap_index::MeetingStore;

/// List stored meetings.
pub async fn run_list(config: Config) -> anyhow::Result<()> {
    let store = open_store(&config)?;
    let records = store.list().await?;

    if records.is_empty() {
        println!("No meetings stored yet.");
        return Ok(());
    }

    for record in &records {
        println!(
            "{} {} {}",
            style(&record.id).dim(),
            style(&record.title).bold(),
            style(record.timestamp.format("%Y-%m-%d %H:%M")).dim()
        );
        let summary = truncate_summary(&record.analysis.summary, 120);
        if !summary.is_empty() {
            println!("   {}", summary);
        }
    }

    println!();
    println!("{} meeting(s)", records.len());

    Ok(())
}

/// Show one meeting in full.
pub async fn run_show(config: Config, id: &str) -> anyhow::Result<()> {
    let store = open_store(&config)?;
    let record = store
        .list()
        .await?
        .into_iter()
        .find(|r| r.id == id || r.id.starts_with(id))
        .ok_or_else(|| anyhow::anyhow!("meeting not found: {}", id))?;

    println!("{} {}", style("Meeting").bold(), record.id);
    println!("  {}: {}", style("Title").bold(), record.title);
    println!("  {}: {}", style("File").bold(), record.filename);
    println!("  {}: {}", style("Recorded").bold(), record.timestamp);

    if !record.attendees.is_empty() {
        println!("  {}: {}", style("Attendees").bold(), record.attendees.join(", "));
    }

    println!();
    println!("{}", style("Summary").bold());
    println!("{}", record.analysis.summary);

    if !record.analysis.key_decisions.is_empty() {
        println!();
        println!("{}", style("Key decisions").bold());
        for decision in &record.analysis.key_decisions {
            println!("  - {}", decision.decision);
        }
    }

    if !record.analysis.action_items.is_empty() {
        println!();
        println!("{}", style("Action items").bold());
        for item in &record.analysis.action_items {
            let owner = item.owner.as_deref().unwrap_or("unassigned");
            println!("  - {} ({}, {})", item.task, owner, item.priority.as_str());
        }
    }

    if !record.analysis.topics_discussed.is_empty() {
        println!();
        println!(
            "{}: {}",
            style("Topics").bold(),
            record.analysis.topics_discussed.join(", ")
        );
    }

    if let Some(url) = &record.visual_url {
        println!();
        println!("{}: {}", style("Visual").bold(), url);
    }

    Ok(())
}
