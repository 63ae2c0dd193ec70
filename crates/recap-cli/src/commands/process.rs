//! The `process` command.

use super::{open_store, openai_client};
use clap::Args;
use console::style;
use recap_core::Config;
use recap_pipeline::MeetingPipeline;
use std::path::PathBuf;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Audio file to process
    pub file: PathBuf,

    /// Meeting title
    #[arg(long)]
    pub title: Option<String>,

    /// Comma-separated attendee names
    #[arg(long, value_delimiter = ',')]
    pub attendees: Vec<String>,
}

/// Process a local recording through the full pipeline.
pub async fn run(args: ProcessArgs, config: Config) -> anyhow::Result<()> {
    anyhow::ensure!(args.file.exists(), "file not found: {}", args.file.display());

    recap_core::paths::ensure_dirs()?;

    let client = openai_client(&config)?;
    let store = open_store(&config)?;
    let pipeline = MeetingPipeline::new(
        client.clone(),
        client.clone(),
        client.clone(),
        client,
        store,
    );

    println!("Processing {}...", style(args.file.display()).cyan());

    let record = pipeline
        .process_file(&args.file, args.title, args.attendees)
        .await?;

    println!();
    println!("{} {}", style("Stored meeting").green().bold(), record.id);
    println!("  {}: {}", style("Title").bold(), record.title);
    println!("  {}: {}", style("Summary").bold(), record.analysis.summary);

    if !record.analysis.action_items.is_empty() {
        println!("  {}:", style("Action items").bold());
        for item in &record.analysis.action_items {
            let owner = item.owner.as_deref().unwrap_or("unassigned");
            println!("    - {} ({}, {})", item.task, owner, item.priority.as_str());
        }
    }

    if let Some(url) = &record.visual_url {
        println!("  {}: {}", style("Visual").bold(), url);
    }

    Ok(())
}
