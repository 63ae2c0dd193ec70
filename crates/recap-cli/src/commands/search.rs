//! The `search` command.

use super::{open_store, openai_client};
use clap::Args;
use console::style;
use recap_core::Config;
use recap_index::{rank, EmbeddingRecord, MeetingStore};
use recap_providers::Embedder;

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Free-text query
    pub query: String,

    /// Maximum results
    #[arg(long)]
    pub limit: Option<usize>,

    /// Similarity floor in [-1, 1]
    #[arg(long)]
    pub min_score: Option<f32>,
}

/// Search stored meetings by semantic similarity.
pub async fn run(args: SearchArgs, config: Config) -> anyhow::Result<()> {
    anyhow::ensure!(!args.query.trim().is_empty(), "query cannot be empty");

    let client = openai_client(&config)?;
    let store = open_store(&config)?;

    let top_k = args.limit.unwrap_or(config.search.top_k).max(1);
    let min_score = args.min_score.unwrap_or(config.search.min_score);

    let query_vector = client.embed(&args.query).await?;
    let records = store.list().await?;
    let candidates: Vec<EmbeddingRecord> = records.iter().map(EmbeddingRecord::from).collect();

    let ranking = rank(&query_vector, &candidates, top_k, min_score);

    if ranking.results.is_empty() {
        println!("No matches for {}", style(&args.query).cyan());
        return Ok(());
    }

    for (i, result) in ranking.results.iter().enumerate() {
        let title = records
            .iter()
            .find(|r| r.id == result.record_id)
            .map(|r| r.title.as_str())
            .unwrap_or("(unknown)");

        println!(
            "{} {} {}",
            style(format!("{}.", i + 1)).dim(),
            style(title).bold(),
            style(format!("({:.3})", result.score)).dim()
        );
        if !result.excerpt.is_empty() {
            println!("   {}", result.excerpt);
        }
    }

    if ranking.skipped > 0 {
        println!(
            "{}",
            style(format!(
                "{} record(s) skipped for malformed embeddings",
                ranking.skipped
            ))
            .yellow()
        );
    }

    Ok(())
}
