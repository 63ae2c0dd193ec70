//! Semantic search handlers.

use crate::state::AppState;
use crate::{ApiError, Result};
use axum::extract::{Path, Query, State};
use axum::Json;
use recap_index::{rank, EmbeddingRecord, RankedResult};
use recap_core::MeetingRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Results returned when looking up meetings similar to a reference.
const SIMILAR_TOP_K: usize = 3;

/// Similarity floor for the similar-meetings lookup.
const SIMILAR_MIN_SCORE: f32 = 0.0;

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Free-text query.
    pub q: String,

    /// Result cap; defaults to the configured top_k.
    pub limit: Option<usize>,

    /// Similarity floor; defaults to the configured min_score.
    pub min_score: Option<f32>,
}

/// One search hit enriched with record metadata.
#[derive(Debug, Serialize)]
pub struct SearchHit {
    pub meeting_id: String,
    pub filename: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub relevance: f32,
    pub snippet: String,
    pub topics: Vec<String>,
    pub action_items_count: usize,
}

/// Search response.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub results: Vec<SearchHit>,

    /// Records excluded for malformed embeddings, surfaced for observability.
    pub skipped: usize,
}

/// Semantic search over stored meetings.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>> {
    if params.q.trim().is_empty() {
        return Err(ApiError::bad_request("Query is required"));
    }

    let top_k = params.limit.unwrap_or(state.config.search.top_k).max(1);
    let min_score = params.min_score.unwrap_or(state.config.search.min_score);

    let query_vector = state.embedder.embed(&params.q).await?;

    let records = state.store.list().await?;
    let candidates: Vec<EmbeddingRecord> = records.iter().map(EmbeddingRecord::from).collect();

    let ranking = rank(&query_vector, &candidates, top_k, min_score);
    debug!(
        query = %params.q,
        results = ranking.results.len(),
        skipped = ranking.skipped,
        "search completed"
    );

    Ok(Json(SearchResponse {
        success: true,
        results: enrich(ranking.results, &records),
        skipped: ranking.skipped,
    }))
}

/// Similar-meetings response.
#[derive(Debug, Serialize)]
pub struct SimilarResponse {
    pub success: bool,
    pub similar_meetings: Vec<SearchHit>,
}

/// Find meetings similar to a reference meeting by embedding proximity.
pub async fn similar_meetings(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SimilarResponse>> {
    let reference = state
        .store
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Meeting not found"))?;

    if !reference.has_embedding() {
        return Ok(Json(SimilarResponse {
            success: true,
            similar_meetings: Vec::new(),
        }));
    }

    let records: Vec<MeetingRecord> = state
        .store
        .list()
        .await?
        .into_iter()
        .filter(|r| r.id != id)
        .collect();
    let candidates: Vec<EmbeddingRecord> = records.iter().map(EmbeddingRecord::from).collect();

    let ranking = rank(
        &reference.embedding,
        &candidates,
        SIMILAR_TOP_K,
        SIMILAR_MIN_SCORE,
    );

    Ok(Json(SimilarResponse {
        success: true,
        similar_meetings: enrich(ranking.results, &records),
    }))
}

/// Join ranked results back to their records for display metadata.
fn enrich(results: Vec<RankedResult>, records: &[MeetingRecord]) -> Vec<SearchHit> {
    let by_id: HashMap<&str, &MeetingRecord> =
        records.iter().map(|r| (r.id.as_str(), r)).collect();

    results
        .into_iter()
        .filter_map(|result| {
            let record = by_id.get(result.record_id.as_str())?;
            Some(SearchHit {
                meeting_id: result.record_id.clone(),
                filename: record.filename.clone(),
                timestamp: record.timestamp,
                relevance: result.score,
                snippet: result.excerpt,
                topics: record.analysis.topics_discussed.clone(),
                action_items_count: record.analysis.action_items.len(),
            })
        })
        .collect()
}
