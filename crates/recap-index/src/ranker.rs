//! Cosine-similarity ranking of embedding records.

use recap_core::MeetingRecord;
use serde::{Deserialize, Serialize};

/// Default maximum results per query.
pub const DEFAULT_TOP_K: usize = 5;

/// Default similarity floor.
pub const DEFAULT_MIN_SCORE: f32 = 0.1;

/// Characters of source text carried into a ranked result.
pub const EXCERPT_LEN: usize = 200;

/// A ranking candidate: one stored item's id, embedding, and source text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRecord {
    /// Unique identifier of the underlying record.
    pub id: String,

    /// Embedding vector. Expected to match the query dimensionality;
    /// mismatched records are skipped during ranking.
    pub vector: Vec<f32>,

    /// Source text the excerpt is taken from.
    pub text: String,

    /// Creation timestamp of the underlying record.
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl EmbeddingRecord {
    /// Create a new candidate.
    pub fn new(id: impl Into<String>, vector: Vec<f32>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            vector,
            text: text.into(),
            created_at: chrono::Utc::now(),
        }
    }
}

impl From<&MeetingRecord> for EmbeddingRecord {
    fn from(record: &MeetingRecord) -> Self {
        Self {
            id: record.id.clone(),
            vector: record.embedding.clone(),
            text: record.analysis.summary.clone(),
            created_at: record.timestamp,
        }
    }
}

/// One ranked search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    /// Id of the matched record.
    pub record_id: String,

    /// Cosine similarity in [-1, 1].
    pub score: f32,

    /// Leading characters of the record's source text.
    pub excerpt: String,
}

/// Output of a ranking pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ranking {
    /// Hits at or above the similarity floor, best first.
    pub results: Vec<RankedResult>,

    /// Candidates excluded for dimensionality mismatch.
    pub skipped: usize,
}

/// Compute cosine similarity between two vectors.
///
/// Mismatched lengths and zero-magnitude vectors score 0.0 rather than
/// erroring. The result is clamped to [-1, 1] against float drift.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
}

/// Rank candidates against a query vector.
///
/// Candidates whose vector length differs from the query's are skipped and
/// counted, never fatal. Survivors scoring below `min_score` are dropped,
/// the rest are sorted by score descending (stable, so exact ties keep
/// insertion order) and truncated to `top_k`. Pure and deterministic:
/// identical inputs produce identical output.
pub fn rank(
    query: &[f32],
    records: &[EmbeddingRecord],
    top_k: usize,
    min_score: f32,
) -> Ranking {
    let mut skipped = 0;
    let mut scored: Vec<(&EmbeddingRecord, f32)> = Vec::with_capacity(records.len());

    for record in records {
        if record.vector.len() != query.len() {
            skipped += 1;
            continue;
        }

        let score = cosine_similarity(query, &record.vector);
        if score < min_score {
            continue;
        }

        scored.push((record, score));
    }

    // Stable sort keeps insertion order on exact ties.
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(top_k);

    let results = scored
        .into_iter()
        .map(|(record, score)| RankedResult {
            record_id: record.id.clone(),
            score,
            excerpt: record.text.chars().take(EXCERPT_LEN).collect(),
        })
        .collect();

    Ranking { results, skipped }
}
