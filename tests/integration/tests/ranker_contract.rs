//! Ranking contract integration tests.
//!
//! These tests pin the observable behavior of the similarity ranker:
//! result caps, score floors, ordering, dimensionality handling, and
//! determinism.

use recap_index::{rank, EmbeddingRecord, DEFAULT_MIN_SCORE, DEFAULT_TOP_K};

fn record(id: &str, vector: Vec<f32>) -> EmbeddingRecord {
    EmbeddingRecord::new(id, vector, format!("summary for {}", id))
}

#[test]
fn test_results_capped_sorted_and_floored() {
    let records: Vec<EmbeddingRecord> = (0..20)
        .map(|i| {
            let x = i as f32 / 20.0;
            record(&format!("r{}", i), vec![x, 1.0 - x])
        })
        .collect();

    let ranking = rank(&[1.0, 0.0], &records, 4, 0.3);

    assert!(ranking.results.len() <= 4);
    for result in &ranking.results {
        assert!(result.score >= 0.3);
    }
    for pair in ranking.results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn test_empty_candidate_set_is_empty_result() {
    let ranking = rank(&[1.0, 0.0, 0.0], &[], DEFAULT_TOP_K, DEFAULT_MIN_SCORE);
    assert!(ranking.results.is_empty());
    assert_eq!(ranking.skipped, 0);
}

#[test]
fn test_mismatched_dimensionality_never_appears() {
    let records = vec![
        record("matching", vec![1.0, 0.0]),
        record("short", vec![1.0]),
        record("long", vec![1.0, 0.0, 0.0]),
        record("empty", vec![]),
    ];

    let ranking = rank(&[1.0, 0.0], &records, 10, -1.0);

    let ids: Vec<&str> = ranking.results.iter().map(|r| r.record_id.as_str()).collect();
    assert_eq!(ids, vec!["matching"]);
    assert_eq!(ranking.skipped, 3);
}

#[test]
fn test_self_similarity_is_one() {
    let v = vec![0.12, -0.8, 3.4, 0.0];
    let ranking = rank(&v, &[record("self", v.clone())], 1, -1.0);
    assert_eq!(ranking.results.len(), 1);
    assert!((ranking.results[0].score - 1.0).abs() < 1e-6);
}

#[test]
fn test_exact_ties_keep_insertion_order() {
    let records = vec![
        record("earlier", vec![2.0, 0.0]),
        record("later", vec![4.0, 0.0]), // same direction, same cosine
    ];

    let ranking = rank(&[1.0, 0.0], &records, 2, -1.0);
    let ids: Vec<&str> = ranking.results.iter().map(|r| r.record_id.as_str()).collect();
    assert_eq!(ids, vec!["earlier", "later"]);
}

#[test]
fn test_worked_example() {
    // query [1,0] against A:[1,0], B:[0,1], C:[-1,0] with floor 0.0, top 2
    let records = vec![
        record("a", vec![1.0, 0.0]),
        record("b", vec![0.0, 1.0]),
        record("c", vec![-1.0, 0.0]),
    ];

    let ranking = rank(&[1.0, 0.0], &records, 2, 0.0);

    assert_eq!(ranking.results.len(), 2);
    assert_eq!(ranking.results[0].record_id, "a");
    assert!((ranking.results[0].score - 1.0).abs() < 1e-6);
    assert_eq!(ranking.results[1].record_id, "b");
    assert!(ranking.results[1].score.abs() < 1e-6);
}

#[test]
fn test_repeat_calls_are_identical() {
    let records = vec![
        record("a", vec![0.7, 0.7, 0.1]),
        record("b", vec![0.0, 0.2, 0.9]),
        record("c", vec![0.5, 0.5, 0.5]),
        record("bad", vec![1.0]),
    ];
    let query = vec![0.3, 0.3, 0.9];

    let first = rank(&query, &records, 3, 0.0);
    let second = rank(&query, &records, 3, 0.0);

    assert_eq!(first.results, second.results);
    assert_eq!(first.skipped, second.skipped);
}

#[test]
fn test_zero_norm_vectors_score_zero() {
    let records = vec![record("zero", vec![0.0, 0.0])];

    // A zero-norm candidate scores 0.0: above a -1 floor, below a 0.1 floor.
    let kept = rank(&[1.0, 0.0], &records, 1, -1.0);
    assert_eq!(kept.results.len(), 1);
    assert_eq!(kept.results[0].score, 0.0);

    let floored = rank(&[1.0, 0.0], &records, 1, DEFAULT_MIN_SCORE);
    assert!(floored.results.is_empty());
}
