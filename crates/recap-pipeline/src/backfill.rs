//! Startup embedding backfill for records persisted before embeddings
//! existed, or whose embedding call failed at processing time.

use crate::Result;
use recap_index::MeetingStore;
use recap_providers::Embedder;
use tracing::{info, warn};

/// Generate embeddings for stored records that lack one.
///
/// Failures are logged and skipped so one bad record cannot block startup;
/// the record keeps its empty embedding and stays excluded from ranking.
/// Returns the number of records updated.
pub async fn backfill_embeddings(
    store: &dyn MeetingStore,
    embedder: &dyn Embedder,
) -> Result<usize> {
    let records = store.list().await?;
    let mut updated = 0;

    for mut record in records {
        if record.has_embedding() || record.transcript.trim().is_empty() {
            continue;
        }

        match embedder.embed(&record.transcript).await {
            Ok(embedding) => {
                record.embedding = embedding;
                let id = record.id.clone();
                store.update(record).await?;
                info!(id = %id, "backfilled embedding");
                updated += 1;
            }
            Err(e) => {
                warn!(id = %record.id, error = %e, "embedding backfill failed, skipping record");
            }
        }
    }

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use recap_core::{MeetingAnalysis, MeetingRecord};
    use recap_index::MemoryStore;
    use recap_providers::ProviderError;

    struct FixedEmbedder {
        fail: bool,
    }

    #[async_trait]
    impl Embedder for FixedEmbedder {
        fn dimension(&self) -> usize {
            2
        }

        async fn embed(&self, _text: &str) -> std::result::Result<Vec<f32>, ProviderError> {
            if self.fail {
                Err(ProviderError::internal("down"))
            } else {
                Ok(vec![0.5, 0.5])
            }
        }
    }

    fn record(transcript: &str, embedding: Vec<f32>) -> MeetingRecord {
        MeetingRecord::new("m", "m.mp3", transcript, MeetingAnalysis::default(), embedding)
    }

    #[tokio::test]
    async fn test_backfill_fills_missing_embeddings_only() {
        let store = MemoryStore::new();
        store.append(record("has one", vec![1.0, 0.0])).await.unwrap();
        store.append(record("needs one", vec![])).await.unwrap();
        store.append(record("", vec![])).await.unwrap(); // no transcript

        let updated = backfill_embeddings(&store, &FixedEmbedder { fail: false })
            .await
            .unwrap();
        assert_eq!(updated, 1);

        let records = store.list().await.unwrap();
        assert_eq!(records[0].embedding, vec![1.0, 0.0]);
        assert_eq!(records[1].embedding, vec![0.5, 0.5]);
        assert!(records[2].embedding.is_empty());
    }

    #[tokio::test]
    async fn test_backfill_failure_skips_record() {
        let store = MemoryStore::new();
        store.append(record("needs one", vec![])).await.unwrap();

        let updated = backfill_embeddings(&store, &FixedEmbedder { fail: true })
            .await
            .unwrap();
        assert_eq!(updated, 0);
        assert!(store.list().await.unwrap()[0].embedding.is_empty());
    }
}
