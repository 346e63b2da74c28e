use crate::models::{LikeEdge, Liker, Page};
use crate::services::{SharedBackend, StoreError, StoreKey};

/// Directed like edges, one sorted collection per recipient
///
/// Members are actor ids scored by the like timestamp, so an actor appears at
/// most once per recipient and re-liking replaces the timestamp.
#[derive(Clone)]
pub struct LikeEdgeStore {
    backend: SharedBackend,
}

impl LikeEdgeStore {
    pub fn new(backend: SharedBackend) -> Self {
        Self { backend }
    }

    /// Upsert the edge `actor_id -> recipient_id`; last write wins
    pub async fn record_like(
        &self,
        recipient_id: &str,
        actor_id: &str,
        timestamp: u64,
    ) -> Result<LikeEdge, StoreError> {
        self.backend
            .upsert_scored(&StoreKey::likes(recipient_id), actor_id, timestamp)
            .await?;

        tracing::debug!("Recorded like: {} -> {} at {}", actor_id, recipient_id, timestamp);

        Ok(LikeEdge {
            recipient_id: recipient_id.to_string(),
            actor_id: actor_id.to_string(),
            timestamp,
        })
    }

    /// Likers of `recipient_id`, most recent first
    ///
    /// An unknown recipient or an offset past the end yields an empty page.
    pub async fn list_likers(&self, recipient_id: &str, page: Page) -> Result<Vec<Liker>, StoreError> {
        let entries = self
            .backend
            .range_by_score_desc(&StoreKey::likes(recipient_id), page.offset, page.limit)
            .await?;

        Ok(entries
            .into_iter()
            .map(|(actor_id, timestamp)| Liker::new(actor_id, timestamp))
            .collect())
    }

    /// Number of distinct actors who ever liked `recipient_id`
    pub async fn count_likers(&self, recipient_id: &str) -> Result<u64, StoreError> {
        self.backend.cardinality(&StoreKey::likes(recipient_id)).await
    }

    /// Timestamp of the edge `actor_id -> recipient_id`, if it exists
    pub async fn liked_at(&self, recipient_id: &str, actor_id: &str) -> Result<Option<u64>, StoreError> {
        self.backend.score(&StoreKey::likes(recipient_id), actor_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::InMemoryBackend;
    use std::sync::Arc;

    fn store() -> LikeEdgeStore {
        LikeEdgeStore::new(Arc::new(InMemoryBackend::new()))
    }

    #[tokio::test]
    async fn test_rerecording_updates_timestamp() {
        let likes = store();
        likes.record_like("r", "a", 100).await.unwrap();
        likes.record_like("r", "a", 50).await.unwrap();

        let likers = likes.list_likers("r", Page::default()).await.unwrap();
        assert_eq!(likers, vec![Liker::new("a", 50)]);
        assert_eq!(likes.count_likers("r").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_is_most_recent_first() {
        let likes = store();
        likes.record_like("r", "old", 1).await.unwrap();
        likes.record_like("r", "new", 3).await.unwrap();
        likes.record_like("r", "mid", 2).await.unwrap();

        let likers = likes.list_likers("r", Page::default()).await.unwrap();
        let actors: Vec<&str> = likers.iter().map(|l| l.actor_id.as_str()).collect();
        assert_eq!(actors, vec!["new", "mid", "old"]);
    }

    #[tokio::test]
    async fn test_offset_and_limit() {
        let likes = store();
        for i in 0..5u64 {
            likes.record_like("r", &format!("user{}", i), i).await.unwrap();
        }

        let page = likes.list_likers("r", Page::new(1, 2)).await.unwrap();
        assert_eq!(page, vec![Liker::new("user3", 3), Liker::new("user2", 2)]);

        let past_end = likes.list_likers("r", Page::new(10, 2)).await.unwrap();
        assert!(past_end.is_empty());
    }

    #[tokio::test]
    async fn test_liked_at() {
        let likes = store();
        likes.record_like("r", "a", 0).await.unwrap();

        assert_eq!(likes.liked_at("r", "a").await.unwrap(), Some(0));
        assert_eq!(likes.liked_at("a", "r").await.unwrap(), None);
    }
}
