use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the backing store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Corrupt value at {key}: {reason}")]
    Corrupt { key: String, reason: String },

    #[error("Multiple store errors: {}", join_errors(.0))]
    Aggregate(Vec<StoreError>),
}

fn join_errors(errors: &[StoreError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Storage primitives required by the likes graph
///
/// Any store offering these suffices. Sorted collections are keyed by a string
/// and hold members with an unsigned score; ranges come back highest score first,
/// with ties ordered by member descending.
#[async_trait]
pub trait StoreBackend: Send + Sync {
    /// Insert `member` into the sorted collection at `key`, or replace its score.
    ///
    /// Redis stores scores as f64, so [`RedisBackend`](crate::services::RedisBackend)
    /// keeps values up to 2^53 exactly and rounds larger ones. The in-memory backend
    /// stores the full u64; do not rely on that exactness across backends.
    async fn upsert_scored(&self, key: &str, member: &str, score: u64) -> Result<(), StoreError>;

    /// Members of the sorted collection by score descending, paginated.
    async fn range_by_score_desc(
        &self,
        key: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<(String, u64)>, StoreError>;

    /// Score of a single member, `None` when absent.
    async fn score(&self, key: &str, member: &str) -> Result<Option<u64>, StoreError>;

    /// Number of members in the sorted collection; 0 for a missing key.
    async fn cardinality(&self, key: &str) -> Result<u64, StoreError>;

    /// Add `member` to the set at `key`. Adding an existing member is a no-op.
    async fn set_add(&self, key: &str, member: &str) -> Result<(), StoreError>;

    async fn set_contains(&self, key: &str, member: &str) -> Result<bool, StoreError>;

    /// Overwrite the value at `key`; `ttl` of `None` means no expiry.
    async fn put(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), StoreError>;

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Liveness check
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Backend handle shared by every component and request
pub type SharedBackend = Arc<dyn StoreBackend>;

/// Key layout of the likes graph
pub struct StoreKey;

impl StoreKey {
    /// Sorted set of actors who liked `recipient_id`, scored by timestamp
    pub fn likes(recipient_id: &str) -> String {
        format!("likes:{}", recipient_id)
    }

    /// Confirmed mutual marker for the ordered pair
    pub fn mutual(user_id: &str, other_user_id: &str) -> String {
        format!("mutual:{}:{}", user_id, other_user_id)
    }

    /// Latest decision `actor_id` made about `recipient_id`
    pub fn decision(actor_id: &str, recipient_id: &str) -> String {
        format!("decision:{}:{}", actor_id, recipient_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_key_builder() {
        assert_eq!(StoreKey::likes("user123"), "likes:user123");
        assert_eq!(StoreKey::mutual("a", "b"), "mutual:a:b");
        assert_eq!(StoreKey::decision("a", "b"), "decision:a:b");
    }

    #[test]
    fn test_aggregate_error_message() {
        let err = StoreError::Aggregate(vec![
            StoreError::Unavailable("first".to_string()),
            StoreError::Unavailable("second".to_string()),
        ]);
        assert_eq!(
            err.to_string(),
            "Multiple store errors: Store unavailable: first; Store unavailable: second"
        );
    }
}
