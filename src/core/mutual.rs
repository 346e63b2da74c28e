use crate::core::likes::LikeEdgeStore;
use crate::services::{SharedBackend, StoreError, StoreKey};

/// Flag stored in each confirmed mutual marker set
const MUTUAL_FLAG: &str = "1";

/// Mutual-like detection and the confirmed-mutual log
///
/// Detection reads the like edges only. The markers written by
/// [`MutualIndex::record_mutual`] are for downstream consumers and are never
/// consulted by [`MutualIndex::is_mutual`].
#[derive(Clone)]
pub struct MutualIndex {
    likes: LikeEdgeStore,
    backend: SharedBackend,
}

impl MutualIndex {
    pub fn new(likes: LikeEdgeStore, backend: SharedBackend) -> Self {
        Self { likes, backend }
    }

    /// True iff `other_id` is among the recorded likers of `user_id`
    pub async fn is_mutual(&self, user_id: &str, other_id: &str) -> Result<bool, StoreError> {
        Ok(self.likes.liked_at(user_id, other_id).await?.is_some())
    }

    /// Write the symmetric markers for the pair; idempotent
    pub async fn record_mutual(&self, user_id: &str, other_id: &str) -> Result<(), StoreError> {
        let forward = StoreKey::mutual(user_id, other_id);
        let backward = StoreKey::mutual(other_id, user_id);

        let (first, second) = tokio::join!(
            self.backend.set_add(&forward, MUTUAL_FLAG),
            self.backend.set_add(&backward, MUTUAL_FLAG),
        );

        match (first, second) {
            (Ok(()), Ok(())) => {
                tracing::debug!("Recorded mutual like: {} <-> {}", user_id, other_id);
                Ok(())
            }
            (Err(e), Ok(())) | (Ok(()), Err(e)) => Err(e),
            (Err(a), Err(b)) => Err(StoreError::Aggregate(vec![a, b])),
        }
    }

    /// Whether a confirmed mutual marker exists for the ordered pair
    pub async fn is_confirmed(&self, user_id: &str, other_id: &str) -> Result<bool, StoreError> {
        self.backend
            .set_contains(&StoreKey::mutual(user_id, other_id), MUTUAL_FLAG)
            .await
    }
}
