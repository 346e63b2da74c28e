use crate::core::decisions::DecisionLog;
use crate::core::error::ExploreError;
use crate::core::likes::LikeEdgeStore;
use crate::core::mutual::MutualIndex;
use crate::models::{LikeEdge, Liker, Page};
use crate::services::SharedBackend;
use std::time::Duration;

/// Stateless orchestrator answering the explore operations
///
/// Holds no graph state of its own: every call reads and writes through the
/// injected backend, so any number of requests may run concurrently.
///
/// # Operations
/// 1. `list_liked_you` - recency-ordered likers of a user
/// 2. `list_new_liked_you` - likers not yet liked back
/// 3. `count_liked_you` - number of distinct likers
/// 4. `put_decision` - record like/pass and report whether it became mutual
#[derive(Clone)]
pub struct ExploreQueryEngine {
    likes: LikeEdgeStore,
    mutual: MutualIndex,
    decisions: DecisionLog,
}

impl ExploreQueryEngine {
    pub fn new(backend: SharedBackend) -> Self {
        Self::with_decision_ttl(backend, None)
    }

    pub fn with_decision_ttl(backend: SharedBackend, decision_ttl: Option<Duration>) -> Self {
        let likes = LikeEdgeStore::new(backend.clone());
        let mutual = MutualIndex::new(likes.clone(), backend.clone());
        let decisions = DecisionLog::with_ttl(backend, decision_ttl);
        Self {
            likes,
            mutual,
            decisions,
        }
    }

    pub fn likes(&self) -> &LikeEdgeStore {
        &self.likes
    }

    pub fn mutual_index(&self) -> &MutualIndex {
        &self.mutual
    }

    pub fn decisions(&self) -> &DecisionLog {
        &self.decisions
    }

    /// Users who liked `recipient_id`, most recent first
    pub async fn list_liked_you(&self, recipient_id: &str, page: Page) -> Result<Vec<Liker>, ExploreError> {
        self.likes
            .list_likers(recipient_id, page)
            .await
            .map_err(|e| ExploreError::storage(format!("list likers of {}", recipient_id), e))
    }

    /// Users who liked `recipient_id` and have not been liked back
    ///
    /// Filters the same page `list_liked_you` returns, so a page may hold fewer
    /// than `page.limit` entries. Recency order is preserved.
    pub async fn list_new_liked_you(&self, recipient_id: &str, page: Page) -> Result<Vec<Liker>, ExploreError> {
        let likers = self
            .likes
            .list_likers(recipient_id, page)
            .await
            .map_err(|e| ExploreError::storage(format!("list new likers of {}", recipient_id), e))?;

        let mut new_likers = Vec::with_capacity(likers.len());
        for liker in likers {
            let is_mutual = self
                .mutual
                .is_mutual(&liker.actor_id, recipient_id)
                .await
                .map_err(|e| {
                    ExploreError::storage(
                        format!("check mutual like of {} and {}", liker.actor_id, recipient_id),
                        e,
                    )
                })?;

            if !is_mutual {
                new_likers.push(liker);
            }
        }

        Ok(new_likers)
    }

    pub async fn count_liked_you(&self, recipient_id: &str) -> Result<u64, ExploreError> {
        self.likes
            .count_likers(recipient_id)
            .await
            .map_err(|e| ExploreError::storage(format!("count likers of {}", recipient_id), e))
    }

    /// Record `actor_id`'s decision about `recipient_id`
    ///
    /// Returns `true` when `actor_id` sits among `recipient_id`'s likers, i.e.
    /// `is_mutual(recipient, actor)`. Keep that argument order: flipping it
    /// changes which direction of reciprocity triggers a mutual. The actor's
    /// own like edge is written beforehand by [`ExploreQueryEngine::record_like`],
    /// not here. The decision write is not rolled back if a later step fails.
    pub async fn put_decision(
        &self,
        actor_id: &str,
        recipient_id: &str,
        liked: bool,
    ) -> Result<bool, ExploreError> {
        self.decisions
            .set_decision(actor_id, recipient_id, liked)
            .await
            .map_err(|e| ExploreError::storage(format!("record decision for actor {}", actor_id), e))?;

        if !liked {
            return Ok(false);
        }

        let is_mutual = self
            .mutual
            .is_mutual(recipient_id, actor_id)
            .await
            .map_err(|e| {
                ExploreError::storage(
                    format!("check mutual like for actor {} and recipient {}", actor_id, recipient_id),
                    e,
                )
            })?;

        if !is_mutual {
            return Ok(false);
        }

        self.mutual
            .record_mutual(actor_id, recipient_id)
            .await
            .map_err(|e| {
                ExploreError::storage(
                    format!("add mutual like for actor {} and recipient {}", actor_id, recipient_id),
                    e,
                )
            })?;

        tracing::info!("Mutual like confirmed: {} <-> {}", actor_id, recipient_id);
        Ok(true)
    }

    /// Record that `actor_id` liked `recipient_id`, at `timestamp` or now
    pub async fn record_like(
        &self,
        recipient_id: &str,
        actor_id: &str,
        timestamp: Option<u64>,
    ) -> Result<LikeEdge, ExploreError> {
        let timestamp = timestamp.unwrap_or_else(unix_now);
        self.likes
            .record_like(recipient_id, actor_id, timestamp)
            .await
            .map_err(|e| {
                ExploreError::storage(format!("record like {} -> {}", actor_id, recipient_id), e)
            })
    }
}

/// Current Unix time in seconds
pub fn unix_now() -> u64 {
    chrono::Utc::now().timestamp().max(0) as u64
}
