use crate::models::Decision;
use crate::services::{SharedBackend, StoreError, StoreKey};
use std::time::Duration;

/// Latest like/pass decision per (actor, recipient); overwritten, never versioned
#[derive(Clone)]
pub struct DecisionLog {
    backend: SharedBackend,
    ttl: Option<Duration>,
}

impl DecisionLog {
    /// Decisions never expire
    pub fn new(backend: SharedBackend) -> Self {
        Self { backend, ttl: None }
    }

    /// Decisions expire after `ttl`; `None` or a zero duration keeps them forever
    pub fn with_ttl(backend: SharedBackend, ttl: Option<Duration>) -> Self {
        Self {
            backend,
            ttl: ttl.filter(|ttl| !ttl.is_zero()),
        }
    }

    pub async fn set_decision(
        &self,
        actor_id: &str,
        recipient_id: &str,
        liked: bool,
    ) -> Result<(), StoreError> {
        let decision = Decision::from_liked(liked);
        self.backend
            .put(
                &StoreKey::decision(actor_id, recipient_id),
                decision.as_stored(),
                self.ttl,
            )
            .await?;

        tracing::debug!("Recorded decision: {} -> {} ({:?})", actor_id, recipient_id, decision);
        Ok(())
    }

    pub async fn get_decision(
        &self,
        actor_id: &str,
        recipient_id: &str,
    ) -> Result<Option<Decision>, StoreError> {
        let key = StoreKey::decision(actor_id, recipient_id);
        match self.backend.get(&key).await? {
            None => Ok(None),
            Some(raw) => Decision::from_stored(&raw).map(Some).ok_or_else(|| StoreError::Corrupt {
                key,
                reason: format!("unexpected decision value {:?}", raw),
            }),
        }
    }
}
