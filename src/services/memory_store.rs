//! In-memory store backend with the same ordering and overwrite semantics as Redis.

use crate::services::backend::{StoreBackend, StoreError};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

struct StoredValue {
    value: String,
    expires_at: Option<Instant>,
}

impl StoredValue {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |at| now < at)
    }
}

/// Process-local backend for tests, benchmarks and Redis-less local runs.
/// Each primitive takes a single lock, giving single-key atomicity.
#[derive(Default)]
pub struct InMemoryBackend {
    /// key -> member -> score
    sorted: RwLock<HashMap<String, HashMap<String, u64>>>,
    sets: RwLock<HashMap<String, HashSet<String>>>,
    values: RwLock<HashMap<String, StoredValue>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StoreBackend for InMemoryBackend {
    async fn upsert_scored(&self, key: &str, member: &str, score: u64) -> Result<(), StoreError> {
        let mut sorted = self.sorted.write().await;
        sorted
            .entry(key.to_string())
            .or_default()
            .insert(member.to_string(), score);
        Ok(())
    }

    async fn range_by_score_desc(
        &self,
        key: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<(String, u64)>, StoreError> {
        let sorted = self.sorted.read().await;
        let Some(members) = sorted.get(key) else {
            return Ok(Vec::new());
        };

        let mut entries: Vec<(String, u64)> = members
            .iter()
            .map(|(member, score)| (member.clone(), *score))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));

        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(entries.into_iter().skip(offset).take(limit).collect())
    }

    async fn score(&self, key: &str, member: &str) -> Result<Option<u64>, StoreError> {
        let sorted = self.sorted.read().await;
        Ok(sorted.get(key).and_then(|m| m.get(member)).copied())
    }

    async fn cardinality(&self, key: &str) -> Result<u64, StoreError> {
        let sorted = self.sorted.read().await;
        Ok(sorted.get(key).map_or(0, |m| m.len() as u64))
    }

    async fn set_add(&self, key: &str, member: &str) -> Result<(), StoreError> {
        let mut sets = self.sets.write().await;
        sets.entry(key.to_string())
            .or_default()
            .insert(member.to_string());
        Ok(())
    }

    async fn set_contains(&self, key: &str, member: &str) -> Result<bool, StoreError> {
        let sets = self.sets.read().await;
        Ok(sets.get(key).is_some_and(|s| s.contains(member)))
    }

    async fn put(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), StoreError> {
        let mut values = self.values.write().await;
        values.insert(
            key.to_string(),
            StoredValue {
                value: value.to_string(),
                expires_at: ttl.map(|ttl| Instant::now() + ttl),
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self.values.read().await;
        let now = Instant::now();
        Ok(values
            .get(key)
            .filter(|stored| stored.is_live(now))
            .map(|stored| stored.value.clone()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
