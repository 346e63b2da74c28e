use crate::services::backend::{StoreBackend, StoreError};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use std::time::Duration;

/// Redis implementation of the store backend
///
/// Likes live in sorted sets, mutual markers in sets and decisions in plain
/// string keys. The connection manager is multiplexed, so every call works on
/// its own clone and concurrent requests never wait on each other.
#[derive(Clone)]
pub struct RedisBackend {
    redis: ConnectionManager,
}

impl RedisBackend {
    /// Connect to Redis at `redis_url`
    pub async fn new(redis_url: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(redis_url)?;
        let redis = ConnectionManager::new(client).await?;
        Ok(Self { redis })
    }

    fn conn(&self) -> ConnectionManager {
        self.redis.clone()
    }
}

/// Redis keeps scores as doubles; timestamps are whole, non-negative seconds.
fn decode_score(key: &str, score: f64) -> Result<u64, StoreError> {
    if !score.is_finite() || score < 0.0 {
        return Err(StoreError::Corrupt {
            key: key.to_string(),
            reason: format!("score {} is not a valid timestamp", score),
        });
    }
    Ok(score as u64)
}

#[async_trait]
impl StoreBackend for RedisBackend {
    async fn upsert_scored(&self, key: &str, member: &str, score: u64) -> Result<(), StoreError> {
        let mut conn = self.conn();
        let _: () = redis::cmd("ZADD")
            .arg(key)
            .arg(score)
            .arg(member)
            .query_async(&mut conn)
            .await?;
        tracing::trace!("ZADD {} {} {}", key, score, member);
        Ok(())
    }

    async fn range_by_score_desc(
        &self,
        key: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<(String, u64)>, StoreError> {
        let mut conn = self.conn();
        let offset = offset.min(i64::MAX as u64);
        let limit = limit.min(i64::MAX as u64);
        let raw: Vec<(String, f64)> = redis::cmd("ZREVRANGEBYSCORE")
            .arg(key)
            .arg("+inf")
            .arg("-inf")
            .arg("WITHSCORES")
            .arg("LIMIT")
            .arg(offset)
            .arg(limit)
            .query_async(&mut conn)
            .await?;

        raw.into_iter()
            .map(|(member, score)| Ok((member, decode_score(key, score)?)))
            .collect()
    }

    async fn score(&self, key: &str, member: &str) -> Result<Option<u64>, StoreError> {
        let mut conn = self.conn();
        let score: Option<f64> = redis::cmd("ZSCORE")
            .arg(key)
            .arg(member)
            .query_async(&mut conn)
            .await?;
        score.map(|s| decode_score(key, s)).transpose()
    }

    async fn cardinality(&self, key: &str) -> Result<u64, StoreError> {
        let mut conn = self.conn();
        let count: u64 = redis::cmd("ZCARD").arg(key).query_async(&mut conn).await?;
        Ok(count)
    }

    async fn set_add(&self, key: &str, member: &str) -> Result<(), StoreError> {
        let mut conn = self.conn();
        let _: () = redis::cmd("SADD")
            .arg(key)
            .arg(member)
            .query_async(&mut conn)
            .await?;
        Ok(())
    }

    async fn set_contains(&self, key: &str, member: &str) -> Result<bool, StoreError> {
        let mut conn = self.conn();
        let present: bool = redis::cmd("SISMEMBER")
            .arg(key)
            .arg(member)
            .query_async(&mut conn)
            .await?;
        Ok(present)
    }

    async fn put(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), StoreError> {
        let mut conn = self.conn();
        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value);
        if let Some(ttl) = ttl {
            cmd.arg("EX").arg(ttl.as_secs().max(1));
        }
        let _: () = cmd.query_async(&mut conn).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.conn();
        let value: Option<String> = redis::cmd("GET").arg(key).query_async(&mut conn).await?;
        Ok(value)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.conn();
        let reply: String = redis::cmd("PING").query_async(&mut conn).await?;
        check_pong(&reply)
    }
}

fn check_pong(reply: &str) -> Result<(), StoreError> {
    if reply.eq_ignore_ascii_case("PONG") {
        Ok(())
    } else {
        Err(StoreError::Unavailable(format!("unexpected PING reply: {}", reply)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::backend::StoreKey;

    #[test]
    fn test_decode_score() {
        assert_eq!(decode_score("likes:a", 1633036800.0).unwrap(), 1633036800);
        assert!(decode_score("likes:a", -1.0).is_err());
        assert!(decode_score("likes:a", f64::NAN).is_err());
    }

    #[test]
    fn test_scores_above_2_pow_53_lose_precision() {
        let exact = 1u64 << 53;
        assert_eq!(decode_score("likes:a", exact as f64).unwrap(), exact);
        // 2^53 + 1 has no f64 representation and rounds down
        assert_eq!(decode_score("likes:a", (exact + 1) as f64).unwrap(), exact);
    }

    #[test]
    fn test_check_pong() {
        assert!(check_pong("PONG").is_ok());
        assert!(matches!(check_pong("LOADING"), Err(StoreError::Unavailable(_))));
    }

    #[tokio::test]
    #[ignore = "Requires Redis"]
    async fn test_redis_sorted_set_roundtrip() {
        let backend = RedisBackend::new("redis://127.0.0.1:6379")
            .await
            .expect("Failed to connect to Redis");

        let key = StoreKey::likes("redis_test_recipient");
        backend.upsert_scored(&key, "user1", 100).await.unwrap();
        backend.upsert_scored(&key, "user2", 200).await.unwrap();
        backend.upsert_scored(&key, "user1", 300).await.unwrap();

        let page = backend.range_by_score_desc(&key, 0, 10).await.unwrap();
        assert_eq!(
            page,
            vec![("user1".to_string(), 300), ("user2".to_string(), 200)]
        );
        assert_eq!(backend.cardinality(&key).await.unwrap(), 2);
        assert_eq!(backend.score(&key, "user3").await.unwrap(), None);
    }
}
