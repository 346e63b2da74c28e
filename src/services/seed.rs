//! Synthetic likes-graph data for local runs and demos.
//!
//! Users are numbered `1..=num_users`. Each user likes up to 49 random others
//! at the current time, then `num_users / 2` random pairs are made mutual.

use crate::core::{unix_now, ExploreQueryEngine, ExploreError};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Most likes a single seeded user hands out (exclusive)
const MAX_LIKES_PER_USER: u64 = 50;

/// Counts of what the seeder wrote
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedSummary {
    pub likes: u64,
    pub mutual_pairs: u64,
}

/// Planned writes, drawn up front so no RNG is held across awaits
struct SeedPlan {
    likes: Vec<(String, String)>,
    mutual_pairs: Vec<(String, String)>,
}

fn plan<R: Rng>(rng: &mut R, num_users: u64) -> SeedPlan {
    let mut likes = Vec::new();
    let mut mutual_pairs = Vec::new();

    if num_users < 2 {
        return SeedPlan { likes, mutual_pairs };
    }

    for actor in 1..=num_users {
        let count = rng.gen_range(0..MAX_LIKES_PER_USER);
        for _ in 0..count {
            let recipient = rng.gen_range(1..=num_users);
            if recipient != actor {
                likes.push((recipient.to_string(), actor.to_string()));
            }
        }
    }

    for _ in 0..num_users / 2 {
        let actor = rng.gen_range(1..=num_users);
        let recipient = rng.gen_range(1..=num_users);
        if actor != recipient {
            mutual_pairs.push((actor.to_string(), recipient.to_string()));
        }
    }

    SeedPlan { likes, mutual_pairs }
}

/// Populate the store behind `engine` with random likes and mutual pairs
pub async fn populate_test_data(
    engine: &ExploreQueryEngine,
    num_users: u64,
) -> Result<SeedSummary, ExploreError> {
    let plan = plan(&mut rand::thread_rng(), num_users);
    let now = unix_now();
    let mut summary = SeedSummary::default();

    for (recipient, actor) in &plan.likes {
        engine.record_like(recipient, actor, Some(now)).await?;
        summary.likes += 1;
    }

    for (actor, recipient) in &plan.mutual_pairs {
        engine.record_like(actor, recipient, Some(now)).await?;
        engine.record_like(recipient, actor, Some(now)).await?;
        engine
            .mutual_index()
            .record_mutual(actor, recipient)
            .await
            .map_err(|e| {
                ExploreError::storage(format!("seed mutual like {} <-> {}", actor, recipient), e)
            })?;
        summary.likes += 2;
        summary.mutual_pairs += 1;
    }

    tracing::info!(
        "Seeded {} likes and {} mutual pairs across {} users",
        summary.likes,
        summary.mutual_pairs,
        num_users
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::InMemoryBackend;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    #[test]
    fn test_plan_never_self_likes() {
        let mut rng = StdRng::seed_from_u64(7);
        let plan = plan(&mut rng, 20);

        assert!(plan.likes.iter().all(|(r, a)| r != a));
        assert!(plan.mutual_pairs.iter().all(|(a, r)| a != r));
        assert!(plan.mutual_pairs.len() <= 10);
    }

    #[test]
    fn test_plan_too_few_users() {
        let mut rng = StdRng::seed_from_u64(7);
        let plan = plan(&mut rng, 1);
        assert!(plan.likes.is_empty());
        assert!(plan.mutual_pairs.is_empty());
    }

    #[tokio::test]
    async fn test_seeded_pairs_are_mutual() {
        let engine = ExploreQueryEngine::new(Arc::new(InMemoryBackend::new()));
        let summary = populate_test_data(&engine, 30).await.unwrap();
        assert!(summary.likes >= summary.mutual_pairs * 2);

        // Every confirmed marker written by the seeder is backed by both edges
        for a in 1..=30u64 {
            for b in 1..=30u64 {
                let (a, b) = (a.to_string(), b.to_string());
                if engine.mutual_index().is_confirmed(&a, &b).await.unwrap() {
                    assert!(engine.mutual_index().is_mutual(&a, &b).await.unwrap());
                    assert!(engine.mutual_index().is_mutual(&b, &a).await.unwrap());
                }
            }
        }
    }
}
