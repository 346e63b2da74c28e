//! Lume Explore - likes-graph service for Lume dating app
//!
//! Tracks directed likes between users and answers who liked whom, who has
//! not been liked back, how many likes a user has, and records like/pass
//! decisions while detecting mutual likes. All state lives in a pluggable
//! store backend (Redis in production, in-memory for tests).

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{DecisionLog, ExploreError, ExploreQueryEngine, LikeEdgeStore, MutualIndex};
pub use crate::models::{Decision, LikeEdge, Liker, Page};
pub use crate::services::{InMemoryBackend, RedisBackend, SharedBackend, StoreBackend, StoreError};
