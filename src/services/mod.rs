// Service exports
pub mod backend;
pub mod memory_store;
pub mod redis_store;
pub mod seed;

pub use backend::{SharedBackend, StoreBackend, StoreError, StoreKey};
pub use memory_store::InMemoryBackend;
pub use redis_store::RedisBackend;
pub use seed::{populate_test_data, SeedSummary};
