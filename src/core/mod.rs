// Core likes-graph exports
pub mod decisions;
pub mod engine;
pub mod error;
pub mod likes;
pub mod mutual;

pub use decisions::DecisionLog;
pub use engine::{unix_now, ExploreQueryEngine};
pub use error::ExploreError;
pub use likes::LikeEdgeStore;
pub use mutual::MutualIndex;
