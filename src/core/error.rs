use crate::services::StoreError;
use thiserror::Error;

/// Errors surfaced by the explore query engine
#[derive(Debug, Error)]
pub enum ExploreError {
    /// The backing store could not be reached or rejected the command.
    /// The call is aborted; earlier steps of the same call are not rolled back.
    #[error("Storage unavailable during {operation}: {source}")]
    StorageUnavailable {
        operation: String,
        #[source]
        source: StoreError,
    },
}

impl ExploreError {
    pub fn storage(operation: impl Into<String>, source: StoreError) -> Self {
        ExploreError::StorageUnavailable {
            operation: operation.into(),
            source,
        }
    }

    pub fn operation(&self) -> &str {
        match self {
            ExploreError::StorageUnavailable { operation, .. } => operation,
        }
    }
}
