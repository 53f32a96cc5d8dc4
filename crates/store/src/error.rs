use thiserror::Error;

use crate::{EntityId, Version};

/// Errors that can occur when interacting with a repository.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The stored version did not match the version carried by the entity.
    #[error(
        "Concurrency conflict for {entity_type} {id}: expected version {expected}, found {actual}"
    )]
    ConcurrencyConflict {
        entity_type: &'static str,
        id: EntityId,
        expected: Version,
        actual: Version,
    },

    /// The stored version is at its maximum and cannot be incremented.
    #[error("Version of {entity_type} {id} is exhausted at {version}")]
    VersionExhausted {
        entity_type: &'static str,
        id: EntityId,
        version: Version,
    },

    /// An entity with an identifier was saved but no such row exists.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: EntityId,
    },
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StoreError>;
