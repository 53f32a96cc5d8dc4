//! Domain error types.

use common::{EntityId, Version};
use store::StoreError;
use thiserror::Error;

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A required string was empty or whitespace only.
    #[error("{field} must not be null or empty")]
    BlankValue { field: &'static str },

    /// A quantity was zero or negative.
    #[error("Quantity must be greater than zero (got {quantity})")]
    InvalidQuantity { quantity: i32 },

    /// A quantity increment was zero or negative.
    #[error("Added quantity must be greater than zero (got {increment})")]
    InvalidIncrement { increment: i32 },

    /// Adding to a quantity would overflow.
    #[error("Quantity {current} cannot be increased by {increment}")]
    QuantityOverflow { current: i32, increment: i32 },

    /// A string exceeded its maximum length.
    #[error("{field} must be at most {max} characters (got {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    /// No entity is stored under the identifier.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: EntityId,
    },

    /// The caller's observed version is not the stored version.
    #[error(
        "{entity_type} {id} has been modified since you last retrieved it (your version {expected}, current version {actual})"
    )]
    VersionConflict {
        entity_type: &'static str,
        id: EntityId,
        expected: Version,
        actual: Version,
    },

    /// The entity's version counter cannot advance any further.
    #[error("{entity_type} {id} cannot be updated: version {version} is exhausted")]
    VersionExhausted {
        entity_type: &'static str,
        id: EntityId,
        version: Version,
    },
}

/// Coarse classification of a [`DomainError`].
///
/// Lets callers tell "your data was invalid" apart from "someone else
/// changed this first" without matching on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    VersionConflict,
    Internal,
}

impl DomainError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::BlankValue { .. }
            | DomainError::InvalidQuantity { .. }
            | DomainError::InvalidIncrement { .. }
            | DomainError::QuantityOverflow { .. }
            | DomainError::TooLong { .. } => ErrorKind::InvalidArgument,
            DomainError::NotFound { .. } => ErrorKind::NotFound,
            DomainError::VersionConflict { .. } => ErrorKind::VersionConflict,
            DomainError::VersionExhausted { .. } => ErrorKind::Internal,
        }
    }
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ConcurrencyConflict {
                entity_type,
                id,
                expected,
                actual,
            } => DomainError::VersionConflict {
                entity_type,
                id,
                expected,
                actual,
            },
            StoreError::VersionExhausted {
                entity_type,
                id,
                version,
            } => DomainError::VersionExhausted {
                entity_type,
                id,
                version,
            },
            StoreError::NotFound { entity_type, id } => DomainError::NotFound { entity_type, id },
        }
    }
}
