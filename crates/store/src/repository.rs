use async_trait::async_trait;

use crate::{EntityId, Page, PageRequest, Persistent, Result};

/// Core trait for repository implementations.
///
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait Repository<E: Persistent>: Send + Sync {
    /// Looks up an entity by identifier.
    ///
    /// Returns None if no entity is stored under the id.
    async fn find_by_id(&self, id: EntityId) -> Result<Option<E>>;

    /// Returns one page of entities, ordered by identifier.
    async fn find_all(&self, request: PageRequest) -> Result<Page<E>>;

    /// Returns the number of stored entities.
    async fn count(&self) -> Result<usize>;

    /// Persists an entity and returns it as stored.
    ///
    /// A transient entity is assigned the next generated id (and the
    /// initial version if it is versioned). A versioned entity that is
    /// already persisted is saved only if its version still matches the
    /// stored one, in which case the stored version is incremented in the
    /// same step; otherwise `ConcurrencyConflict` is returned and nothing is
    /// written.
    async fn save(&self, entity: E) -> Result<E>;

    /// Deletes the entity stored under the id.
    ///
    /// Returns false if there was nothing to delete.
    async fn delete_by_id(&self, id: EntityId) -> Result<bool>;
}
