use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    EntityId, Page, PageRequest, Persistent, Result, Stamp, StoreError, Version,
    repository::Repository,
};

struct Table<E> {
    rows: BTreeMap<EntityId, E>,
    last_id: i64,
}

impl<E> Table<E> {
    fn allocate_id(&mut self) -> EntityId {
        self.last_id += 1;
        EntityId::new(self.last_id)
    }
}

/// In-memory repository.
///
/// Rows live in an ordered map keyed by id, so listing is stable. Every
/// `save` runs under a single write lock, which makes the version check and
/// the version increment one atomic step.
pub struct InMemoryRepository<E> {
    table: Arc<RwLock<Table<E>>>,
}

impl<E> Clone for InMemoryRepository<E> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
        }
    }
}

impl<E> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self {
            table: Arc::new(RwLock::new(Table {
                rows: BTreeMap::new(),
                last_id: 0,
            })),
        }
    }
}

impl<E: Persistent> InMemoryRepository<E> {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a pre-existing row under the next id at the given version.
    ///
    /// Meant for fixtures and imports: it skips the version check and
    /// stores exactly the version given. `version` is ignored for entities
    /// without optimistic locking.
    pub async fn seed(&self, mut entity: E, version: Version) -> E {
        let mut table = self.table.write().await;
        let id = table.allocate_id();
        let version = entity.lock_version().map(|_| version);
        entity.restamp(&Stamp::new(id, version));
        table.rows.insert(id, entity.clone());
        entity
    }
}

#[async_trait]
impl<E: Persistent> Repository<E> for InMemoryRepository<E> {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<E>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_all(&self, request: PageRequest) -> Result<Page<E>> {
        let table = self.table.read().await;
        let content = table
            .rows
            .values()
            .skip(request.offset())
            .take(request.size)
            .cloned()
            .collect();
        Ok(Page::new(content, request, table.rows.len()))
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.table.read().await.rows.len())
    }

    async fn save(&self, mut entity: E) -> Result<E> {
        let mut table = self.table.write().await;

        let stamp = match entity.id() {
            None => {
                let id = table.allocate_id();
                Stamp::new(id, entity.lock_version().map(|_| Version::initial()))
            }
            Some(id) => {
                let stored = table.rows.get(&id).ok_or(StoreError::NotFound {
                    entity_type: E::entity_type(),
                    id,
                })?;

                match entity.lock_version() {
                    Some(expected) => {
                        let actual = stored.lock_version().unwrap_or_default();
                        if expected != actual {
                            tracing::debug!(
                                entity = E::entity_type(),
                                %id,
                                %expected,
                                %actual,
                                "rejecting stale save"
                            );
                            return Err(StoreError::ConcurrencyConflict {
                                entity_type: E::entity_type(),
                                id,
                                expected,
                                actual,
                            });
                        }
                        let next = actual.next().ok_or(StoreError::VersionExhausted {
                            entity_type: E::entity_type(),
                            id,
                            version: actual,
                        })?;
                        Stamp::new(id, Some(next))
                    }
                    None => Stamp::new(id, None),
                }
            }
        };

        entity.restamp(&stamp);
        table.rows.insert(stamp.id(), entity.clone());

        Ok(entity)
    }

    async fn delete_by_id(&self, id: EntityId) -> Result<bool> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }
}
