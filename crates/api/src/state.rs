//! Shared application state.

use domain::{Account, EntityService, GeneratedIdEntity, Order, VersionedEntity};
use store::InMemoryRepository;

use crate::config::Config;

/// Service over an in-memory repository.
pub type MemoryService<E> = EntityService<E, InMemoryRepository<E>>;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub config: Config,
    pub orders: MemoryService<Order>,
    pub accounts: MemoryService<Account>,
    pub entities: MemoryService<GeneratedIdEntity>,
    pub versioned_entities: MemoryService<VersionedEntity>,
}

impl AppState {
    /// Creates state with one empty repository per entity type.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            orders: EntityService::new(InMemoryRepository::new()),
            accounts: EntityService::new(InMemoryRepository::new()),
            entities: EntityService::new(InMemoryRepository::new()),
            versioned_entities: EntityService::new(InMemoryRepository::new()),
        }
    }
}
