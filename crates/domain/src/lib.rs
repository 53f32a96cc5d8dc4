//! Domain layer for the domain-objects workspace.
//!
//! This crate provides:
//! - Value objects (`ProductId`, `OrderItemId`) that validate on construction
//! - The `Order` aggregate root, which owns its `OrderItem`s
//! - Entities with generated ids (`Account`, `GeneratedIdEntity`)
//! - `VersionedEntity` and the optimistic-concurrency check
//! - `EntityService`, which runs load/check/mutate/save against a repository

pub mod concurrency;
pub mod error;
pub mod model;
pub mod service;

pub use concurrency::{Versioned, ensure_version};
pub use error::{DomainError, ErrorKind};
pub use model::{
    Account, GeneratedIdEntity, Items, Order, OrderItem, OrderItemId, ProductId, VersionedEntity,
};
pub use service::EntityService;
