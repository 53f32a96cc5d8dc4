//! Persistence port for domain entities.
//!
//! Entities implement [`Persistent`] and are stored through a
//! [`Repository`]. The repository owns identifier generation and the
//! atomic compare-and-increment of version counters; entities learn about
//! both through a [`Stamp`], which only this crate can issue.

pub mod entity;
pub mod error;
pub mod memory;
pub mod page;
pub mod repository;

pub use common::{EntityId, Version};
pub use entity::{Persistent, Stamp};
pub use error::{Result, StoreError};
pub use memory::InMemoryRepository;
pub use page::{Page, PageRequest};
pub use repository::Repository;
