//! Shared types for the domain-objects workspace.

pub mod types;

pub use types::{EntityId, Version};
