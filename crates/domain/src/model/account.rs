use common::EntityId;
use store::{Persistent, Stamp};

use crate::error::DomainError;

/// An entity without a default constructor: every account has a name.
///
/// Equality and hashing use the name only. The id is left out because it
/// is absent until the first save, so two unsaved accounts with the same
/// name are equal.
#[derive(Debug, Clone)]
pub struct Account {
    id: Option<EntityId>,
    name: String,
}

impl Account {
    /// Creates a transient account, rejecting blank names.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::BlankValue { field: "name" });
        }
        Ok(Self { id: None, name })
    }

    /// Returns the generated id, or `None` before the first save.
    pub fn id(&self) -> Option<EntityId> {
        self.id
    }

    /// Returns the account name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Account {}

impl std::hash::Hash for Account {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl Persistent for Account {
    fn entity_type() -> &'static str {
        "Account"
    }

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn restamp(&mut self, stamp: &Stamp) {
        self.id = Some(stamp.id());
    }
}
