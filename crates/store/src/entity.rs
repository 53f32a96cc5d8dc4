use crate::{EntityId, Version};

/// Identity assigned by a repository when an entity is saved.
///
/// Fields are private and there is no public constructor, so only a
/// repository in this crate can hand one out. Entities use it in
/// [`Persistent::restamp`] to take on their generated id and stored
/// version without exposing setters to ordinary callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stamp {
    id: EntityId,
    version: Option<Version>,
}

impl Stamp {
    pub(crate) fn new(id: EntityId, version: Option<Version>) -> Self {
        Self { id, version }
    }

    /// The identifier the entity is stored under.
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// The stored version, or `None` for entities without optimistic locking.
    pub fn version(&self) -> Option<Version> {
        self.version
    }
}

/// An entity that can be stored in a [`Repository`](crate::Repository).
pub trait Persistent: Clone + Send + Sync + 'static {
    /// Returns the entity type name, used in errors, logs and metrics.
    fn entity_type() -> &'static str;

    /// Returns the identifier, or `None` while the entity is transient.
    fn id(&self) -> Option<EntityId>;

    /// Returns the version the entity was loaded at.
    ///
    /// `None` means the entity does not take part in optimistic locking.
    fn lock_version(&self) -> Option<Version> {
        None
    }

    /// Rehydrates the persistence-owned fields from a repository stamp.
    ///
    /// Bypasses construction-time validation: the values come from storage.
    fn restamp(&mut self, stamp: &Stamp);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamp_exposes_id_and_version() {
        let stamp = Stamp::new(EntityId::new(3), Some(Version::new(1)));
        assert_eq!(stamp.id(), EntityId::new(3));
        assert_eq!(stamp.version(), Some(Version::new(1)));

        let unversioned = Stamp::new(EntityId::new(4), None);
        assert_eq!(unversioned.version(), None);
    }
}
