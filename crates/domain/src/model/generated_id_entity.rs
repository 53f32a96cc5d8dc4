use common::EntityId;
use store::{Persistent, Stamp};

/// Minimal entity whose id is generated by the repository.
///
/// There is no id setter. Equality and hashing use the id only, which
/// makes every transient instance (id `None`) equal to every other
/// transient instance.
#[derive(Debug, Clone, Default)]
pub struct GeneratedIdEntity {
    id: Option<EntityId>,
}

impl GeneratedIdEntity {
    /// Creates a transient entity without an id.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the generated id, or `None` before the first save.
    pub fn id(&self) -> Option<EntityId> {
        self.id
    }
}

impl PartialEq for GeneratedIdEntity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for GeneratedIdEntity {}

impl std::hash::Hash for GeneratedIdEntity {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Persistent for GeneratedIdEntity {
    fn entity_type() -> &'static str {
        "GeneratedIdEntity"
    }

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn restamp(&mut self, stamp: &Stamp) {
        self.id = Some(stamp.id());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_instances_are_all_equal() {
        assert_eq!(GeneratedIdEntity::new(), GeneratedIdEntity::new());
    }

    #[test]
    fn test_equality_by_id() {
        let one = GeneratedIdEntity {
            id: Some(EntityId::new(1)),
        };
        let other_one = GeneratedIdEntity {
            id: Some(EntityId::new(1)),
        };
        let two = GeneratedIdEntity {
            id: Some(EntityId::new(2)),
        };

        assert_eq!(one, other_one);
        assert_ne!(one, two);
        assert_ne!(one, GeneratedIdEntity::new());
    }
}
