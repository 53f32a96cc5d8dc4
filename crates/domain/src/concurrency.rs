//! Optimistic concurrency check for versioned entities.

use common::Version;
use store::Persistent;

use crate::error::DomainError;

/// An entity that carries an optimistic-locking version.
pub trait Versioned {
    /// Returns the version the entity was loaded at.
    fn version(&self) -> Version;
}

/// Checks the version a client last observed against the loaded entity.
///
/// Must run before any field of the entity is validated or changed, so a
/// stale submission never touches the entity. This is only a pre-check:
/// the repository repeats the comparison atomically when saving.
pub fn ensure_version<E>(entity: &E, observed: Version) -> Result<(), DomainError>
where
    E: Versioned + Persistent,
{
    let actual = entity.version();
    if observed == actual {
        return Ok(());
    }

    match entity.id() {
        Some(id) => Err(DomainError::VersionConflict {
            entity_type: E::entity_type(),
            id,
            expected: observed,
            actual,
        }),
        // A transient entity has no stored version to conflict with.
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use common::EntityId;
    use store::Stamp;

    use super::*;
    use crate::error::ErrorKind;

    #[derive(Debug, Clone)]
    struct Ticket {
        id: Option<EntityId>,
        version: Version,
    }

    impl Versioned for Ticket {
        fn version(&self) -> Version {
            self.version
        }
    }

    impl Persistent for Ticket {
        fn entity_type() -> &'static str {
            "Ticket"
        }

        fn id(&self) -> Option<EntityId> {
            self.id
        }

        fn lock_version(&self) -> Option<Version> {
            Some(self.version)
        }

        fn restamp(&mut self, _stamp: &Stamp) {}
    }

    fn stored_at(version: i64) -> Ticket {
        Ticket {
            id: Some(EntityId::new(123)),
            version: Version::new(version),
        }
    }

    #[test]
    fn test_matching_version_passes() {
        assert!(ensure_version(&stored_at(42), Version::new(42)).is_ok());
    }

    #[test]
    fn test_stale_version_conflicts() {
        let err = ensure_version(&stored_at(42), Version::new(41)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::VersionConflict);
        match err {
            DomainError::VersionConflict {
                entity_type,
                id,
                expected,
                actual,
            } => {
                assert_eq!(entity_type, "Ticket");
                assert_eq!(id, EntityId::new(123));
                assert_eq!(expected, Version::new(41));
                assert_eq!(actual, Version::new(42));
            }
            other => panic!("expected version conflict, got {other:?}"),
        }
    }

    #[test]
    fn test_newer_version_also_conflicts() {
        assert!(ensure_version(&stored_at(42), Version::new(43)).is_err());
    }

    #[test]
    fn test_transient_entity_never_conflicts() {
        let transient = Ticket {
            id: None,
            version: Version::initial(),
        };
        assert!(ensure_version(&transient, Version::new(7)).is_ok());
    }
}
