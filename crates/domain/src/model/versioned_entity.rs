use common::{EntityId, Version};
use store::{Persistent, Stamp};

use crate::concurrency::Versioned;
use crate::error::DomainError;

/// Maximum length of [`VersionedEntity::data`], in characters.
pub const MAX_DATA_LENGTH: usize = 255;

/// Entity carrying an optimistic-locking version next to its payload.
///
/// The version is owned by the repository: it is 0 after the first save
/// and is incremented by every later save. Callers can read it but never
/// set it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedEntity {
    id: Option<EntityId>,
    version: Version,
    data: Option<String>,
}

impl VersionedEntity {
    /// Creates a transient entity.
    pub fn new(data: Option<String>) -> Result<Self, DomainError> {
        validate_data(data.as_deref())?;
        Ok(Self {
            id: None,
            version: Version::initial(),
            data,
        })
    }

    /// Returns the generated id, or `None` before the first save.
    pub fn id(&self) -> Option<EntityId> {
        self.id
    }

    /// The version this copy was loaded at.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns the payload, if any.
    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    /// Replaces the payload.
    pub fn set_data(&mut self, data: Option<String>) -> Result<(), DomainError> {
        validate_data(data.as_deref())?;
        self.data = data;
        Ok(())
    }
}

fn validate_data(data: Option<&str>) -> Result<(), DomainError> {
    if let Some(data) = data {
        let actual = data.chars().count();
        if actual > MAX_DATA_LENGTH {
            return Err(DomainError::TooLong {
                field: "data",
                max: MAX_DATA_LENGTH,
                actual,
            });
        }
    }
    Ok(())
}

impl Versioned for VersionedEntity {
    fn version(&self) -> Version {
        VersionedEntity::version(self)
    }
}

impl Persistent for VersionedEntity {
    fn entity_type() -> &'static str {
        "VersionedEntity"
    }

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn lock_version(&self) -> Option<Version> {
        Some(self.version)
    }

    fn restamp(&mut self, stamp: &Stamp) {
        self.id = Some(stamp.id());
        if let Some(version) = stamp.version() {
            self.version = version;
        }
    }
}
