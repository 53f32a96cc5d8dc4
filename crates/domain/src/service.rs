//! Entity service providing load/check/mutate/save flows over a repository.

use std::marker::PhantomData;

use common::{EntityId, Version};
use store::{Page, PageRequest, Persistent, Repository};

use crate::concurrency::{Versioned, ensure_version};
use crate::error::DomainError;

/// Service for managing one kind of entity.
///
/// Wraps a repository and turns its absent lookups into `NotFound`, its
/// version conflicts into `VersionConflict`, and records logs and metrics
/// for every write.
pub struct EntityService<E, R>
where
    E: Persistent,
    R: Repository<E>,
{
    repository: R,
    _phantom: PhantomData<fn() -> E>,
}

impl<E, R> EntityService<E, R>
where
    E: Persistent,
    R: Repository<E>,
{
    /// Creates a new service over the given repository.
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            _phantom: PhantomData,
        }
    }

    /// Returns a reference to the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Looks up an entity, returning None if it doesn't exist.
    #[tracing::instrument(skip(self), fields(entity = E::entity_type()))]
    pub async fn find(&self, id: EntityId) -> Result<Option<E>, DomainError> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Looks up an entity that must exist.
    #[tracing::instrument(skip(self), fields(entity = E::entity_type()))]
    pub async fn get(&self, id: EntityId) -> Result<E, DomainError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: E::entity_type(),
                id,
            })
    }

    /// Returns one page of entities.
    #[tracing::instrument(skip(self), fields(entity = E::entity_type()))]
    pub async fn list(&self, request: PageRequest) -> Result<Page<E>, DomainError> {
        Ok(self.repository.find_all(request).await?)
    }

    /// Persists an entity, assigning an id if it is new.
    #[tracing::instrument(skip(self, entity), fields(entity = E::entity_type()))]
    pub async fn save(&self, entity: E) -> Result<E, DomainError> {
        let saved = self.repository.save(entity).await.inspect_err(|err| {
            if let store::StoreError::ConcurrencyConflict { .. } = err {
                metrics::counter!("version_conflicts_total", "entity" => E::entity_type())
                    .increment(1);
            }
        })?;

        metrics::counter!("entities_saved_total", "entity" => E::entity_type()).increment(1);
        if let Some(id) = saved.id() {
            tracing::info!(entity = E::entity_type(), %id, "entity saved");
        }

        Ok(saved)
    }

    /// Deletes an entity that must exist.
    #[tracing::instrument(skip(self), fields(entity = E::entity_type()))]
    pub async fn delete(&self, id: EntityId) -> Result<(), DomainError> {
        if !self.repository.delete_by_id(id).await? {
            return Err(DomainError::NotFound {
                entity_type: E::entity_type(),
                id,
            });
        }

        metrics::counter!("entities_deleted_total", "entity" => E::entity_type()).increment(1);
        tracing::info!(entity = E::entity_type(), %id, "entity deleted");
        Ok(())
    }
}

impl<E, R> EntityService<E, R>
where
    E: Persistent + Versioned,
    R: Repository<E>,
{
    /// Applies an update to a versioned entity.
    ///
    /// Steps, in order:
    /// 1. load the entity (`NotFound` if absent)
    /// 2. compare `observed` with the stored version (`VersionConflict`)
    /// 3. run `apply`, which validates and mutates the loaded copy
    /// 4. save, letting the repository compare-and-increment atomically
    ///
    /// An error at any step leaves the stored entity untouched.
    #[tracing::instrument(skip(self, apply), fields(entity = E::entity_type()))]
    pub async fn update_versioned<F>(
        &self,
        id: EntityId,
        observed: Version,
        apply: F,
    ) -> Result<E, DomainError>
    where
        F: FnOnce(&mut E) -> Result<(), DomainError> + Send,
    {
        let mut entity = self.get(id).await?;

        if let Err(err) = ensure_version(&entity, observed) {
            metrics::counter!("version_conflicts_total", "entity" => E::entity_type())
                .increment(1);
            tracing::warn!(
                entity = E::entity_type(),
                %id,
                %observed,
                stored = %entity.version(),
                "rejected stale update"
            );
            return Err(err);
        }

        apply(&mut entity)?;

        self.save(entity).await
    }
}

#[cfg(test)]
mod tests {
    use store::InMemoryRepository;

    use super::*;
    use crate::error::ErrorKind;
    use crate::model::{Account, VersionedEntity};

    type Service<E> = EntityService<E, InMemoryRepository<E>>;

    fn versioned_service() -> Service<VersionedEntity> {
        EntityService::new(InMemoryRepository::new())
    }

    fn account_service() -> Service<Account> {
        EntityService::new(InMemoryRepository::new())
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let service = account_service();
        let err = service.get(EntityId::new(123)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(service.find(EntityId::new(123)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let service = account_service();
        let err = service.delete(EntityId::new(1)).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_save_then_delete() {
        let service = account_service();
        let saved = service.save(Account::new("x").unwrap()).await.unwrap();
        let id = saved.id().unwrap();

        service.delete(id).await.unwrap();
        assert!(service.find(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_with_stale_version_is_rejected() {
        let service = versioned_service();
        let seeded = service
            .repository()
            .seed(
                VersionedEntity::new(Some("original".to_string())).unwrap(),
                Version::new(42),
            )
            .await;
        let id = seeded.id().unwrap();

        let err = service
            .update_versioned(id, Version::new(41), |entity| {
                entity.set_data(Some("Lorem ipsum".to_string()))
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::VersionConflict);

        let stored = service.get(id).await.unwrap();
        assert_eq!(stored.data(), Some("original"));
        assert_eq!(stored.version(), Version::new(42));
    }

    #[tokio::test]
    async fn test_update_with_current_version_increments() {
        let service = versioned_service();
        let seeded = service
            .repository()
            .seed(VersionedEntity::new(None).unwrap(), Version::new(42))
            .await;
        let id = seeded.id().unwrap();

        let updated = service
            .update_versioned(id, Version::new(42), |entity| {
                entity.set_data(Some("Lorem ipsum".to_string()))
            })
            .await
            .unwrap();
        assert_eq!(updated.data(), Some("Lorem ipsum"));
        assert_eq!(updated.version(), Version::new(43));

        let stored = service.get(id).await.unwrap();
        assert_eq!(stored.version(), Version::new(43));
        assert_eq!(stored.data(), Some("Lorem ipsum"));
    }

    #[tokio::test]
    async fn test_version_check_runs_before_field_validation() {
        let service = versioned_service();
        let saved = service
            .save(VersionedEntity::new(None).unwrap())
            .await
            .unwrap();

        let err = service
            .update_versioned(saved.id().unwrap(), Version::new(5), |entity| {
                entity.set_data(Some("x".repeat(1000)))
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::VersionConflict);
    }

    #[tokio::test]
    async fn test_invalid_field_aborts_without_saving() {
        let service = versioned_service();
        let saved = service
            .save(VersionedEntity::new(Some("keep".to_string())).unwrap())
            .await
            .unwrap();
        let id = saved.id().unwrap();

        let err = service
            .update_versioned(id, saved.version(), |entity| {
                entity.set_data(Some("x".repeat(1000)))
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let stored = service.get(id).await.unwrap();
        assert_eq!(stored.data(), Some("keep"));
        assert_eq!(stored.version(), Version::initial());
    }

    #[tokio::test]
    async fn test_update_of_missing_entity_is_not_found() {
        let service = versioned_service();
        let err = service
            .update_versioned(EntityId::new(9), Version::initial(), |_| Ok(()))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_update_at_exhausted_version_fails_and_keeps_data() {
        let service = versioned_service();
        let seeded = service
            .repository()
            .seed(
                VersionedEntity::new(Some("last".to_string())).unwrap(),
                Version::new(i64::MAX),
            )
            .await;
        let id = seeded.id().unwrap();

        let err = service
            .update_versioned(id, Version::new(i64::MAX), |entity| {
                entity.set_data(Some("overflow".to_string()))
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(service.get(id).await.unwrap().data(), Some("last"));
    }
}
