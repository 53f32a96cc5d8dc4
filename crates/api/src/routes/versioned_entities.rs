//! Endpoints for optimistically locked entities.
//!
//! Clients echo back the `version` they last read; a PUT carrying any
//! other version is refused with 409 and changes nothing.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use common::{EntityId, Version};
use domain::VersionedEntity;
use serde::{Deserialize, Serialize};

use super::{PageParams, PageResponse, parse_entity_id};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CreateVersionedEntityRequest {
    pub data: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateVersionedEntityRequest {
    pub version: Version,
    pub data: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VersionedEntityResponse {
    pub id: Option<EntityId>,
    pub version: Version,
    pub data: Option<String>,
}

impl From<VersionedEntity> for VersionedEntityResponse {
    fn from(entity: VersionedEntity) -> Self {
        Self {
            id: entity.id(),
            version: entity.version(),
            data: entity.data().map(String::from),
        }
    }
}

/// GET /versioned-entities
#[tracing::instrument(skip(state))]
pub async fn list(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<PageResponse<VersionedEntityResponse>>, ApiError> {
    let Query(params) = query?;
    let page = state
        .versioned_entities
        .list(params.to_request(&state.config))
        .await?;
    Ok(Json(PageResponse::from_page(
        page,
        VersionedEntityResponse::from,
    )))
}

/// POST /versioned-entities
#[tracing::instrument(skip(state, payload))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateVersionedEntityRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<VersionedEntityResponse>), ApiError> {
    let Json(req) = payload?;
    let entity = VersionedEntity::new(req.data)?;
    let saved = state.versioned_entities.save(entity).await?;
    Ok((StatusCode::CREATED, Json(saved.into())))
}

/// GET /versioned-entities/{id}
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<VersionedEntityResponse>, ApiError> {
    let id = parse_entity_id(&id)?;
    Ok(Json(state.versioned_entities.get(id).await?.into()))
}

/// PUT /versioned-entities/{id}
#[tracing::instrument(skip(state, payload))]
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateVersionedEntityRequest>, JsonRejection>,
) -> Result<Json<VersionedEntityResponse>, ApiError> {
    let Json(req) = payload?;
    let id = parse_entity_id(&id)?;
    let data = req.data;
    let updated = state
        .versioned_entities
        .update_versioned(id, req.version, move |entity| entity.set_data(data))
        .await?;
    Ok(Json(updated.into()))
}

/// DELETE /versioned-entities/{id}
#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_entity_id(&id)?;
    state.versioned_entities.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
