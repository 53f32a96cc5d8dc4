//! Endpoints for bare generated-id entities.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use common::EntityId;
use domain::GeneratedIdEntity;
use serde::Serialize;

use super::{PageParams, PageResponse, parse_entity_id};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct EntityResponse {
    pub id: Option<EntityId>,
}

impl From<GeneratedIdEntity> for EntityResponse {
    fn from(entity: GeneratedIdEntity) -> Self {
        Self { id: entity.id() }
    }
}

/// GET /entities
#[tracing::instrument(skip(state))]
pub async fn list(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<PageResponse<EntityResponse>>, ApiError> {
    let Query(params) = query?;
    let page = state.entities.list(params.to_request(&state.config)).await?;
    Ok(Json(PageResponse::from_page(page, EntityResponse::from)))
}

/// POST /entities: takes no body.
#[tracing::instrument(skip(state))]
pub async fn create(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<EntityResponse>), ApiError> {
    let saved = state.entities.save(GeneratedIdEntity::new()).await?;
    Ok((StatusCode::CREATED, Json(saved.into())))
}

/// GET /entities/{id}
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<EntityResponse>, ApiError> {
    let id = parse_entity_id(&id)?;
    Ok(Json(state.entities.get(id).await?.into()))
}

/// DELETE /entities/{id}
#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_entity_id(&id)?;
    state.entities.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
