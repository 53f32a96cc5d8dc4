//! Account endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use common::EntityId;
use domain::Account;
use serde::{Deserialize, Serialize};

use super::{PageParams, PageResponse, parse_entity_id};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: Option<EntityId>,
    pub name: String,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id(),
            name: account.name().to_string(),
        }
    }
}

/// GET /accounts
#[tracing::instrument(skip(state))]
pub async fn list(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<PageResponse<AccountResponse>>, ApiError> {
    let Query(params) = query?;
    let page = state.accounts.list(params.to_request(&state.config)).await?;
    Ok(Json(PageResponse::from_page(page, AccountResponse::from)))
}

/// POST /accounts
#[tracing::instrument(skip(state, payload))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AccountResponse>), ApiError> {
    let Json(req) = payload?;
    let account = Account::new(req.name)?;
    let saved = state.accounts.save(account).await?;
    Ok((StatusCode::CREATED, Json(saved.into())))
}

/// GET /accounts/{id}
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<AccountResponse>, ApiError> {
    let id = parse_entity_id(&id)?;
    Ok(Json(state.accounts.get(id).await?.into()))
}

/// DELETE /accounts/{id}
#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_entity_id(&id)?;
    state.accounts.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
