//! Order endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use common::EntityId;
use domain::Order;
use serde::Serialize;

use super::{PageParams, PageResponse, parse_entity_id};
use crate::error::ApiError;
use crate::forms::OrderForm;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: Option<EntityId>,
    pub items: Vec<OrderItemResponse>,
    pub total_quantity: i64,
}

#[derive(Debug, Serialize)]
pub struct OrderItemResponse {
    pub order_id: Option<EntityId>,
    pub product_id: String,
    pub quantity: i32,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        let mut items: Vec<OrderItemResponse> = order
            .items()
            .iter()
            .map(|item| OrderItemResponse {
                order_id: item.order_id(),
                product_id: item.product_id().to_string(),
                quantity: item.quantity(),
            })
            .collect();
        items.sort_by(|a, b| a.product_id.cmp(&b.product_id));

        Self {
            id: order.id(),
            items,
            total_quantity: order.total_quantity(),
        }
    }
}

/// GET /orders
#[tracing::instrument(skip(state))]
pub async fn list(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<PageResponse<OrderResponse>>, ApiError> {
    let Query(params) = query?;
    let page = state.orders.list(params.to_request(&state.config)).await?;
    Ok(Json(PageResponse::from_page(page, OrderResponse::from)))
}

/// POST /orders: create an order from a form.
#[tracing::instrument(skip(state, payload))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<OrderForm>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    let Json(form) = payload?;
    let mut order = Order::new();
    form.apply_to(&mut order)?;
    let saved = state.orders.save(order).await?;

    Ok((StatusCode::CREATED, Json(saved.into())))
}

/// GET /orders/{id}
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let id = parse_entity_id(&id)?;
    let order = state.orders.get(id).await?;
    Ok(Json(order.into()))
}

/// PUT /orders/{id}: replace an order's lines with the form's.
#[tracing::instrument(skip(state, payload))]
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<OrderForm>, JsonRejection>,
) -> Result<Json<OrderResponse>, ApiError> {
    let id = parse_entity_id(&id)?;
    let mut order = state.orders.get(id).await?;
    let Json(form) = payload?;
    form.apply_to(&mut order)?;
    let saved = state.orders.save(order).await?;

    Ok(Json(saved.into()))
}

/// DELETE /orders/{id}: removes the order and its items.
#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_entity_id(&id)?;
    state.orders.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
