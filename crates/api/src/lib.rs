//! HTTP API over the domain entities.
//!
//! Exposes JSON CRUD endpoints for orders, accounts, generated-id and
//! versioned entities, with structured logging (tracing) and Prometheus
//! metrics.

pub mod config;
pub mod error;
pub mod forms;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use state::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    use routes::{accounts, entities, orders, system, versioned_entities};

    let metrics_router = Router::new()
        .route("/metrics", get(system::metrics))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(system::health))
        .route("/orders", get(orders::list).post(orders::create))
        .route(
            "/orders/{id}",
            get(orders::get).put(orders::update).delete(orders::delete),
        )
        .route("/accounts", get(accounts::list).post(accounts::create))
        .route(
            "/accounts/{id}",
            get(accounts::get).delete(accounts::delete),
        )
        .route("/entities", get(entities::list).post(entities::create))
        .route(
            "/entities/{id}",
            get(entities::get).delete(entities::delete),
        )
        .route(
            "/versioned-entities",
            get(versioned_entities::list).post(versioned_entities::create),
        )
        .route(
            "/versioned-entities/{id}",
            get(versioned_entities::get)
                .put(versioned_entities::update)
                .delete(versioned_entities::delete),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates application state with empty in-memory repositories.
pub fn create_default_state(config: Config) -> Arc<AppState> {
    Arc::new(AppState::new(config))
}
