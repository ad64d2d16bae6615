//! HTTP routes.
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET    | `/health`           | liveness, no auth |
//! | GET    | `/datacenters/`     | list |
//! | POST   | `/datacenters/`     | create |
//! | GET    | `/datacenters/:id`  | get |
//! | PUT    | `/datacenters/:id`  | update credentials |
//! | DELETE | `/datacenters/:id`  | delete |
//! | GET    | `/services/`        | list |
//! | GET    | `/services/:id`     | get |
//!
//! Collection paths answer with and without the trailing slash.

use crate::domain::config::GatewayConfig;
use crate::domain::error::GatewayResult;
use crate::handlers::{DatacenterHandlers, ServiceHandlers};
use crate::middleware::{create_cors_layer, AuthLayer, TracingLayer};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde_json::{json, Value};
use shared_types::{AuthenticatedUser, Datacenter, Service};
use std::sync::Arc;
use tower::ServiceBuilder;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub datacenters: Arc<DatacenterHandlers>,
    pub services: Arc<ServiceHandlers>,
}

impl AppState {
    pub fn new(datacenters: DatacenterHandlers, services: ServiceHandlers) -> Self {
        Self {
            datacenters: Arc::new(datacenters),
            services: Arc::new(services),
        }
    }
}

/// Build the full router: authenticated resource routes plus `/health`.
pub fn build_router(state: AppState, config: &GatewayConfig) -> Router {
    let api = Router::new()
        .route(
            "/datacenters",
            get(list_datacenters).post(create_datacenter),
        )
        .route(
            "/datacenters/",
            get(list_datacenters).post(create_datacenter),
        )
        .route(
            "/datacenters/:id",
            get(get_datacenter)
                .put(update_datacenter)
                .delete(delete_datacenter),
        )
        .route("/services", get(list_services))
        .route("/services/", get(list_services))
        .route("/services/:id", get(get_service))
        .layer(AuthLayer::new(&config.auth))
        .with_state(state);

    Router::new().route("/health", get(health)).merge(api).layer(
        ServiceBuilder::new()
            .layer(create_cors_layer(&config.cors))
            .layer(TracingLayer::new()),
    )
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn list_datacenters(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> GatewayResult<Json<Vec<Datacenter>>> {
    state.datacenters.list(&user).await.map(Json)
}

async fn get_datacenter(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> GatewayResult<Json<Datacenter>> {
    state.datacenters.get(&user, &id).await.map(Json)
}

async fn create_datacenter(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    body: Bytes,
) -> GatewayResult<Json<Datacenter>> {
    state.datacenters.create(&user, &body).await.map(Json)
}

async fn update_datacenter(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    body: Bytes,
) -> GatewayResult<Json<Datacenter>> {
    state.datacenters.update(&user, &id, &body).await.map(Json)
}

async fn delete_datacenter(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> GatewayResult<StatusCode> {
    state.datacenters.delete(&user, &id).await?;
    Ok(StatusCode::OK)
}

async fn list_services(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> GatewayResult<Json<Vec<Service>>> {
    state.services.list(&user).await.map(Json)
}

async fn get_service(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> GatewayResult<Json<Service>> {
    state.services.get(&user, &id).await.map(Json)
}
