//! Pharmacy API Library
//!
//! REST backend for a pharmacy e-commerce platform: multi-role
//! authentication (customers, pharmacists, admins), role-based access
//! control, and brand/product catalog management.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod auth;
pub mod config;
pub mod db;
pub mod dto;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod openapi;
pub mod services;

use std::sync::Arc;

use axum::{routing::get, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<db::DbPool>,
    pub config: config::AppConfig,
    pub auth: Arc<auth::AuthService>,
    pub services: services::AppServices,
}

impl AppState {
    pub fn new(db: Arc<db::DbPool>, cfg: config::AppConfig) -> Self {
        let auth = Arc::new(auth::AuthService::new(auth::AuthConfig::from_app_config(
            &cfg,
        )));
        let services = services::AppServices::new(db.clone());
        Self {
            db,
            config: cfg,
            auth,
            services,
        }
    }
}

/// Compose the full application router: API routes, health probes, and the
/// Swagger UI. Transport-level layers (CORS, timeouts, tracing) are applied
/// by the binary.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "pharmacy-api up" }))
        .nest("/auth", handlers::auth::auth_routes())
        .nest("/products", handlers::products::product_routes())
        .nest("/admin", handlers::admin::admin_routes())
        .nest("/health", handlers::health::health_routes())
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
        .with_state(state)
}
