use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;

use crate::AppState;

pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health))
        .route("/live", get(liveness))
        .route("/ready", get(readiness))
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok", "service": "pharmacy-api" }))
}

async fn liveness() -> impl IntoResponse {
    StatusCode::OK
}

/// Readiness includes a database round trip.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    match crate::db::ping(&state.db).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "database": "up" }))).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "readiness probe failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "database": "down" })),
            )
                .into_response()
        }
    }
}
