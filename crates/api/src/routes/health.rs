use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::response::MessageResponse;
use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `healthy`, or `degraded` when the database is unreachable.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
}

/// GET / -- liveness banner.
async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "MyNotes API is running",
    })
}

/// GET /health -- returns service and database health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = mynotes_db::health_check(&state.pool).await.is_ok();

    let status = if db_healthy { "healthy" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

/// Mount liveness routes (intended for root-level, NOT under `/api`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
}
