use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database is unreachable.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub storage: &'static str,
    /// `null` with the in-memory backend.
    pub db_healthy: Option<bool>,
}

/// GET /health -- returns service and database health.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match &state.pool {
        Some(pool) => Some(grimoire_db::health_check(pool).await.is_ok()),
        None => None,
    };

    let status = if db_healthy == Some(false) {
        "degraded"
    } else {
        "ok"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        storage: state.config.storage.as_str(),
        db_healthy,
    })
}
