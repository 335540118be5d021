//! Health check handler.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use dochub_core::result::AppResult;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let database = status("database", state.db.health_check().await, "connected");
    let storage = status("storage", state.store.health_check().await, "available");
    let healthy = database != "unavailable" && storage != "unavailable";

    Json(ApiResponse::ok(HealthResponse {
        status: if healthy { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
        storage: storage.to_string(),
    }))
}

fn status(component: &str, check: AppResult<bool>, up: &'static str) -> &'static str {
    match check {
        Ok(true) => up,
        Ok(false) => {
            warn!(component, "Health check reported unavailable");
            "unavailable"
        }
        Err(e) => {
            warn!(component, error = %e, "Health check failed");
            "unavailable"
        }
    }
}
