//! Health and liveness endpoint handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;

use super::AppState;

/// Returns the served list views and process uptime as JSON.
pub async fn health_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    let views: Vec<&str> = state.views.keys().map(String::as_str).collect();
    let uptime_secs = state.start_time.elapsed().as_secs();

    Json(json!({
        "state": "ready",
        "views": views,
        "uptime_secs": uptime_secs,
    }))
}

/// Liveness probe. Always 200; it checks no downstream store.
pub async fn liveness_handler() -> StatusCode {
    StatusCode::OK
}
