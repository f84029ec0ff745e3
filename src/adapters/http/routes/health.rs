use axum::{Json, Router, routing::get};
use data_platform_types::HealthStatus;

use crate::adapters::http::app_state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// GET /health
async fn health() -> Json<HealthStatus> {
    Json(HealthStatus::ok())
}
