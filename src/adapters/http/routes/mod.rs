pub mod health;
pub mod pricing;
pub mod subscription;

use axum::Router;

use crate::{adapters::http::app_state::AppState, app_error::AppError};

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/subscription", subscription::router())
        .nest("/pricing", pricing::router())
}

/// Fallback for unmatched paths.
pub async fn not_found() -> AppError {
    AppError::not_found()
}
