use crate::app_error::{AppError, ErrorCode};
use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            // Unknown catalog keys are logged at debug.
            AppError::NotFound(_) => tracing::debug!(error = %self, "Not found"),
            _ => tracing::error!(error = ?self, "Request failed"),
        }

        match self {
            AppError::NotFound(msg) => error_resp(StatusCode::NOT_FOUND, ErrorCode::NotFound, msg),
            AppError::InvalidInput(msg) => {
                error_resp(StatusCode::BAD_REQUEST, ErrorCode::InvalidInput, msg)
            }
            AppError::Storage(_) => error_resp(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::StorageError,
                "Storage error".into(),
            ),
            AppError::Upstream(_) => error_resp(
                StatusCode::BAD_GATEWAY,
                ErrorCode::UpstreamError,
                "Upstream error".into(),
            ),
            AppError::Internal(_) => error_resp(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalError,
                "Internal error".into(),
            ),
        }
    }
}

fn error_resp(status: StatusCode, code: ErrorCode, message: String) -> Response {
    let body = serde_json::json!({ "error": message, "code": code.as_str() });
    (status, Json(body)).into_response()
}
