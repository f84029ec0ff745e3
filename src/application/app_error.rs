use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found() -> Self {
        AppError::NotFound("Not found".to_string())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::InvalidInput(_) => ErrorCode::InvalidInput,
            AppError::Storage(_) => ErrorCode::StorageError,
            AppError::Upstream(_) => ErrorCode::UpstreamError,
            AppError::Internal(_) => ErrorCode::InternalError,
        }
    }
}

pub use data_platform_types::ErrorCode;

pub type AppResult<T> = Result<T, AppError>;
