use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API error codes returned by catalog endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    InvalidInput,
    StorageError,
    UpstreamError,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::InvalidInput => "INVALID_INPUT",
            Self::StorageError => "STORAGE_ERROR",
            Self::UpstreamError => "UPSTREAM_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error body: `{ "error": "Unknown region", "code": "NOT_FOUND" }`.
///
/// `code` is optional so bodies from plain mock servers (`{ "error": ... }`) still parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, alias = "message")]
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
}

/// Parsing errors for closed code sets (plan tiers, currencies).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown plan tier: {0}")]
    UnknownPlanTier(String),

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_serde() {
        let code = ErrorCode::NotFound;
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, r#""NOT_FOUND""#);

        let parsed: ErrorCode = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, code);
    }

    #[test]
    fn test_error_body_without_code() {
        let body: ErrorBody = serde_json::from_str(r#"{"error":"Unknown region"}"#).unwrap();
        assert_eq!(body.error, "Unknown region");
        assert_eq!(body.code, None);
    }

    #[test]
    fn test_error_body_accepts_message_alias() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"message":"boom","code":"INTERNAL_ERROR"}"#).unwrap();
        assert_eq!(body.error, "boom");
        assert_eq!(body.code, Some(ErrorCode::InternalError));
    }
}
