//! API error types

use hyper::StatusCode;
use serde::Serialize;
use thiserror::Error;

use crate::http::{
    build_404_response, build_405_response, build_413_response, build_error_response,
    build_json_response, HttpResponse,
};

/// Result type for endpoint handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// One rejected request field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub field: &'static str,
    pub message: &'static str,
}

impl ValidationIssue {
    pub const fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Errors surfaced to API callers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Body is not syntactically valid JSON or could not be read
    #[error("{0}")]
    BadRequest(String),

    /// Required fields missing, blank or mistyped
    #[error("request validation failed")]
    Validation(Vec<ValidationIssue>),

    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: u64 },

    #[error("not found")]
    NotFound,

    #[error("method not allowed")]
    MethodNotAllowed { allow: &'static str },

    /// Server-side defect; details are logged, never returned
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn into_response(self) -> HttpResponse {
        match self {
            Self::Validation(issues) => build_json_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                &serde_json::json!({
                    "error": "request validation failed",
                    "detail": issues,
                }),
            ),
            Self::PayloadTooLarge { limit } => build_413_response(limit),
            Self::NotFound => build_404_response(),
            Self::MethodNotAllowed { allow } => build_405_response(allow),
            other => build_error_response(other.status(), &other.to_string()),
        }
    }
}
