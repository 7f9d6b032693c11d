//! # API Errors
//!
//! `ApiError` implements `IntoResponse`, so handlers return
//! `Result<Json<T>, ApiError>` and every failure leaves the server as the
//! same JSON shape: `{"error", "message", "details"?}`.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use stacksense_core::StackError;
use std::fmt;

/// Error body returned for every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Errors surfaced by HTTP handlers.
#[derive(Debug)]
pub enum ApiError {
    /// 400 - body is not well-formed JSON
    BadRequest(String),
    /// 403 - operation disabled by configuration
    Forbidden(String),
    /// 413 - body exceeds the configured limit
    PayloadTooLarge(String),
    /// 415 - body is not declared as JSON
    UnsupportedMediaType(String),
    /// 422 - JSON does not match the request schema
    Unprocessable(String),
    /// 422 - a field failed semantic validation
    Validation { field: String, reason: String },
    /// 429 - global rate limit exceeded
    TooManyRequests,
    /// 500 - catalog could not be (re)loaded
    Catalog(String),
    /// 500 - anything else
    Internal(String),
}

impl ApiError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::Unprocessable(_) | ApiError::Validation { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Catalog(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorResponse {
        match self {
            ApiError::BadRequest(msg) => ErrorResponse::new("bad_request", msg.as_str()),
            ApiError::Forbidden(msg) => ErrorResponse::new("forbidden", msg.as_str()),
            ApiError::PayloadTooLarge(msg) => ErrorResponse::new("payload_too_large", msg.as_str()),
            ApiError::UnsupportedMediaType(msg) => {
                ErrorResponse::new("unsupported_media_type", msg.as_str())
            }
            ApiError::Unprocessable(msg) => ErrorResponse::new("invalid_request", msg.as_str()),
            ApiError::Validation { field, reason } => {
                ErrorResponse::new(
                    "validation_error",
                    format!("Invalid field `{}`: {}", field, reason),
                )
                .with_details(field.as_str())
            }
            ApiError::TooManyRequests => ErrorResponse::new("rate_limited", "Too Many Requests"),
            ApiError::Catalog(msg) => ErrorResponse::new("catalog_error", msg.as_str()),
            ApiError::Internal(msg) => ErrorResponse::new("internal_error", msg.as_str()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = self.body();
        write!(f, "{}: {}", body.error, body.message)
    }
}

impl std::error::Error for ApiError {}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonSyntaxError(e) => ApiError::BadRequest(e.body_text()),
            JsonRejection::JsonDataError(e) => ApiError::Unprocessable(e.body_text()),
            JsonRejection::MissingJsonContentType(e) => {
                ApiError::UnsupportedMediaType(e.body_text())
            }
            other if other.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                ApiError::PayloadTooLarge(other.body_text())
            }
            other => ApiError::BadRequest(other.body_text()),
        }
    }
}

impl From<StackError> for ApiError {
    fn from(err: StackError) -> Self {
        match err {
            StackError::InvalidRequirements { field, reason } => ApiError::Validation {
                field: field.to_string(),
                reason,
            },
            StackError::CatalogSyntax(_) | StackError::CatalogMalformed { .. } => {
                ApiError::Catalog(err.to_string())
            }
            StackError::Config(_) | StackError::Io(_) => ApiError::Internal(err.to_string()),
        }
    }
}

/// Handler result alias.
pub type ApiResult<T> = Result<T, ApiError>;
