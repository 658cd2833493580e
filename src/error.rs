//! Custom error types and handling
//!
//! This module defines the closed error catalog of the application and
//! implements conversion to HTTP responses for the Axum framework.
//!
//! Catalog errors with a client-class status are rendered as they are.
//! Everything else is disclosed only as a generic message plus an error id,
//! the full detail goes to the logs (see [`crate::services::ErrorHandler`]).

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    constants::{GENERIC_ERROR_MESSAGE, error_codes},
    services::error_handler::{ErrorContext, ErrorHandler},
    utils::{
        time::{format_timestamp, now_utc},
        validation::flatten_validation_errors,
    },
};

/// Default message of an invalid payload
pub const INVALID_PAYLOAD_MESSAGE: &str = "Invalid player payload";

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Catalog errors
    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    InvalidPayload {
        message: String,
        details: Vec<FieldViolation>,
    },

    #[error("Player id {0} already exists")]
    DuplicateId(i64),

    #[error("Request body exceeds {0} bytes")]
    PayloadTooLarge(usize),

    #[error("Data source unavailable: {0}")]
    DataSourceUnavailable(String),

    // Generic replacement minted by the error handler
    #[error("{}", GENERIC_ERROR_MESSAGE)]
    Unexpected { error_id: Uuid },

    // Unclassified failures
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Validation failure of a single field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Dot-separated path, e.g. `data.last` or `players.2.country.code`
    pub field: String,
    pub messages: Vec<String>,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            messages: vec![message.into()],
        }
    }
}

impl AppError {
    /// Lookup of a player id that is not in the store
    pub fn player_not_found(id: i64) -> Self {
        Self::NotFound(format!("Player with id {id} not found"))
    }

    /// Payload rejected with the given field violations
    pub fn invalid_payload(details: Vec<FieldViolation>) -> Self {
        Self::InvalidPayload {
            message: INVALID_PAYLOAD_MESSAGE.to_string(),
            details,
        }
    }

    /// Payload rejected because of a single field
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::invalid_payload(vec![FieldViolation::new(field, message)])
    }

    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => error_codes::NOT_FOUND,
            Self::InvalidPayload { .. } => error_codes::INVALID_PLAYER_PAYLOAD,
            Self::DuplicateId(_) => error_codes::DUPLICATE_PLAYER_ID,
            Self::PayloadTooLarge(_) => error_codes::PAYLOAD_TOO_LARGE,
            Self::DataSourceUnavailable(_) => error_codes::DATA_SOURCE_UNAVAILABLE,
            Self::Unexpected { .. } | Self::Internal(_) => error_codes::INTERNAL_ERROR,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidPayload { .. } | Self::DuplicateId(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::DataSourceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Unexpected { .. } | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether this error belongs to the closed catalog
    pub fn is_catalog(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_)
                | Self::InvalidPayload { .. }
                | Self::DuplicateId(_)
                | Self::PayloadTooLarge(_)
                | Self::DataSourceUnavailable(_)
        )
    }

    /// Catalog error with a status below 500; safe to disclose as-is
    pub fn is_client_error(&self) -> bool {
        self.is_catalog() && self.status_code().is_client_error()
    }

    /// `DuplicateId` is a specialization of `InvalidPayload`
    pub fn is_invalid_payload(&self) -> bool {
        matches!(self, Self::InvalidPayload { .. } | Self::DuplicateId(_))
    }

    /// Identifier handed out for server-class failures
    pub fn error_id(&self) -> Option<Uuid> {
        match self {
            Self::Unexpected { error_id } => Some(*error_id),
            _ => None,
        }
    }

    /// Structured details safe to include in the response body
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::InvalidPayload { details, .. } if !details.is_empty() => {
                Some(serde_json::json!({ "errors": details }))
            }
            _ => None,
        }
    }
}

/// Rendered outcome of an error, kept in the response extensions so the
/// request context middleware can finish the body with request data.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub details: Option<serde_json::Value>,
    pub error_id: Option<Uuid>,
}

impl From<AppError> for ErrorReport {
    fn from(error: AppError) -> Self {
        // Server-class errors that never went through the handler are
        // handled here, so their detail is logged and not disclosed.
        let error = if error.is_client_error() || error.error_id().is_some() {
            error
        } else {
            ErrorHandler.handle(error, ErrorContext::new("http.respond"))
        };

        Self {
            status: error.status_code(),
            code: error.error_code(),
            message: error.to_string(),
            details: error.details(),
            error_id: error.error_id(),
        }
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub status_code: u16,
    /// ISO-8601 timestamp
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    pub message: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
}

impl ErrorResponse {
    pub fn from_report(report: &ErrorReport) -> Self {
        Self {
            status_code: report.status.as_u16(),
            timestamp: format_timestamp(now_utc()),
            path: None,
            method: None,
            message: report.message.clone(),
            error_code: report.code.to_string(),
            details: report.details.clone(),
            error_id: report.error_id,
            correlation_id: None,
        }
    }

    /// Attach the request the error belongs to
    pub fn with_request(mut self, method: &str, path: &str, correlation_id: &str) -> Self {
        self.method = Some(method.to_string());
        self.path = Some(path.to_string());
        self.correlation_id = Some(correlation_id.to_string());
        self
    }
}

impl IntoResponse for ErrorReport {
    fn into_response(self) -> Response {
        let body = ErrorResponse::from_report(&self);
        let mut response = (self.status, Json(body)).into_response();
        response.extensions_mut().insert(self);
        response
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        ErrorReport::from(self).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::invalid_payload(flatten_validation_errors(&err))
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
