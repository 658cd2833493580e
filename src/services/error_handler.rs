//! Error handler
//!
//! Single boundary deciding how a failure is logged and what is disclosed.

use serde_json::Value;
use tracing::{error, warn};
use uuid::Uuid;

use crate::{error::AppError, middleware::request_context::RequestContext};

/// Diagnostic context attached to a failure
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// What was being attempted, e.g. `players.find_by_id`
    pub action: &'static str,
    pub request_id: Option<String>,
    pub metadata: Option<Value>,
}

impl ErrorContext {
    pub fn new(action: &'static str) -> Self {
        Self {
            action,
            request_id: None,
            metadata: None,
        }
    }

    /// Enrich with the correlation id of the current request
    pub fn with_request(mut self, context: &RequestContext) -> Self {
        self.request_id = Some(context.request_id().to_string());
        self
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    fn request_id(&self) -> &str {
        self.request_id.as_deref().unwrap_or("-")
    }

    fn metadata_json(&self) -> String {
        self.metadata
            .as_ref()
            .map(Value::to_string)
            .unwrap_or_else(|| "{}".to_string())
    }
}

/// Classifies failures, logs them with their context and picks the error
/// that travels upward.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorHandler;

impl ErrorHandler {
    /// Handle a failure. The returned error must be propagated as `Err`.
    ///
    /// Client-class catalog errors are logged at warn level and returned
    /// unchanged. Anything else is logged at error level with full detail
    /// under a fresh error id, and replaced by [`AppError::Unexpected`]
    /// carrying only that id.
    #[must_use = "the handled error must be propagated"]
    pub fn handle(&self, error: AppError, context: ErrorContext) -> AppError {
        if error.is_client_error() {
            warn!(
                action = context.action,
                request_id = %context.request_id(),
                status = error.status_code().as_u16(),
                code = error.error_code(),
                metadata = %context.metadata_json(),
                "{}",
                error
            );
            return error;
        }

        // Already replaced further down the chain
        if error.error_id().is_some() {
            return error;
        }

        let error_id = Uuid::new_v4();
        error!(
            error_id = %error_id,
            action = context.action,
            request_id = %context.request_id(),
            status = error.status_code().as_u16(),
            code = error.error_code(),
            metadata = %context.metadata_json(),
            detail = ?error,
            "{}",
            error
        );

        AppError::Unexpected { error_id }
    }
}
