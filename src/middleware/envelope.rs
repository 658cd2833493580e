//! Response envelope middleware
//!
//! Successful JSON payloads leave the service as `{ "data": ..., "meta": ... }`.

use axum::{
    body::{Body, to_bytes},
    extract::Request,
    http::header::{CONTENT_LENGTH, CONTENT_TYPE},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::error::AppError;

/// Whether a payload already has the envelope shape
pub fn is_enveloped(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|object| object.contains_key("data") && object.contains_key("meta"))
}

/// Wrap a payload unless it is already enveloped
pub fn wrap(value: Value) -> Value {
    if is_enveloped(&value) {
        return value;
    }

    serde_json::json!({ "data": value, "meta": null })
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"))
}

/// Envelope middleware
pub async fn envelope_middleware(request: Request<Body>, next: Next) -> Response {
    let response = next.run(request).await;

    if !response.status().is_success() || !is_json(&response) {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(err) => {
            return AppError::Internal(anyhow::anyhow!("failed to buffer response body: {err}"))
                .into_response();
        }
    };

    let Ok(value) = serde_json::from_slice::<Value>(&bytes) else {
        return Response::from_parts(parts, Body::from(bytes));
    };

    match serde_json::to_vec(&wrap(value)) {
        Ok(wrapped) => {
            parts.headers.remove(CONTENT_LENGTH);
            Response::from_parts(parts, Body::from(wrapped))
        }
        Err(err) => AppError::Internal(err.into()).into_response(),
    }
}
