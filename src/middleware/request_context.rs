//! Request context middleware
//!
//! Resolves the correlation id of every inbound request, makes it available
//! to handlers as an extractor, scopes all downstream logging to it and echoes
//! it on the response.

use std::convert::Infallible;

use axum::{
    Json,
    body::Body,
    extract::{FromRequestParts, Request},
    http::{HeaderValue, Method, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{Instrument, info_span};
use uuid::Uuid;

use crate::{
    constants::{MAX_REQUEST_ID_LENGTH, REQUEST_ID_HEADER},
    error::{ErrorReport, ErrorResponse},
};

/// Per-request context carrying the correlation id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    request_id: String,
}

impl RequestContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }

    /// Context with a freshly generated correlation id
    pub fn generate() -> Self {
        Self::new(Uuid::new_v4().to_string())
    }

    /// Context for a caller-supplied correlation id.
    ///
    /// The id is kept (trimmed) when it is non-empty and at most
    /// [`MAX_REQUEST_ID_LENGTH`] characters long, otherwise a fresh one is
    /// generated.
    pub fn from_header(incoming: Option<&str>) -> Self {
        match incoming.map(str::trim) {
            Some(id) if !id.is_empty() && id.chars().count() <= MAX_REQUEST_ID_LENGTH => {
                Self::new(id)
            }
            _ => Self::generate(),
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .unwrap_or_else(RequestContext::generate))
    }
}

/// Request context middleware
pub async fn request_context_middleware(mut request: Request<Body>, next: Next) -> Response {
    let incoming = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok());
    let context = RequestContext::from_header(incoming);

    let method = request.method().clone();
    let path = request.uri().path().to_string();
    request.extensions_mut().insert(context.clone());

    let span = info_span!(
        "request",
        request_id = %context.request_id(),
        method = %method,
        path = %path,
    );
    let mut response = next.run(request).instrument(span).await;

    if let Some(report) = response.extensions_mut().remove::<ErrorReport>() {
        response = render_error(report, &method, &path, &context);
    }

    if let Ok(value) = HeaderValue::from_str(context.request_id()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Final error body, completed with the request it belongs to
fn render_error(report: ErrorReport, method: &Method, path: &str, context: &RequestContext) -> Response {
    let body = ErrorResponse::from_report(&report).with_request(
        method.as_str(),
        path,
        context.request_id(),
    );

    (report.status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::body_json;
    use axum::{Router, middleware, routing::get};
    use futures::future::join_all;
    use tower::ServiceExt;

    async fn echo_after_yielding(context: RequestContext) -> String {
        for _ in 0..16 {
            tokio::task::yield_now().await;
        }
        context.request_id().to_string()
    }

    async fn always_missing() -> crate::error::AppError {
        crate::error::AppError::player_not_found(404)
    }

    fn echo_app() -> Router {
        Router::new()
            .route("/echo", get(echo_after_yielding))
            .route("/missing", get(always_missing))
            .layer(middleware::from_fn(request_context_middleware))
    }

    fn request(path: &str, request_id: Option<&str>) -> Request<Body> {
        let mut builder = axum::http::Request::builder().uri(path);
        if let Some(id) = request_id {
            builder = builder.header(REQUEST_ID_HEADER, id);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_caller_id_is_kept() {
        assert_eq!(RequestContext::from_header(Some("abc-123")).request_id(), "abc-123");
        assert_eq!(RequestContext::from_header(Some("  abc-123 ")).request_id(), "abc-123");
    }

    #[test]
    fn test_invalid_caller_id_is_replaced() {
        let too_long = "x".repeat(200);
        let replaced = RequestContext::from_header(Some(&too_long));
        assert_ne!(replaced.request_id(), too_long);
        assert!(Uuid::parse_str(replaced.request_id()).is_ok());

        let blank = RequestContext::from_header(Some("   "));
        assert!(Uuid::parse_str(blank.request_id()).is_ok());

        let absent = RequestContext::from_header(None);
        assert!(Uuid::parse_str(absent.request_id()).is_ok());
    }

    #[test]
    fn test_boundary_length_is_accepted() {
        let exact = "y".repeat(MAX_REQUEST_ID_LENGTH);
        assert_eq!(RequestContext::from_header(Some(&exact)).request_id(), exact);
    }

    #[tokio::test]
    async fn test_id_is_echoed_on_response() {
        let response = echo_app().oneshot(request("/echo", Some("abc-123"))).await.unwrap();

        assert_eq!(response.headers()[REQUEST_ID_HEADER], "abc-123");
    }

    #[tokio::test]
    async fn test_generated_id_is_echoed_on_response() {
        let response = echo_app()
            .oneshot(request("/echo", Some(&"z".repeat(200))))
            .await
            .unwrap();

        let echoed = response.headers()[REQUEST_ID_HEADER].to_str().unwrap().to_string();
        assert!(Uuid::parse_str(&echoed).is_ok());
    }

    #[tokio::test]
    async fn test_error_body_is_completed() {
        let response = echo_app().oneshot(request("/missing", Some("err-1"))).await.unwrap();
        let body = body_json(response).await;

        assert_eq!(body["statusCode"], 404);
        assert_eq!(body["path"], "/missing");
        assert_eq!(body["method"], "GET");
        assert_eq!(body["correlationId"], "err-1");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_requests_never_share_ids() {
        let app = echo_app();

        let calls = (0..64).map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                let id = format!("req-{i}");
                let response = app.oneshot(request("/echo", Some(&id))).await.unwrap();
                let header = response.headers()[REQUEST_ID_HEADER].to_str().unwrap().to_string();
                let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                    .await
                    .unwrap();
                (id, header, String::from_utf8(bytes.to_vec()).unwrap())
            })
        });

        for result in join_all(calls).await {
            let (id, header, body) = result.unwrap();
            assert_eq!(header, id);
            assert_eq!(body, id);
        }
    }
}
