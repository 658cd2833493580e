//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain,
//! and assembles them with the middleware stack into the application router.

pub mod health;
pub mod players;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderName, Method, Uri},
    middleware,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    constants::REQUEST_ID_HEADER,
    error::AppError,
    middleware::{envelope_middleware, logging_middleware, request_context_middleware},
    state::AppState,
};

/// Create all API routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(players::routes())
}

/// Unknown routes go through the regular error pipeline
async fn route_not_found(method: Method, uri: Uri) -> AppError {
    AppError::NotFound(format!("Cannot {method} {}", uri.path()))
}

/// Build the application router with its middleware stack
pub fn create_router(state: AppState) -> Router {
    let max_body_bytes = state.config().server.max_body_bytes;

    routes()
        .fallback(route_not_found)
        // Innermost first
        .layer(middleware::from_fn(envelope_middleware))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_context_middleware))
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
                .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
