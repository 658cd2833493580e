//! HTTP middleware

pub mod envelope;
pub mod logging;
pub mod request_context;

pub use envelope::envelope_middleware;
pub use logging::logging_middleware;
pub use request_context::{RequestContext, request_context_middleware};
