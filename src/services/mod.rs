//! Business logic services

pub mod error_handler;
pub mod player_service;
pub mod statistics;

pub use error_handler::{ErrorContext, ErrorHandler};
pub use player_service::PlayerService;
