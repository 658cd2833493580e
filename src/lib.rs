//! PlayerStats - Player Records Service
//!
//! This library provides the core functionality for PlayerStats, a small
//! record service over tennis player profiles with aggregate statistics.
//!
//! # Features
//!
//! - In-memory player store seeded from a JSON document
//! - Country win ratio ranking, average BMI and median height
//! - Correlation id per request, echoed on responses and attached to logs
//! - Closed error catalog with a single disclosure boundary
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic and statistics
//! - **Repositories**: Record storage
//! - **Models**: Domain models

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
