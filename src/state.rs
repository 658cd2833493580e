//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use crate::{
    config::Config,
    db::repositories::PlayerRepository,
    services::{ErrorHandler, PlayerService},
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    players: PlayerService,

    errors: ErrorHandler,

    /// Application configuration
    config: Config,
}

impl AppState {
    /// Create a new application state over the given player store
    pub fn new(repository: Arc<dyn PlayerRepository>, config: Config) -> Self {
        let errors = ErrorHandler;

        Self {
            inner: Arc::new(AppStateInner {
                players: PlayerService::new(repository, errors),
                errors,
                config,
            }),
        }
    }

    pub fn players(&self) -> &PlayerService {
        &self.inner.players
    }

    /// Error handler shared by the transport layer
    pub fn errors(&self) -> ErrorHandler {
        self.inner.errors
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
