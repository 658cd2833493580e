//! Player handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router,
    routing::get,
};

use crate::state::AppState;

/// Player routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/players", get(handler::list_players).post(handler::add_player))
        .route("/players/statistics", get(handler::get_statistics))
        .route("/players/{id}", get(handler::get_player))
}
