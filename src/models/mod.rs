//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod player;
pub mod player_input;
pub mod statistics;

pub use player::*;
pub use player_input::CreatePlayerRequest;
pub use statistics::*;
