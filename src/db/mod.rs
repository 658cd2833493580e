//! Storage module
//!
//! Seed loading and the player repositories.

pub mod repositories;
pub mod seed;

pub use seed::load_players;
