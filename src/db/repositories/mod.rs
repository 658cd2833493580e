//! Player repositories
//!
//! Repositories own the stored records and hand out copies.

pub mod player_repo;

pub use player_repo::{InMemoryPlayerRepository, PlayerRepository};

#[cfg(test)]
pub use player_repo::MockPlayerRepository;
