//! Player repository

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{
    error::{AppError, AppResult},
    models::Player,
};

/// Storage capability for player records.
///
/// Every returned value is an owned copy; callers can never reach into the
/// stored collection.
#[cfg_attr(test, mockall::automock)]
pub trait PlayerRepository: Send + Sync {
    /// Snapshot of all records in insertion order
    fn list(&self) -> AppResult<Vec<Player>>;

    fn find_by_id(&self, id: i64) -> AppResult<Option<Player>>;

    /// Append a record, failing with [`AppError::DuplicateId`] if the id is taken
    fn add(&self, player: Player) -> AppResult<Player>;
}

/// In-memory player store.
///
/// Readers share the lock, `add` takes it exclusively so a snapshot never
/// contains a partially appended record.
#[derive(Debug, Default)]
pub struct InMemoryPlayerRepository {
    players: RwLock<Vec<Player>>,
}

impl InMemoryPlayerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with `players`
    pub fn with_players(players: Vec<Player>) -> AppResult<Self> {
        let repository = Self::new();
        for player in players {
            repository.add(player)?;
        }
        Ok(repository)
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, Vec<Player>>> {
        self.players
            .read()
            .map_err(|_| AppError::Internal(anyhow::anyhow!("player store lock poisoned")))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, Vec<Player>>> {
        self.players
            .write()
            .map_err(|_| AppError::Internal(anyhow::anyhow!("player store lock poisoned")))
    }
}

impl PlayerRepository for InMemoryPlayerRepository {
    fn list(&self) -> AppResult<Vec<Player>> {
        Ok(self.read()?.clone())
    }

    fn find_by_id(&self, id: i64) -> AppResult<Option<Player>> {
        Ok(self.read()?.iter().find(|p| p.id == id).cloned())
    }

    fn add(&self, player: Player) -> AppResult<Player> {
        let mut players = self.write()?;

        if players.iter().any(|p| p.id == player.id) {
            return Err(AppError::DuplicateId(player.id));
        }

        players.push(player.clone());
        Ok(player)
    }
}
