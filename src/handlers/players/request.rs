//! Player request DTOs

use serde::Deserialize;

use crate::models::Sex;

pub use crate::models::player_input::{CountryRequest, CreatePlayerRequest, PlayerDataRequest};

/// List players query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ListPlayersQuery {
    pub sex: Option<Sex>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ListPlayersQuery {
    /// Whether the caller asked for a page instead of the whole list
    pub fn is_paginated(&self) -> bool {
        self.page.is_some() || self.limit.is_some()
    }
}
