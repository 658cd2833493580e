//! Player response DTOs

use serde::Serialize;

use crate::{models::Player, utils::Paginated};

/// Player list response
///
/// The page variant is already in envelope shape and passes through the
/// envelope middleware untouched.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PlayersListResponse {
    All(Vec<Player>),
    Page(Paginated<Player>),
}
