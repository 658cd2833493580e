//! Player service

use std::sync::Arc;

use serde_json::json;

use crate::{
    db::repositories::PlayerRepository,
    error::{AppError, AppResult},
    middleware::RequestContext,
    models::{Player, PlayerStatistics, Sex},
    services::{
        error_handler::{ErrorContext, ErrorHandler},
        statistics,
    },
};

/// Player service for business logic
///
/// Every failure leaves through [`ErrorHandler::handle`], tagged with the
/// action and the correlation id of the calling request.
#[derive(Clone)]
pub struct PlayerService {
    repository: Arc<dyn PlayerRepository>,
    errors: ErrorHandler,
}

impl PlayerService {
    pub fn new(repository: Arc<dyn PlayerRepository>, errors: ErrorHandler) -> Self {
        Self { repository, errors }
    }

    /// All players ascending by rank; equal ranks keep store order
    pub fn list_sorted(&self, ctx: &RequestContext) -> AppResult<Vec<Player>> {
        self.list_sorted_by_sex(ctx, None)
    }

    /// Same as [`Self::list_sorted`], optionally restricted to one sex
    pub fn list_sorted_by_sex(
        &self,
        ctx: &RequestContext,
        sex: Option<Sex>,
    ) -> AppResult<Vec<Player>> {
        let mut players = self.repository.list().map_err(|err| {
            self.errors.handle(
                err,
                ErrorContext::new("players.list")
                    .with_request(ctx)
                    .with_metadata(json!({ "sex": sex.map(|s| s.to_string()) })),
            )
        })?;

        if let Some(sex) = sex {
            players.retain(|p| p.sex == sex);
        }
        players.sort_by_key(|p| p.data.rank);

        Ok(players)
    }

    /// Player with the given id, or [`AppError::NotFound`]
    pub fn find_by_id(&self, ctx: &RequestContext, id: i64) -> AppResult<Player> {
        self.repository
            .find_by_id(id)
            .and_then(|found| found.ok_or_else(|| AppError::player_not_found(id)))
            .map_err(|err| {
                self.errors.handle(
                    err,
                    ErrorContext::new("players.find_by_id")
                        .with_request(ctx)
                        .with_metadata(json!({ "id": id })),
                )
            })
    }

    /// Aggregates over one snapshot of the store
    pub fn get_statistics(&self, ctx: &RequestContext) -> AppResult<PlayerStatistics> {
        let snapshot = self.repository.list().map_err(|err| {
            self.errors.handle(
                err,
                ErrorContext::new("players.statistics").with_request(ctx),
            )
        })?;

        Ok(statistics::compute(&snapshot))
    }

    /// Add a player, failing with [`AppError::DuplicateId`] if the id is taken
    pub fn add_player(&self, ctx: &RequestContext, candidate: Player) -> AppResult<Player> {
        let id = candidate.id;

        self.repository
            .find_by_id(id)
            .and_then(|existing| match existing {
                Some(_) => Err(AppError::DuplicateId(id)),
                None => self.repository.add(candidate),
            })
            .map_err(|err| {
                self.errors.handle(
                    err,
                    ErrorContext::new("players.add")
                        .with_request(ctx)
                        .with_metadata(json!({ "id": id })),
                )
            })
    }

    /// Number of stored players
    pub fn player_count(&self, ctx: &RequestContext) -> AppResult<usize> {
        self.repository.list().map(|players| players.len()).map_err(|err| {
            self.errors
                .handle(err, ErrorContext::new("players.count").with_request(ctx))
        })
    }
}
