//! Player handler implementations

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde_json::{Value, json};

use crate::{
    constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE},
    error::{AppError, AppResult},
    middleware::RequestContext,
    models::{Player, PlayerStatistics},
    services::ErrorContext,
    state::AppState,
    utils::paginate,
};

use super::{
    request::{CreatePlayerRequest, ListPlayersQuery},
    response::PlayersListResponse,
};

/// Report a rejected input through the error handler
fn rejected(state: &AppState, ctx: &RequestContext, error: AppError) -> AppError {
    state.errors().handle(
        error,
        ErrorContext::new("players.validate").with_request(ctx),
    )
}

/// List players sorted by rank, optionally filtered and paginated
pub async fn list_players(
    State(state): State<AppState>,
    ctx: RequestContext,
    query: Result<Query<ListPlayersQuery>, QueryRejection>,
) -> AppResult<Json<PlayersListResponse>> {
    let Query(query) = query
        .map_err(|err| rejected(&state, &ctx, AppError::invalid_field("query", err.body_text())))?;

    let players = state.players().list_sorted_by_sex(&ctx, query.sex)?;

    if !query.is_paginated() {
        return Ok(Json(PlayersListResponse::All(players)));
    }

    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);

    Ok(Json(PlayersListResponse::Page(paginate(players, page, limit))))
}

/// Aggregate statistics over all players
pub async fn get_statistics(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> AppResult<Json<PlayerStatistics>> {
    let stats = state.players().get_statistics(&ctx)?;
    Ok(Json(stats))
}

/// Get a specific player
pub async fn get_player(
    State(state): State<AppState>,
    ctx: RequestContext,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<Player>> {
    let Path(id) = id.map_err(|err| {
        tracing::debug!(error = %err.body_text(), "Rejected player id");
        rejected(&state, &ctx, AppError::invalid_field("id", "id must be an integer"))
    })?;

    let player = state.players().find_by_id(&ctx, id)?;
    Ok(Json(player))
}

/// Add a new player
pub async fn add_player(
    State(state): State<AppState>,
    ctx: RequestContext,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Player>)> {
    let Json(payload) = payload.map_err(|err| {
        let error = if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(state.config().server.max_body_bytes)
        } else {
            AppError::invalid_field("body", err.body_text())
        };
        rejected(&state, &ctx, error)
    })?;

    let id = payload.get("id").cloned().unwrap_or(Value::Null);
    let candidate = CreatePlayerRequest::from_value(payload)
        .and_then(Player::try_from)
        .map_err(|err| {
            state.errors().handle(
                err,
                ErrorContext::new("players.validate")
                    .with_request(&ctx)
                    .with_metadata(json!({ "id": id })),
            )
        })?;

    let player = state.players().add_player(&ctx, candidate)?;

    Ok((StatusCode::CREATED, Json(player)))
}
