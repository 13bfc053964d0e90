use axum::{extract::State, http::StatusCode, response::Json};

use super::AppState;
use super::extract::{ApiJson, ApiPath};
use crate::error::ApiError;
use crate::models::{Player, PlayerInput};

// GET /api/v1/players - List all players
pub async fn list_players(State(state): State<AppState>) -> Result<Json<Vec<Player>>, ApiError> {
    let players = state.players.list_players().await?;

    Ok(Json(players))
}

// GET /api/v1/players/:team_id - List a team's players (empty for unknown teams)
pub async fn list_players_by_team(
    State(state): State<AppState>,
    ApiPath(team_id): ApiPath<i64>,
) -> Result<Json<Vec<Player>>, ApiError> {
    let players = state.players.list_players_by_team(team_id).await?;

    Ok(Json(players))
}

// GET /api/v1/players/:team_id/details/:id - Get player by ID
//
// The team segment must be an integer but is not checked against the player.
pub async fn get_player(
    State(state): State<AppState>,
    ApiPath((_team_id, id)): ApiPath<(i64, i64)>,
) -> Result<Json<Player>, ApiError> {
    let player = state.players.get_player(id).await?;

    Ok(Json(player))
}

// POST /api/v1/players - Create a player (admin)
pub async fn create_player(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<PlayerInput>,
) -> Result<(StatusCode, Json<Player>), ApiError> {
    input.validate()?;

    let player = state.players.create_player(&input).await?;
    tracing::info!(player_id = player.id, team_id = player.team_id, "player created");

    Ok((StatusCode::CREATED, Json(player)))
}

// PUT /api/v1/players/:id - Replace a player's fields (admin), 201 like teams
pub async fn update_player(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(input): ApiJson<PlayerInput>,
) -> Result<(StatusCode, Json<Player>), ApiError> {
    input.validate()?;

    let player = state.players.update_player(id, &input).await?;

    Ok((StatusCode::CREATED, Json(player)))
}

// DELETE /api/v1/players/:id - Delete a player (admin)
pub async fn delete_player(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    state.players.delete_player(id).await?;
    tracing::info!(player_id = id, "player deleted");

    Ok(StatusCode::NO_CONTENT)
}
