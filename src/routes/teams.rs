use axum::{extract::State, http::StatusCode, response::Json};

use super::AppState;
use super::extract::{ApiJson, ApiPath};
use crate::error::ApiError;
use crate::models::{Team, TeamInput};

// GET /api/v1/teams - List all teams
pub async fn list_teams(State(state): State<AppState>) -> Result<Json<Vec<Team>>, ApiError> {
    let teams = state.teams.list_teams().await?;

    Ok(Json(teams))
}

// GET /api/v1/teams/:id - Get team by ID
pub async fn get_team(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Team>, ApiError> {
    let team = state.teams.get_team(id).await?;

    Ok(Json(team))
}

// POST /api/v1/teams - Create a team (admin)
pub async fn create_team(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<TeamInput>,
) -> Result<(StatusCode, Json<Team>), ApiError> {
    input.validate()?;

    let team = state.teams.create_team(&input).await?;
    tracing::info!(team_id = team.id, "team created");

    Ok((StatusCode::CREATED, Json(team)))
}

// PUT /api/v1/teams/:id - Replace a team's name and description (admin)
//
// Answers 201 rather than 200; existing clients depend on it.
pub async fn update_team(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(input): ApiJson<TeamInput>,
) -> Result<(StatusCode, Json<Team>), ApiError> {
    input.validate()?;

    let team = state.teams.update_team(id, &input).await?;

    Ok((StatusCode::CREATED, Json(team)))
}

// DELETE /api/v1/teams/:id - Delete a team (admin), whether or not it exists
pub async fn delete_team(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    state.teams.delete_team(id).await?;
    tracing::info!(team_id = id, "team deleted");

    Ok(StatusCode::NO_CONTENT)
}
