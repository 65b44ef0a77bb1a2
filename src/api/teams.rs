//! Maintenance team endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::MessageResponse;
use crate::{
    error::AppResult,
    models::team::{CreateTeam, Team, UpdateTeam},
    AppState,
};

/// List all teams
#[utoipa::path(
    get,
    path = "/teams",
    tag = "teams",
    responses(
        (status = 200, description = "Team list", body = Vec<Team>)
    )
)]
pub async fn list_teams(State(state): State<AppState>) -> AppResult<Json<Vec<Team>>> {
    let teams = state.services.teams.list().await?;
    Ok(Json(teams))
}

/// Get team by ID
#[utoipa::path(
    get,
    path = "/teams/{id}",
    tag = "teams",
    params(("id" = i32, Path, description = "Team ID")),
    responses(
        (status = 200, description = "Team details", body = Team),
        (status = 404, description = "Team not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_team(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Team>> {
    let team = state.services.teams.get_by_id(id).await?;
    Ok(Json(team))
}

/// Create team
#[utoipa::path(
    post,
    path = "/teams",
    tag = "teams",
    request_body = CreateTeam,
    responses(
        (status = 201, description = "Team created", body = Team),
        (status = 400, description = "Missing name", body = crate::error::ErrorResponse),
        (status = 409, description = "Team name already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_team(
    State(state): State<AppState>,
    Json(data): Json<CreateTeam>,
) -> AppResult<(StatusCode, Json<Team>)> {
    let team = state.services.teams.create(&data).await?;
    Ok((StatusCode::CREATED, Json(team)))
}

/// Update team
#[utoipa::path(
    put,
    path = "/teams/{id}",
    tag = "teams",
    params(("id" = i32, Path, description = "Team ID")),
    request_body = UpdateTeam,
    responses(
        (status = 200, description = "Team updated", body = Team),
        (status = 404, description = "Team not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Team name already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_team(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateTeam>,
) -> AppResult<Json<Team>> {
    let team = state.services.teams.update(id, &data).await?;
    Ok(Json(team))
}

/// Delete team (referencing equipment is kept)
#[utoipa::path(
    delete,
    path = "/teams/{id}",
    tag = "teams",
    params(("id" = i32, Path, description = "Team ID")),
    responses(
        (status = 200, description = "Team deleted", body = MessageResponse),
        (status = 404, description = "Team not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_team(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.services.teams.delete(id).await?;
    Ok(Json(MessageResponse::new("Team deleted successfully")))
}
