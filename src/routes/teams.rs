use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use validator::Validate;

use crate::{
    dto::{
        common::ActionResponse,
        teams::{
            DrawStartedResponse, GenerateTeamsRequest, MoveMemberRequest, RosterPreviewRequest,
            RosterPreviewResponse, SampleRosterResponse, TeamsResponse,
        },
    },
    error::AppError,
    services::team_service,
    state::SharedState,
};

/// Team generator endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/teams", get(get_teams))
        .route("/teams/sample", get(sample_roster))
        .route("/teams/preview", post(preview))
        .route("/teams/generate", post(generate))
        .route("/teams/draw/cancel", post(cancel_draw))
        .route("/teams/move", post(move_member))
        .route("/teams/{team}/members/{member}", delete(remove_member))
        .route("/teams/reset", post(reset))
}

/// Current teams; `drawing` is true while a draw is still revealing players.
#[utoipa::path(
    get,
    path = "/teams",
    tag = "teams",
    responses((status = 200, description = "Current teams", body = TeamsResponse))
)]
pub async fn get_teams(State(state): State<SharedState>) -> Json<TeamsResponse> {
    Json(team_service::get_teams(&state).await)
}

#[utoipa::path(
    get,
    path = "/teams/sample",
    tag = "teams",
    responses((status = 200, description = "Sample roster", body = SampleRosterResponse))
)]
pub async fn sample_roster() -> Json<SampleRosterResponse> {
    Json(team_service::sample_roster())
}

/// Count usable players for the live counters beside the roster input.
#[utoipa::path(
    post,
    path = "/teams/preview",
    tag = "teams",
    request_body = RosterPreviewRequest,
    responses(
        (status = 200, description = "Roster counters", body = RosterPreviewResponse),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn preview(
    Json(payload): Json<RosterPreviewRequest>,
) -> Result<Json<RosterPreviewResponse>, AppError> {
    payload.validate()?;
    Ok(Json(team_service::preview(payload)))
}

/// Assign the roster to teams and start revealing it over SSE.
#[utoipa::path(
    post,
    path = "/teams/generate",
    tag = "teams",
    request_body = GenerateTeamsRequest,
    responses(
        (status = 202, description = "Draw started", body = DrawStartedResponse),
        (status = 400, description = "Invalid team count"),
        (status = 409, description = "A draw is already in progress"),
        (status = 422, description = "Fewer players than teams")
    )
)]
pub async fn generate(
    State(state): State<SharedState>,
    Json(payload): Json<GenerateTeamsRequest>,
) -> Result<(StatusCode, Json<DrawStartedResponse>), AppError> {
    payload.validate()?;
    let started = team_service::generate(&state, payload).await?;
    Ok((StatusCode::ACCEPTED, Json(started)))
}

/// Stop the running draw before its next step.
#[utoipa::path(
    post,
    path = "/teams/draw/cancel",
    tag = "teams",
    responses(
        (status = 200, description = "Cancellation requested", body = ActionResponse),
        (status = 409, description = "No draw in progress")
    )
)]
pub async fn cancel_draw(
    State(state): State<SharedState>,
) -> Result<Json<ActionResponse>, AppError> {
    Ok(Json(team_service::cancel_draw(&state).await?))
}

/// Drag-and-drop a member onto another team.
#[utoipa::path(
    post,
    path = "/teams/move",
    tag = "teams",
    request_body = MoveMemberRequest,
    responses(
        (status = 200, description = "Member moved", body = TeamsResponse),
        (status = 404, description = "Stale team or member index"),
        (status = 409, description = "A draw is in progress")
    )
)]
pub async fn move_member(
    State(state): State<SharedState>,
    Json(payload): Json<MoveMemberRequest>,
) -> Result<Json<TeamsResponse>, AppError> {
    Ok(Json(team_service::move_member(&state, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/teams/{team}/members/{member}",
    tag = "teams",
    params(
        ("team" = usize, Path, description = "Index of the team"),
        ("member" = usize, Path, description = "Index of the member within the team")
    ),
    responses(
        (status = 200, description = "Member removed", body = TeamsResponse),
        (status = 404, description = "Stale team or member index"),
        (status = 409, description = "A draw is in progress")
    )
)]
pub async fn remove_member(
    State(state): State<SharedState>,
    Path((team, member)): Path<(usize, usize)>,
) -> Result<Json<TeamsResponse>, AppError> {
    Ok(Json(
        team_service::remove_member(&state, team, member).await?,
    ))
}

/// Discard every team.
#[utoipa::path(
    post,
    path = "/teams/reset",
    tag = "teams",
    responses(
        (status = 200, description = "Teams discarded", body = TeamsResponse),
        (status = 409, description = "A draw is in progress")
    )
)]
pub async fn reset(State(state): State<SharedState>) -> Result<Json<TeamsResponse>, AppError> {
    Ok(Json(team_service::reset(&state).await?))
}
