use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use validator::Validate;

use crate::{
    dto::wheel::{
        AddWheelNameRequest, AddWheelNameResponse, SpinResultResponse, SpinStartedResponse,
        WheelNamesResponse,
    },
    error::AppError,
    services::wheel_service,
    state::SharedState,
};

/// Wheel of names endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route(
            "/wheel/names",
            get(list_names).post(add_name).delete(clear_names),
        )
        .route("/wheel/names/{index}", delete(remove_name))
        .route("/wheel/names/sample", post(fill_sample))
        .route("/wheel/spin", post(spin))
        .route("/wheel/result", get(last_result))
}

#[utoipa::path(
    get,
    path = "/wheel/names",
    tag = "wheel",
    responses((status = 200, description = "Wheel names", body = WheelNamesResponse))
)]
pub async fn list_names(State(state): State<SharedState>) -> Json<WheelNamesResponse> {
    Json(wheel_service::list(&state).await)
}

/// Add a name to the wheel; duplicates are reported with `added: false`.
#[utoipa::path(
    post,
    path = "/wheel/names",
    tag = "wheel",
    request_body = AddWheelNameRequest,
    responses(
        (status = 200, description = "Name added or already present", body = AddWheelNameResponse),
        (status = 400, description = "Blank name"),
        (status = 503, description = "Preference store unavailable")
    )
)]
pub async fn add_name(
    State(state): State<SharedState>,
    Json(payload): Json<AddWheelNameRequest>,
) -> Result<Json<AddWheelNameResponse>, AppError> {
    payload.validate()?;
    Ok(Json(wheel_service::add(&state, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/wheel/names",
    tag = "wheel",
    responses(
        (status = 200, description = "Wheel cleared", body = WheelNamesResponse),
        (status = 503, description = "Preference store unavailable")
    )
)]
pub async fn clear_names(
    State(state): State<SharedState>,
) -> Result<Json<WheelNamesResponse>, AppError> {
    Ok(Json(wheel_service::clear(&state).await?))
}

#[utoipa::path(
    delete,
    path = "/wheel/names/{index}",
    tag = "wheel",
    params(("index" = usize, Path, description = "Position of the name")),
    responses(
        (status = 200, description = "Name removed", body = WheelNamesResponse),
        (status = 404, description = "Stale index")
    )
)]
pub async fn remove_name(
    State(state): State<SharedState>,
    Path(index): Path<usize>,
) -> Result<Json<WheelNamesResponse>, AppError> {
    Ok(Json(wheel_service::remove(&state, index).await?))
}

/// Replace the names with the sample list.
#[utoipa::path(
    post,
    path = "/wheel/names/sample",
    tag = "wheel",
    responses((status = 200, description = "Sample names loaded", body = WheelNamesResponse))
)]
pub async fn fill_sample(
    State(state): State<SharedState>,
) -> Result<Json<WheelNamesResponse>, AppError> {
    Ok(Json(wheel_service::fill_sample(&state).await?))
}

/// Spin the wheel; the winner is published on the event stream once the spin is over.
#[utoipa::path(
    post,
    path = "/wheel/spin",
    tag = "wheel",
    responses(
        (status = 202, description = "Spin started", body = SpinStartedResponse),
        (status = 409, description = "Empty wheel or a spin already running")
    )
)]
pub async fn spin(
    State(state): State<SharedState>,
) -> Result<(StatusCode, Json<SpinStartedResponse>), AppError> {
    let started = wheel_service::spin(&state).await?;
    Ok((StatusCode::ACCEPTED, Json(started)))
}

#[utoipa::path(
    get,
    path = "/wheel/result",
    tag = "wheel",
    responses(
        (status = 200, description = "Last winner", body = SpinResultResponse),
        (status = 404, description = "No spin finished yet")
    )
)]
pub async fn last_result(
    State(state): State<SharedState>,
) -> Result<Json<SpinResultResponse>, AppError> {
    Ok(Json(wheel_service::last_result(&state).await?))
}
