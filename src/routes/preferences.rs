use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::preferences::{SetThemeRequest, ThemeResponse},
    error::AppError,
    services::preferences_service,
    state::SharedState,
};

/// Persisted page preferences.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/preferences/theme", get(get_theme).put(set_theme))
        .route("/preferences/theme/toggle", post(toggle_theme))
}

#[utoipa::path(
    get,
    path = "/preferences/theme",
    tag = "preferences",
    responses(
        (status = 200, description = "Stored theme", body = ThemeResponse),
        (status = 503, description = "Preference store unavailable")
    )
)]
pub async fn get_theme(State(state): State<SharedState>) -> Result<Json<ThemeResponse>, AppError> {
    Ok(Json(preferences_service::get_theme(&state).await?))
}

#[utoipa::path(
    put,
    path = "/preferences/theme",
    tag = "preferences",
    request_body = SetThemeRequest,
    responses(
        (status = 200, description = "Theme stored", body = ThemeResponse),
        (status = 503, description = "Preference store unavailable")
    )
)]
pub async fn set_theme(
    State(state): State<SharedState>,
    Json(payload): Json<SetThemeRequest>,
) -> Result<Json<ThemeResponse>, AppError> {
    Ok(Json(preferences_service::set_theme(&state, payload).await?))
}

/// Switch between dark and light mode.
#[utoipa::path(
    post,
    path = "/preferences/theme/toggle",
    tag = "preferences",
    responses(
        (status = 200, description = "Theme toggled", body = ThemeResponse),
        (status = 503, description = "Preference store unavailable")
    )
)]
pub async fn toggle_theme(
    State(state): State<SharedState>,
) -> Result<Json<ThemeResponse>, AppError> {
    Ok(Json(preferences_service::toggle_theme(&state).await?))
}
