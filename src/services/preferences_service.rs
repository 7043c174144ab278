use tracing::info;

use crate::{
    dao::preferences::Theme,
    dto::preferences::{SetThemeRequest, ThemeResponse},
    error::ServiceError,
    services::sse_events,
    state::SharedState,
};

/// Theme stored for the page.
pub async fn get_theme(state: &SharedState) -> Result<ThemeResponse, ServiceError> {
    Ok(state.preferences().load_theme().await?.into())
}

/// Replace the theme preference.
pub async fn set_theme(
    state: &SharedState,
    request: SetThemeRequest,
) -> Result<ThemeResponse, ServiceError> {
    store_theme(state, request.theme.into()).await
}

/// Flip between dark and light mode.
pub async fn toggle_theme(state: &SharedState) -> Result<ThemeResponse, ServiceError> {
    let current = state.preferences().load_theme().await?;
    store_theme(state, current.toggled()).await
}

async fn store_theme(state: &SharedState, theme: Theme) -> Result<ThemeResponse, ServiceError> {
    state.preferences().save_theme(theme).await?;
    info!(?theme, "theme preference updated");
    sse_events::broadcast_theme_changed(state, theme);
    Ok(theme.into())
}
