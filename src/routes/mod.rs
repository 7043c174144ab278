use axum::Router;

use crate::state::SharedState;

/// OpenAPI document and Swagger UI.
pub mod docs;
/// Health check.
pub mod health;
/// Theme preference.
pub mod preferences;
/// Page event stream.
pub mod sse;
/// Team generator.
pub mod teams;
/// Wheel of names.
pub mod wheel;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(sse::router())
        .merge(teams::router())
        .merge(wheel::router())
        .merge(preferences::router())
        .merge(docs::router());

    api_router.with_state(state)
}
