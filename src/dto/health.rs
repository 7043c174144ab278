use serde::Serialize;
use utoipa::ToSchema;

/// Simple health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("ok" or "degraded").
    pub status: String,
    /// Whether a draw is currently revealing players.
    pub drawing: bool,
    /// Whether the wheel is currently spinning.
    pub spinning: bool,
}

impl HealthResponse {
    /// Create a health response indicating the system is operating normally.
    pub fn ok(drawing: bool, spinning: bool) -> Self {
        Self {
            status: "ok".to_string(),
            drawing,
            spinning,
        }
    }

    /// Create a health response indicating the system is in degraded mode.
    pub fn degraded(drawing: bool, spinning: bool) -> Self {
        Self {
            status: "degraded".to_string(),
            drawing,
            spinning,
        }
    }
}
