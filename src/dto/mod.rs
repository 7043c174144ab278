use std::time::SystemTime;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// Shapes shared by several endpoints.
pub mod common;
/// Health check payload.
pub mod health;
/// Theme preference payloads.
pub mod preferences;
/// SSE event payloads.
pub mod sse;
/// Team generator payloads.
pub mod teams;
/// Wheel payloads.
pub mod wheel;

fn format_system_time(time: SystemTime) -> String {
    OffsetDateTime::from(time)
        .format(&Rfc3339)
        .unwrap_or_else(|_| "invalid-timestamp".into())
}
