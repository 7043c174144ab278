/// Named sound cues forwarded to the page.
pub mod cues;
/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Theme preference.
pub mod preferences_service;
/// Server-Sent Events message generation.
pub mod sse_events;
/// Server-Sent Events broadcasting service.
pub mod sse_service;
/// Team generator and the draw animation task.
pub mod team_service;
/// Wheel names and spins.
pub mod wheel_service;
