use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for Luck Center Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::sse::stream,
        crate::routes::teams::get_teams,
        crate::routes::teams::sample_roster,
        crate::routes::teams::preview,
        crate::routes::teams::generate,
        crate::routes::teams::cancel_draw,
        crate::routes::teams::move_member,
        crate::routes::teams::remove_member,
        crate::routes::teams::reset,
        crate::routes::wheel::list_names,
        crate::routes::wheel::add_name,
        crate::routes::wheel::clear_names,
        crate::routes::wheel::remove_name,
        crate::routes::wheel::fill_sample,
        crate::routes::wheel::spin,
        crate::routes::wheel::last_result,
        crate::routes::preferences::get_theme,
        crate::routes::preferences::set_theme,
        crate::routes::preferences::toggle_theme,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::common::ActionResponse,
            crate::dto::common::PointDto,
            crate::dto::teams::GenerateTeamsRequest,
            crate::dto::teams::RosterPreviewRequest,
            crate::dto::teams::RosterPreviewResponse,
            crate::dto::teams::MoveMemberRequest,
            crate::dto::teams::TeamSummary,
            crate::dto::teams::MemberSummary,
            crate::dto::teams::TeamsResponse,
            crate::dto::teams::DrawStartedResponse,
            crate::dto::teams::SampleRosterResponse,
            crate::dto::wheel::AddWheelNameRequest,
            crate::dto::wheel::AddWheelNameResponse,
            crate::dto::wheel::WheelNamesResponse,
            crate::dto::wheel::SpinStartedResponse,
            crate::dto::wheel::SpinResultResponse,
            crate::dto::preferences::ThemeDto,
            crate::dto::preferences::SetThemeRequest,
            crate::dto::preferences::ThemeResponse,
            crate::dto::sse::Handshake,
            crate::dto::sse::SystemStatus,
            crate::dto::sse::DrawStepEvent,
            crate::dto::sse::DrawStartedEvent,
            crate::dto::sse::DrawCommittedEvent,
            crate::dto::sse::DrawFinishedEvent,
            crate::dto::sse::TeamsUpdatedEvent,
            crate::dto::sse::WheelNamesEvent,
            crate::dto::sse::ThemeChangedEvent,
            crate::dto::sse::CueEvent,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "sse", description = "Server-sent events stream"),
        (name = "teams", description = "Team generator and draw animation"),
        (name = "wheel", description = "Wheel of names"),
        (name = "preferences", description = "Persisted page preferences"),
    )
)]
pub struct ApiDoc;
