//! DTOs of the team generator endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::common::PointDto,
    state::teams::{RosterPreview, Team},
};

/// Number of accent colours the page cycles through for team panels.
const PANEL_ACCENTS: usize = 4;

/// Payload starting a new team draw.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct GenerateTeamsRequest {
    /// Newline separated roster; blank lines are ignored.
    #[validate(length(max = 20000))]
    pub players: String,
    /// Requested number of teams; zero or negative is rejected.
    pub team_count: i64,
    /// Optional per-team display names, by position.
    #[serde(default)]
    #[validate(length(max = 64))]
    pub team_names: Vec<String>,
    /// Point the cards fly from (centre of the roster input).
    #[serde(default)]
    pub source: Option<PointDto>,
}

/// Payload of the live roster preview.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RosterPreviewRequest {
    /// Newline separated roster as currently typed.
    #[validate(length(max = 20000))]
    pub players: String,
    /// Team count as currently typed.
    pub team_count: i64,
}

/// Counters shown beside the roster input.
#[derive(Debug, Serialize, ToSchema)]
pub struct RosterPreviewResponse {
    /// Non-blank roster lines.
    pub player_count: usize,
    /// Requested teams, zero when the input is not a positive number.
    pub team_count: usize,
    /// Whether the generate button is enabled.
    pub can_generate: bool,
}

impl From<RosterPreview> for RosterPreviewResponse {
    fn from(preview: RosterPreview) -> Self {
        Self {
            player_count: preview.player_count,
            team_count: preview.team_count,
            can_generate: preview.can_generate(),
        }
    }
}

/// Manual drag-and-drop move of one member.
#[derive(Debug, Deserialize, ToSchema)]
pub struct MoveMemberRequest {
    /// Team the member is dragged from.
    pub from_team: usize,
    /// Position of the member in that team.
    pub from_index: usize,
    /// Team the member is appended to.
    pub to_team: usize,
}

/// One row of a team panel.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MemberSummary {
    /// One-based badge number.
    pub position: usize,
    /// Player name.
    pub name: String,
}

/// Render projection of a team panel.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TeamSummary {
    /// Position of the team in the roster.
    pub index: usize,
    /// Display name.
    pub name: String,
    /// Number of members.
    pub size: usize,
    /// Accent colour slot of the panel.
    pub accent: usize,
    /// Members in panel order.
    pub members: Vec<MemberSummary>,
}

impl TeamSummary {
    /// Project a team at `index` into its panel representation.
    pub fn project(index: usize, team: &Team) -> Self {
        Self {
            index,
            name: team.name.clone(),
            size: team.members.len(),
            accent: index % PANEL_ACCENTS,
            members: team
                .members
                .iter()
                .enumerate()
                .map(|(position, name)| MemberSummary {
                    position: position + 1,
                    name: name.clone(),
                })
                .collect(),
        }
    }
}

/// Project every team.
pub fn team_summaries(teams: &[Team]) -> Vec<TeamSummary> {
    teams
        .iter()
        .enumerate()
        .map(|(index, team)| TeamSummary::project(index, team))
        .collect()
}

/// Current teams as seen by the page.
#[derive(Debug, Serialize, ToSchema)]
pub struct TeamsResponse {
    /// Every team panel.
    pub teams: Vec<TeamSummary>,
    /// Whether a draw is still revealing players.
    pub drawing: bool,
}

/// Acknowledgement of a started draw.
#[derive(Debug, Serialize, ToSchema)]
pub struct DrawStartedResponse {
    /// Identifier repeated in every event of the draw.
    pub draw_id: Uuid,
    /// Players to reveal.
    pub total: usize,
    /// Teams being filled.
    pub team_count: usize,
    /// Expected duration of the whole reveal, in milliseconds.
    pub estimated_duration_ms: u64,
}

/// Sample roster for the "fill sample" button.
#[derive(Debug, Serialize, ToSchema)]
pub struct SampleRosterResponse {
    /// Newline separated sample names.
    pub players: String,
}
