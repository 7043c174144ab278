use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    dto::{common::PointDto, teams::TeamSummary},
    state::draw::DrawEvent,
};

#[derive(Clone, Debug)]
/// Dispatched payload carried across SSE channels.
pub struct ServerEvent {
    /// SSE event name; `None` sends an unnamed message.
    pub event: Option<String>,
    /// Raw data field, usually JSON.
    pub data: String,
}

impl ServerEvent {
    /// Build an event from a name and a raw data string.
    pub fn new(event: Option<String>, data: String) -> Self {
        Self { event, data }
    }

    /// Convenience wrapper that serialises `payload` into the SSE data field.
    pub fn json<E, T>(event: E, payload: &T) -> serde_json::Result<Self>
    where
        E: Into<Option<String>>,
        T: Serialize,
    {
        Ok(Self {
            event: event.into(),
            data: serde_json::to_string(payload)?,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
/// Initial metadata sent to an SSE client when it connects.
pub struct Handshake {
    /// Greeting text.
    pub message: String,
    /// Whether a draw is in flight at connection time.
    pub drawing: bool,
    /// Whether the wheel is spinning at connection time.
    pub spinning: bool,
    /// Whether preferences are only kept in memory.
    pub degraded: bool,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when the backend enters or leaves degraded mode.
pub struct SystemStatus {
    /// True while preferences are only kept in memory.
    pub degraded: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
/// One step of a draw, as sent for the flight and arrival signals.
pub struct DrawStepEvent {
    /// Draw the step belongs to.
    pub draw_id: Uuid,
    /// Zero-based step number.
    pub step: usize,
    /// Steps in the draw.
    pub total: usize,
    /// Player being revealed.
    pub player: String,
    /// Point the card flies from.
    pub source: PointDto,
    /// Team receiving the player.
    pub destination_team: usize,
    /// Team index recorded when the player was assigned.
    pub team_index_at_assignment: usize,
    /// Tilt of the flying card.
    pub tilt_degrees: f64,
}

impl From<&DrawEvent> for DrawStepEvent {
    fn from(event: &DrawEvent) -> Self {
        Self {
            draw_id: event.draw_id,
            step: event.step,
            total: event.total,
            player: event.player.clone(),
            source: event.source.into(),
            destination_team: event.destination_team,
            team_index_at_assignment: event.team_index_at_assignment,
            tilt_degrees: event.tilt_degrees,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when a draw begins; the panels are rendered empty.
pub struct DrawStartedEvent {
    /// Identifier of the draw.
    pub draw_id: Uuid,
    /// Players to reveal.
    pub total: usize,
    /// Empty team panels.
    pub teams: Vec<TeamSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast after a player has been added to its team.
pub struct DrawCommittedEvent {
    /// Step just committed.
    pub step: DrawStepEvent,
    /// Teams including the committed player.
    pub teams: Vec<TeamSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when a draw ends, whether it completed or was cancelled.
pub struct DrawFinishedEvent {
    /// Identifier of the draw.
    pub draw_id: Uuid,
    /// Players actually revealed.
    pub committed: usize,
    /// Players the draw was meant to reveal.
    pub total: usize,
    /// Final teams.
    pub teams: Vec<TeamSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast whenever the teams change outside a draw (move, removal, reset).
pub struct TeamsUpdatedEvent {
    /// Teams after the edit.
    pub teams: Vec<TeamSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast whenever the wheel names change.
pub struct WheelNamesEvent {
    /// Every stored name.
    pub names: Vec<String>,
    /// Names drawn as segments.
    pub segments: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when the theme preference changes.
pub struct ThemeChangedEvent {
    /// True for the light theme.
    pub light_mode: bool,
}

#[derive(Debug, Serialize, ToSchema)]
/// Request for the page to play a sound cue.
pub struct CueEvent {
    /// Cue name, e.g. `tick`.
    pub cue: String,
}
