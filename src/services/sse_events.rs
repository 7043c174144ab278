use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::{
    dto::{
        sse::{
            DrawCommittedEvent, DrawFinishedEvent, DrawStartedEvent, DrawStepEvent, ServerEvent,
            SystemStatus, TeamsUpdatedEvent, ThemeChangedEvent, WheelNamesEvent,
        },
        teams::team_summaries,
        wheel::{SpinResultResponse, SpinStartedResponse},
    },
    dao::preferences::Theme,
    state::{SharedState, draw::DrawEvent, teams::Team, wheel::WheelNames},
};

const EVENT_DRAW_STARTED: &str = "draw.started";
const EVENT_DRAW_FLIGHT: &str = "draw.flight";
const EVENT_DRAW_ARRIVED: &str = "draw.arrived";
const EVENT_DRAW_COMMITTED: &str = "draw.committed";
const EVENT_DRAW_FINISHED: &str = "draw.finished";
const EVENT_DRAW_CANCELLED: &str = "draw.cancelled";
const EVENT_TEAMS_UPDATED: &str = "teams.updated";
const EVENT_WHEEL_NAMES: &str = "wheel.names";
const EVENT_SPIN_STARTED: &str = "wheel.spin_started";
const EVENT_SPIN_RESOLVED: &str = "wheel.spin_resolved";
const EVENT_THEME_CHANGED: &str = "theme.changed";
const EVENT_SYSTEM_STATUS: &str = "system.status";

/// Broadcast that a draw has started; the panels are shown empty.
pub fn broadcast_draw_started(state: &SharedState, draw_id: Uuid, total: usize, teams: &[Team]) {
    let payload = DrawStartedEvent {
        draw_id,
        total,
        teams: team_summaries(teams),
    };
    send_public_event(state, EVENT_DRAW_STARTED, &payload);
}

/// Broadcast that a card left the roster.
pub fn broadcast_draw_flight(state: &SharedState, event: &DrawEvent) {
    send_public_event(state, EVENT_DRAW_FLIGHT, &DrawStepEvent::from(event));
}

/// Broadcast that a card reached its team panel.
pub fn broadcast_draw_arrived(state: &SharedState, event: &DrawEvent) {
    send_public_event(state, EVENT_DRAW_ARRIVED, &DrawStepEvent::from(event));
}

/// Broadcast the roster right after a player was committed.
pub fn broadcast_draw_committed(state: &SharedState, event: &DrawEvent, teams: &[Team]) {
    let payload = DrawCommittedEvent {
        step: event.into(),
        teams: team_summaries(teams),
    };
    send_public_event(state, EVENT_DRAW_COMMITTED, &payload);
}

/// Broadcast the end of a draw. `cancelled` selects `draw.cancelled` over `draw.finished`.
pub fn broadcast_draw_finished(
    state: &SharedState,
    draw_id: Uuid,
    committed: usize,
    total: usize,
    teams: &[Team],
    cancelled: bool,
) {
    let payload = DrawFinishedEvent {
        draw_id,
        committed,
        total,
        teams: team_summaries(teams),
    };
    let event = if cancelled {
        EVENT_DRAW_CANCELLED
    } else {
        EVENT_DRAW_FINISHED
    };
    send_public_event(state, event, &payload);
}

/// Broadcast the teams after a manual edit.
pub fn broadcast_teams_updated(state: &SharedState, teams: &[Team]) {
    let payload = TeamsUpdatedEvent {
        teams: team_summaries(teams),
    };
    send_public_event(state, EVENT_TEAMS_UPDATED, &payload);
}

/// Broadcast the wheel names after a change.
pub fn broadcast_wheel_names(state: &SharedState, names: &WheelNames) {
    let payload = WheelNamesEvent {
        names: names.as_slice().to_vec(),
        segments: names.segments(),
    };
    send_public_event(state, EVENT_WHEEL_NAMES, &payload);
}

/// Broadcast that the wheel started spinning towards `rotation_degrees`.
pub fn broadcast_spin_started(state: &SharedState, spin: &SpinStartedResponse) {
    send_public_event(state, EVENT_SPIN_STARTED, spin);
}

/// Broadcast the winner of a finished spin.
pub fn broadcast_spin_resolved(state: &SharedState, result: &SpinResultResponse) {
    send_public_event(state, EVENT_SPIN_RESOLVED, result);
}

/// Broadcast the new theme preference.
pub fn broadcast_theme_changed(state: &SharedState, theme: Theme) {
    let payload = ThemeChangedEvent {
        light_mode: theme == Theme::Light,
    };
    send_public_event(state, EVENT_THEME_CHANGED, &payload);
}

/// Broadcast that the backend entered or left degraded mode.
pub fn broadcast_system_status(state: &SharedState, degraded: bool) {
    send_public_event(state, EVENT_SYSTEM_STATUS, &SystemStatus { degraded });
}

fn send_public_event(state: &SharedState, event: &str, payload: &impl Serialize) {
    match ServerEvent::json(Some(event.to_string()), payload) {
        Ok(event) => state.public_sse().broadcast(event),
        Err(err) => warn!(event, error = %err, "failed to serialize public SSE payload"),
    }
}
