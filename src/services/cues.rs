//! Named sound cues; the page owns the actual synthesis.

use std::fmt;

use tracing::trace;

use crate::{
    dto::sse::{CueEvent, ServerEvent},
    state::SseHub,
};

const EVENT_CUE: &str = "cue";

/// Sound effects the page knows how to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Short click, e.g. when a member is removed.
    Click,
    /// Fanfare revealing a winner.
    Tada,
    /// Low impact sound.
    Boom,
    /// Card flying across the screen.
    Whoosh,
    /// One peg of the spinning wheel.
    Tick,
    /// Refused action.
    Wrong,
}

impl Cue {
    /// Name the page uses for the cue.
    pub fn as_str(&self) -> &'static str {
        match self {
            Cue::Click => "click",
            Cue::Tada => "tada",
            Cue::Boom => "boom",
            Cue::Whoosh => "whoosh",
            Cue::Tick => "tick",
            Cue::Wrong => "wrong",
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability to request a sound cue.
pub trait CuePlayer: Send + Sync {
    /// Ask for `cue` to be played; never blocks and never fails.
    fn play_cue(&self, cue: Cue);
}

/// Forwards cues to the page as `cue` SSE events.
pub struct SseCuePlayer {
    hub: SseHub,
}

impl SseCuePlayer {
    /// Player publishing on `hub`.
    pub fn new(hub: SseHub) -> Self {
        Self { hub }
    }
}

impl CuePlayer for SseCuePlayer {
    fn play_cue(&self, cue: Cue) {
        trace!(%cue, "cue requested");
        let payload = CueEvent {
            cue: cue.as_str().to_string(),
        };
        if let Ok(event) = ServerEvent::json(Some(EVENT_CUE.to_string()), &payload) {
            self.hub.broadcast(event);
        }
    }
}
