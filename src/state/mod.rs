pub mod activity;
pub mod draw;
mod sse;
pub mod teams;
pub mod wheel;

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock, watch};
use uuid::Uuid;

use crate::{
    config::AppConfig,
    dao::{preference_store::PreferenceStore, preferences::PreferencesRepository},
    services::cues::{CuePlayer, SseCuePlayer},
};

pub use self::sse::SseHub;
use self::{
    activity::ActivityGate,
    teams::Team,
    wheel::{ResolvedSpin, WheelNames, WheelSpin},
};

/// Handle shared by handlers and background tasks.
pub type SharedState = Arc<AppState>;

/// Capacity of the SSE broadcast channel; a full draw step emits three events.
const SSE_CAPACITY: usize = 64;

/// Teams of the current session.
#[derive(Debug, Default)]
pub struct TeamBoard {
    /// Teams as currently revealed.
    pub teams: Vec<Team>,
    /// Draw currently revealing players into `teams`, if any.
    pub draw_id: Option<Uuid>,
}

/// Wheel of the current session.
#[derive(Debug, Default)]
pub struct WheelBoard {
    /// Names mirrored from the preference store.
    pub names: WheelNames,
    /// Spin being animated, if any.
    pub spin: Option<WheelSpin>,
    /// Last revealed spin.
    pub last_result: Option<ResolvedSpin>,
}

/// Session state shared by every request and background task.
pub struct AppState {
    config: AppConfig,
    store: Arc<dyn PreferenceStore>,
    sse: SseHub,
    cues: Arc<dyn CuePlayer>,
    teams: RwLock<TeamBoard>,
    draw_gate: ActivityGate,
    draw_cancel: Mutex<Option<watch::Sender<bool>>>,
    wheel: RwLock<WheelBoard>,
    spin_gate: ActivityGate,
    degraded: watch::Sender<bool>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`]; cues are sent over SSE.
    pub fn new(config: AppConfig, store: Arc<dyn PreferenceStore>) -> SharedState {
        let sse = SseHub::new(SSE_CAPACITY);
        let cues = Arc::new(SseCuePlayer::new(sse.clone()));
        Self::with_cue_player(config, store, sse, cues)
    }

    /// Construct the state with an explicit cue player. The state starts healthy.
    pub fn with_cue_player(
        config: AppConfig,
        store: Arc<dyn PreferenceStore>,
        sse: SseHub,
        cues: Arc<dyn CuePlayer>,
    ) -> SharedState {
        Arc::new(Self {
            config,
            store,
            sse,
            cues,
            teams: RwLock::new(TeamBoard::default()),
            draw_gate: ActivityGate::new("team draw"),
            draw_cancel: Mutex::new(None),
            wheel: RwLock::new(WheelBoard::default()),
            spin_gate: ActivityGate::new("wheel spin"),
            degraded: watch::channel(false).0,
        })
    }

    /// Runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Raw preference store.
    pub fn store(&self) -> Arc<dyn PreferenceStore> {
        self.store.clone()
    }

    /// Typed access to the persisted preferences.
    pub fn preferences(&self) -> PreferencesRepository {
        PreferencesRepository::new(self.store.clone())
    }

    /// Broadcast hub used for the SSE stream.
    pub fn public_sse(&self) -> &SseHub {
        &self.sse
    }

    /// Sound cue capability.
    pub fn cues(&self) -> &dyn CuePlayer {
        self.cues.as_ref()
    }

    /// Current teams.
    pub fn teams(&self) -> &RwLock<TeamBoard> {
        &self.teams
    }

    /// Busy flag of the team draw.
    pub fn draw_gate(&self) -> &ActivityGate {
        &self.draw_gate
    }

    /// Cancel handle of the running draw.
    pub fn draw_cancel(&self) -> &Mutex<Option<watch::Sender<bool>>> {
        &self.draw_cancel
    }

    /// Current wheel.
    pub fn wheel(&self) -> &RwLock<WheelBoard> {
        &self.wheel
    }

    /// Busy flag of the wheel spin.
    pub fn spin_gate(&self) -> &ActivityGate {
        &self.spin_gate
    }

    /// Whether preferences are not being persisted where they were configured to be.
    pub fn is_degraded(&self) -> bool {
        *self.degraded.borrow()
    }

    /// Update the degraded flag, returning `true` when the value changed.
    pub fn set_degraded(&self, value: bool) -> bool {
        self.degraded.send_if_modified(|current| {
            if *current == value {
                return false;
            }
            *current = value;
            true
        })
    }
}
