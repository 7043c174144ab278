//! Timed, strictly serial replay of a team assignment as a sequence of "flying card" steps.
//!
//! The assignment is fully decided before the animator runs; the animator only stages the
//! reveal. Every step goes through the same suspension points:
//!
//! 1. `flight_started`: the card leaves the source point,
//! 2. one frame tick,
//! 3. `arrived`: the destination panel reacts,
//! 4. the settle delay,
//! 5. the player is committed to its team and `committed` receives the new roster,
//! 6. the inter-step gap.

use std::{future::Future, time::Duration};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio::{sync::watch, time::sleep};
use tracing::debug;
use uuid::Uuid;

use crate::state::teams::{Team, TeamError, draw_order, empty_shells};

/// Screen-space coordinate the cards fly from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position in CSS pixels.
    pub x: f64,
    /// Vertical position in CSS pixels.
    pub y: f64,
}

/// Delays between the suspension points of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawTimings {
    /// Wait between starting a flight and signalling arrival (one rendered frame).
    pub frame_tick: Duration,
    /// Wait between arrival and committing the player to its team.
    pub settle: Duration,
    /// Pause before the next step starts.
    pub step_gap: Duration,
}

impl DrawTimings {
    /// Total virtual duration of one step.
    pub fn per_step(&self) -> Duration {
        self.frame_tick + self.settle + self.step_gap
    }
}

impl Default for DrawTimings {
    fn default() -> Self {
        Self {
            frame_tick: Duration::from_millis(16),
            settle: Duration::from_millis(300),
            step_gap: Duration::from_millis(50),
        }
    }
}

/// One unit of the reveal, handed to the observer at each suspension point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawEvent {
    /// Identifier shared by every event of the same draw.
    pub draw_id: Uuid,
    /// Zero-based position of this step in the sequence.
    pub step: usize,
    /// Number of steps in the sequence.
    pub total: usize,
    /// Player being revealed.
    pub player: String,
    /// Point the card starts from.
    pub source: Point,
    /// Index of the team panel the card flies to.
    pub destination_team: usize,
    /// Team index the engine gave this player (`step mod team_count` for a fresh draw).
    pub team_index_at_assignment: usize,
    /// Random rotation applied to the card while it flies.
    pub tilt_degrees: f64,
}

/// A single planned reveal.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawStep {
    /// Player being revealed.
    pub player: String,
    /// Destination team index.
    pub team: usize,
    /// Card rotation in `[-10, 10)` degrees.
    pub tilt_degrees: f64,
}

/// Everything the animator needs to replay an assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawPlan {
    /// Identifier of the draw.
    pub id: Uuid,
    /// Teams as they look before the first commit (names only).
    pub teams: Vec<Team>,
    /// Steps in reveal order.
    pub steps: Vec<DrawStep>,
}

impl DrawPlan {
    /// Build a plan from a fresh assignment, revealing players in their dealt order.
    pub fn from_assignment(teams: &[Team]) -> Result<Self, TeamError> {
        Self::from_assignment_with_rng(teams, &mut rand::rng())
    }

    /// Same as [`DrawPlan::from_assignment`] with an explicit random source for the tilts.
    pub fn from_assignment_with_rng<R: Rng + ?Sized>(
        teams: &[Team],
        rng: &mut R,
    ) -> Result<Self, TeamError> {
        let mut plan = Self::new(empty_shells(teams), draw_order(teams))?;
        for step in &mut plan.steps {
            step.tilt_degrees = rng.random_range(-10.0..10.0);
        }
        Ok(plan)
    }

    /// Build an untilted plan from explicit starting teams and `(player, team)` pairs.
    pub fn new(teams: Vec<Team>, order: Vec<(String, usize)>) -> Result<Self, TeamError> {
        if teams.is_empty() {
            return Err(TeamError::InvalidConfiguration(
                "a draw needs at least one team".into(),
            ));
        }
        if let Some((_, team)) = order.iter().find(|(_, team)| *team >= teams.len()) {
            return Err(TeamError::IndexOutOfRange {
                what: "team",
                index: *team,
                len: teams.len(),
            });
        }

        let steps = order
            .into_iter()
            .map(|(player, team)| DrawStep {
                player,
                team,
                tilt_degrees: 0.0,
            })
            .collect();

        Ok(Self {
            id: Uuid::new_v4(),
            teams,
            steps,
        })
    }

    /// Number of steps in the plan.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the plan reveals nobody.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Presentation side of the draw. Each callback is awaited before the animator moves on.
pub trait DrawObserver: Send {
    /// A card starts flying towards its team.
    fn flight_started(&mut self, event: &DrawEvent) -> impl Future<Output = ()> + Send;
    /// The card reached the destination panel.
    fn arrived(&mut self, event: &DrawEvent) -> impl Future<Output = ()> + Send;
    /// The player was added to its team; `teams` is the roster after the commit.
    fn committed(
        &mut self,
        event: &DrawEvent,
        teams: &[Team],
    ) -> impl Future<Output = ()> + Send;
}

/// How a draw ended.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOutcome {
    /// Every step ran; the teams equal the assignment.
    Completed(Vec<Team>),
    /// A cancel request was honoured between two steps.
    Cancelled {
        /// Steps committed before stopping.
        committed: usize,
        /// Teams as they were at the stop.
        teams: Vec<Team>,
    },
}

impl DrawOutcome {
    /// Teams at the end of the draw, whichever way it ended.
    pub fn teams(&self) -> &[Team] {
        match self {
            DrawOutcome::Completed(teams) => teams,
            DrawOutcome::Cancelled { teams, .. } => teams,
        }
    }
}

/// Drives a [`DrawPlan`] through its timed steps.
#[derive(Debug, Clone)]
pub struct DrawAnimator {
    timings: DrawTimings,
    cancel: Option<watch::Receiver<bool>>,
}

impl DrawAnimator {
    /// Animator that always runs to completion.
    pub fn new(timings: DrawTimings) -> Self {
        Self {
            timings,
            cancel: None,
        }
    }

    /// Allow the sequence to stop between steps once `cancel` holds `true`.
    pub fn with_cancellation(mut self, cancel: watch::Receiver<bool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    fn cancel_requested(&self) -> bool {
        self.cancel.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Replay `plan` from `source`, awaiting the observer at each suspension point.
    pub async fn animate<O: DrawObserver>(
        &self,
        plan: DrawPlan,
        source: Point,
        observer: &mut O,
    ) -> DrawOutcome {
        let DrawPlan {
            id,
            mut teams,
            steps,
        } = plan;
        let total = steps.len();

        for (step, planned) in steps.into_iter().enumerate() {
            if self.cancel_requested() {
                debug!(draw_id = %id, committed = step, total, "draw cancelled");
                return DrawOutcome::Cancelled {
                    committed: step,
                    teams,
                };
            }

            let event = DrawEvent {
                draw_id: id,
                step,
                total,
                player: planned.player,
                source,
                destination_team: planned.team,
                team_index_at_assignment: planned.team,
                tilt_degrees: planned.tilt_degrees,
            };

            observer.flight_started(&event).await;
            sleep(self.timings.frame_tick).await;

            observer.arrived(&event).await;
            sleep(self.timings.settle).await;

            teams[event.destination_team]
                .members
                .push(event.player.clone());
            observer.committed(&event, &teams).await;

            sleep(self.timings.step_gap).await;
        }

        DrawOutcome::Completed(teams)
    }
}
