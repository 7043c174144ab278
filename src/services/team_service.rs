//! Team generator: validation, the staged draw task and the manual roster edits.

use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info};

use crate::{
    dto::{
        common::ActionResponse,
        teams::{
            DrawStartedResponse, GenerateTeamsRequest, MoveMemberRequest, RosterPreviewRequest,
            RosterPreviewResponse, SampleRosterResponse, TeamsResponse, team_summaries,
        },
    },
    error::ServiceError,
    services::{cues::Cue, sse_events},
    state::{
        SharedState, TeamBoard,
        activity::ActivityTicket,
        draw::{DrawAnimator, DrawEvent, DrawObserver, DrawOutcome, DrawPlan, Point},
        teams::{self, SAMPLE_PLAYERS, Team, TeamError},
    },
};

/// Current teams and whether a draw is still revealing them.
pub async fn get_teams(state: &SharedState) -> TeamsResponse {
    let board = state.teams().read().await;
    TeamsResponse {
        teams: team_summaries(&board.teams),
        drawing: board.draw_id.is_some(),
    }
}

/// Sample roster, one player per line.
pub fn sample_roster() -> SampleRosterResponse {
    SampleRosterResponse {
        players: SAMPLE_PLAYERS.join("\n"),
    }
}

/// Counters shown next to the roster input.
pub fn preview(request: RosterPreviewRequest) -> RosterPreviewResponse {
    let team_count = usize::try_from(request.team_count).unwrap_or(0);
    teams::roster_preview(&request.players, team_count).into()
}

/// Validate the roster, decide the assignment and start revealing it in the background.
pub async fn generate(
    state: &SharedState,
    request: GenerateTeamsRequest,
) -> Result<DrawStartedResponse, ServiceError> {
    let team_count = parse_team_count(request.team_count)?;
    let players = teams::parse_players(&request.players);
    if players.len() < team_count {
        return Err(TeamError::InsufficientInput {
            players: players.len(),
            teams: team_count,
        }
        .into());
    }

    let ticket = state.draw_gate().try_begin()?;

    let assignment = teams::assign(&players, team_count, &request.team_names)?;
    let plan = DrawPlan::from_assignment(&assignment)?;
    let draw_id = plan.id;
    let total = plan.len();

    let (cancel_tx, cancel_rx) = watch::channel(false);
    {
        let mut board = state.teams().write().await;
        board.teams = plan.teams.clone();
        board.draw_id = Some(draw_id);
    }
    state.draw_cancel().lock().await.replace(cancel_tx);

    info!(%draw_id, team_count, players = total, "team draw started");
    state.cues().play_cue(Cue::Whoosh);
    sse_events::broadcast_draw_started(state, draw_id, total, &plan.teams);

    let timings = state.config().draw;
    let estimated_duration_ms = estimated_duration_ms(timings.per_step(), total);
    let animator = DrawAnimator::new(timings).with_cancellation(cancel_rx);
    let source = request.source.map(Point::from).unwrap_or_default();
    tokio::spawn(run_draw(state.clone(), animator, plan, source, ticket));

    Ok(DrawStartedResponse {
        draw_id,
        total,
        team_count,
        estimated_duration_ms,
    })
}

fn estimated_duration_ms(per_step: Duration, steps: usize) -> u64 {
    u64::try_from(per_step.as_millis())
        .unwrap_or(u64::MAX)
        .saturating_mul(u64::try_from(steps).unwrap_or(u64::MAX))
}

fn parse_team_count(raw: i64) -> Result<usize, TeamError> {
    usize::try_from(raw)
        .ok()
        .filter(|count| *count > 0)
        .ok_or_else(|| {
            TeamError::InvalidConfiguration(format!("team count must be at least 1, got {raw}"))
        })
}

/// Publishes every suspension point of the draw and mirrors commits into the board.
struct BroadcastObserver {
    state: SharedState,
}

impl DrawObserver for BroadcastObserver {
    async fn flight_started(&mut self, event: &DrawEvent) {
        sse_events::broadcast_draw_flight(&self.state, event);
    }

    async fn arrived(&mut self, event: &DrawEvent) {
        sse_events::broadcast_draw_arrived(&self.state, event);
    }

    async fn committed(&mut self, event: &DrawEvent, teams: &[Team]) {
        self.state.teams().write().await.teams = teams.to_vec();
        debug!(draw_id = %event.draw_id, step = event.step, player = %event.player, "player revealed");
        sse_events::broadcast_draw_committed(&self.state, event, teams);
    }
}

async fn run_draw(
    state: SharedState,
    animator: DrawAnimator,
    plan: DrawPlan,
    source: Point,
    ticket: ActivityTicket,
) {
    let draw_id = plan.id;
    let total = plan.len();
    let mut observer = BroadcastObserver {
        state: state.clone(),
    };

    let outcome = animator.animate(plan, source, &mut observer).await;
    let (committed, cancelled) = match &outcome {
        DrawOutcome::Completed(_) => (total, false),
        DrawOutcome::Cancelled { committed, .. } => (*committed, true),
    };

    {
        let mut board = state.teams().write().await;
        board.teams = outcome.teams().to_vec();
        board.draw_id = None;
    }
    state.draw_cancel().lock().await.take();

    sse_events::broadcast_draw_finished(
        &state,
        draw_id,
        committed,
        total,
        outcome.teams(),
        cancelled,
    );
    info!(%draw_id, committed, total, cancelled, "team draw finished");
    drop(ticket);
}

/// Ask the running draw to stop before its next step.
pub async fn cancel_draw(state: &SharedState) -> Result<ActionResponse, ServiceError> {
    let guard = state.draw_cancel().lock().await;
    let Some(cancel) = guard.as_ref() else {
        return Err(ServiceError::InvalidState("no team draw in progress".into()));
    };
    // The draw may have just finished; that is not an error for the caller.
    let _ = cancel.send(true);
    info!("team draw cancellation requested");
    Ok(ActionResponse::new("draw cancellation requested"))
}

/// Move one member to the end of another team.
pub async fn move_member(
    state: &SharedState,
    request: MoveMemberRequest,
) -> Result<TeamsResponse, ServiceError> {
    edit_teams(state, |roster| {
        let player = teams::move_member(
            roster,
            request.from_team,
            request.from_index,
            request.to_team,
        )?;
        debug!(
            %player,
            from_team = request.from_team,
            to_team = request.to_team,
            "member moved"
        );
        Ok(())
    })
    .await
}

/// Remove exactly one member.
pub async fn remove_member(
    state: &SharedState,
    team_index: usize,
    member_index: usize,
) -> Result<TeamsResponse, ServiceError> {
    let response = edit_teams(state, |roster| {
        let player = teams::remove_member(roster, team_index, member_index)?;
        debug!(%player, team_index, "member removed");
        Ok(())
    })
    .await?;
    state.cues().play_cue(Cue::Click);
    Ok(response)
}

/// Discard every team.
pub async fn reset(state: &SharedState) -> Result<TeamsResponse, ServiceError> {
    let response = edit_teams(state, |roster| {
        roster.clear();
        Ok(())
    })
    .await?;
    info!("teams reset");
    Ok(response)
}

/// Apply a manual edit while no draw is running, then publish the result.
async fn edit_teams<F>(state: &SharedState, edit: F) -> Result<TeamsResponse, ServiceError>
where
    F: FnOnce(&mut Vec<Team>) -> Result<(), TeamError>,
{
    let teams = {
        let mut board = state.teams().write().await;
        ensure_idle(state, &board)?;
        edit(&mut board.teams)?;
        board.teams.clone()
    };

    sse_events::broadcast_teams_updated(state, &teams);
    Ok(TeamsResponse {
        teams: team_summaries(&teams),
        drawing: false,
    })
}

fn ensure_idle(state: &SharedState, board: &TeamBoard) -> Result<(), ServiceError> {
    if board.draw_id.is_some() || state.draw_gate().is_busy() {
        return Err(ServiceError::Busy(
            "teams cannot be edited while a draw is in progress".into(),
        ));
    }
    Ok(())
}
