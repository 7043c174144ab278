//! Wheel of names: persisted list edits and the timed spin.

use std::time::SystemTime;

use tokio::time::sleep;
use tracing::{info, warn};

use crate::{
    dto::wheel::{
        AddWheelNameRequest, AddWheelNameResponse, SpinResultResponse, SpinStartedResponse,
        WheelNamesResponse,
    },
    error::ServiceError,
    services::{cues::Cue, sse_events, sse_service},
    state::{
        SharedState,
        activity::ActivityTicket,
        wheel::{ResolvedSpin, SpinSettings, WheelError, WheelNames, WheelSpin},
    },
};

/// Load the persisted names into the session. A failing store leaves the wheel empty.
pub async fn restore(state: &SharedState) {
    match state.preferences().load_wheel_names().await {
        Ok(names) => {
            let count = names.len();
            state.wheel().write().await.names = WheelNames::from_stored(names);
            info!(count, "wheel names restored");
        }
        Err(err) => {
            warn!(error = %err, "failed to restore wheel names; starting empty");
            sse_service::broadcast_info(state.public_sse(), "wheel names could not be loaded");
        }
    }
}

/// Stored names and the segments drawn from them.
pub async fn list(state: &SharedState) -> WheelNamesResponse {
    WheelNamesResponse::from(&state.wheel().read().await.names)
}

/// Append a name; a duplicate leaves the wheel untouched.
pub async fn add(
    state: &SharedState,
    request: AddWheelNameRequest,
) -> Result<AddWheelNameResponse, ServiceError> {
    let (added, wheel) = edit_names(state, |names| names.add(&request.name)).await?;
    Ok(AddWheelNameResponse { added, wheel })
}

/// Remove the name at `index`.
pub async fn remove(state: &SharedState, index: usize) -> Result<WheelNamesResponse, ServiceError> {
    let (_, wheel) = edit_names(state, |names| names.remove(index)).await?;
    Ok(wheel)
}

/// Remove every name.
pub async fn clear(state: &SharedState) -> Result<WheelNamesResponse, ServiceError> {
    let (_, wheel) = edit_names(state, |names| {
        names.clear();
        Ok(())
    })
    .await?;
    Ok(wheel)
}

/// Replace the names with the sample list.
pub async fn fill_sample(state: &SharedState) -> Result<WheelNamesResponse, ServiceError> {
    let (_, wheel) = edit_names(state, |names| {
        names.fill_sample();
        Ok(())
    })
    .await?;
    Ok(wheel)
}

/// Apply `edit` to a copy of the names, persist the copy when it changed, then publish it.
///
/// The in-memory list only changes once the store accepted the new value.
async fn edit_names<T, F>(
    state: &SharedState,
    edit: F,
) -> Result<(T, WheelNamesResponse), ServiceError>
where
    F: FnOnce(&mut WheelNames) -> Result<T, WheelError>,
{
    let mut board = state.wheel().write().await;
    let mut names = board.names.clone();
    let outcome = edit(&mut names)?;

    if names == board.names {
        return Ok((outcome, WheelNamesResponse::from(&names)));
    }

    state.preferences().save_wheel_names(names.as_slice()).await?;
    board.names = names;
    let response = WheelNamesResponse::from(&board.names);
    sse_events::broadcast_wheel_names(state, &board.names);
    Ok((outcome, response))
}

/// Start a spin over the current segments; the winner is revealed once the spin is over.
pub async fn spin(state: &SharedState) -> Result<SpinStartedResponse, ServiceError> {
    let ticket = state.spin_gate().try_begin()?;
    let settings = state.config().spin;

    let spin = {
        let mut board = state.wheel().write().await;
        let spin = WheelSpin::start(board.names.segments(), &settings, &mut rand::rng())?;
        board.spin = Some(spin.clone());
        spin
    };

    let response = SpinStartedResponse {
        spin_id: spin.id,
        rotation_degrees: spin.rotation_degrees,
        duration_ms: u64::try_from(settings.duration.as_millis()).unwrap_or(u64::MAX),
        segments: spin.segments.clone(),
    };
    info!(
        spin_id = %spin.id,
        segments = spin.segments.len(),
        rotation = spin.rotation_degrees,
        "wheel spin started"
    );
    sse_events::broadcast_spin_started(state, &response);

    tokio::spawn(run_spin(state.clone(), spin, settings, ticket));
    Ok(response)
}

async fn run_spin(
    state: SharedState,
    spin: WheelSpin,
    settings: SpinSettings,
    ticket: ActivityTicket,
) {
    let ticks = async {
        for _ in 0..settings.tick_count {
            sleep(settings.tick_interval).await;
            state.cues().play_cue(Cue::Tick);
        }
    };
    tokio::join!(ticks, sleep(settings.duration));

    let resolved = spin.resolve();
    let mut board = state.wheel().write().await;
    board.spin = None;

    match resolved {
        Ok(result) => {
            let resolved = ResolvedSpin {
                spin_id: spin.id,
                result,
                resolved_at: SystemTime::now(),
            };
            board.last_result = Some(resolved.clone());
            drop(board);

            info!(
                spin_id = %resolved.spin_id,
                winner = %resolved.result.winning_label,
                index = resolved.result.winning_index,
                "wheel spin resolved"
            );
            sse_events::broadcast_spin_resolved(&state, &resolved.into());
            state.cues().play_cue(Cue::Tada);
        }
        Err(err) => {
            drop(board);
            warn!(spin_id = %spin.id, error = %err, "wheel spin could not be resolved");
        }
    }
    drop(ticket);
}

/// Winner of the last finished spin.
pub async fn last_result(state: &SharedState) -> Result<SpinResultResponse, ServiceError> {
    state
        .wheel()
        .read()
        .await
        .last_result
        .clone()
        .map(SpinResultResponse::from)
        .ok_or_else(|| ServiceError::NotFound("the wheel has not been spun yet".into()))
}
