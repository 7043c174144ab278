//! Busy flags that keep one draw and one spin in flight at a time.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use thiserror::Error;

/// Returned when an activity is started while a previous run is still going.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{activity} already in progress")]
pub struct ActivityBusy {
    /// Name of the guarded activity.
    pub activity: &'static str,
}

/// Mutual-exclusion flag for a long running activity.
#[derive(Debug, Clone)]
pub struct ActivityGate {
    activity: &'static str,
    busy: Arc<AtomicBool>,
}

impl ActivityGate {
    /// New idle gate labelled `activity` in errors and logs.
    pub fn new(activity: &'static str) -> Self {
        Self {
            activity,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether a ticket is currently held.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Claim the gate. The returned ticket releases it when dropped, so it can be moved
    /// into the task that performs the activity.
    pub fn try_begin(&self) -> Result<ActivityTicket, ActivityBusy> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ActivityBusy {
                activity: self.activity,
            })?;

        Ok(ActivityTicket {
            busy: self.busy.clone(),
        })
    }
}

/// Proof that the holder owns the gate.
#[derive(Debug)]
pub struct ActivityTicket {
    busy: Arc<AtomicBool>,
}

impl Drop for ActivityTicket {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_claim_is_refused_until_release() {
        let gate = ActivityGate::new("spin");
        let ticket = gate.try_begin().unwrap();
        assert!(gate.is_busy());
        assert_eq!(
            gate.try_begin().unwrap_err(),
            ActivityBusy { activity: "spin" }
        );

        drop(ticket);
        assert!(!gate.is_busy());
        assert!(gate.try_begin().is_ok());
    }

    #[tokio::test]
    async fn ticket_moves_into_a_task() {
        let gate = ActivityGate::new("draw");
        let ticket = gate.try_begin().unwrap();
        let handle = tokio::spawn(async move {
            let _ticket = ticket;
        });
        handle.await.unwrap();
        assert!(!gate.is_busy());
    }
}
