use tracing::warn;

use crate::{
    dto::health::HealthResponse,
    services::{sse_events, sse_service},
    state::SharedState,
};

/// Report the store health along with the activity flags, logging connectivity issues.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let storage_ok = match state.store().health_check().await {
        Ok(()) => true,
        Err(err) => {
            warn!(error = %err, "preference store health check failed");
            false
        }
    };

    let drawing = state.draw_gate().is_busy();
    let spinning = state.spin_gate().is_busy();
    if storage_ok && !state.is_degraded() {
        HealthResponse::ok(drawing, spinning)
    } else {
        HealthResponse::degraded(drawing, spinning)
    }
}

/// Flag the backend as degraded and tell connected pages why.
pub fn enter_degraded(state: &SharedState, reason: &str) {
    if !state.set_degraded(true) {
        return;
    }

    warn!(reason, "entering degraded mode");
    sse_events::broadcast_system_status(state, true);
    sse_service::broadcast_info(state.public_sse(), reason);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{config::AppConfig, dao::preference_store::MemoryStore, state::AppState};

    #[tokio::test]
    async fn degraded_flag_overrides_a_healthy_store() {
        let state = AppState::new(AppConfig::default(), Arc::new(MemoryStore::new()));
        assert_eq!(health_status(&state).await.status, "ok");

        let mut events = state.public_sse().subscribe();
        enter_degraded(&state, "preferences kept in memory");
        enter_degraded(&state, "preferences kept in memory");

        assert!(state.is_degraded());
        assert_eq!(health_status(&state).await.status, "degraded");

        let status = events.recv().await.unwrap();
        assert_eq!(status.event.as_deref(), Some("system.status"));
        assert_eq!(status.data, r#"{"degraded":true}"#);
        let info = events.recv().await.unwrap();
        assert_eq!(info.event.as_deref(), Some("info"));
        assert_eq!(info.data, "preferences kept in memory");
        assert!(events.try_recv().is_err());
    }
}
