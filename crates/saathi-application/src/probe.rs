//! Backend health probe.
//!
//! The probe only ever touches the shared connectivity flag; it never
//! mutates the conversation log and never propagates failures. It may run
//! concurrently with a pending turn.

use saathi_core::chat::Connectivity;
use saathi_interaction::SaathiBackend;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Probes the backend once and updates the shared flag.
///
/// Any failure (transport, timeout, non-2xx) maps to `Disconnected`;
/// nothing is raised to the caller.
pub async fn refresh_connectivity<B: SaathiBackend>(
    backend: &B,
    state: &Arc<RwLock<Connectivity>>,
) -> Connectivity {
    let next = match backend.health().await {
        Ok(report) => {
            tracing::debug!("[HealthProbe] backend status: {}", report.status);
            Connectivity::Connected
        }
        Err(e) => {
            tracing::debug!("[HealthProbe] health check failed: {e}");
            Connectivity::Disconnected
        }
    };

    *state.write().await = next;
    next
}

/// Spawns a periodic probe task.
pub fn spawn_probe<B: SaathiBackend + 'static>(
    backend: Arc<B>,
    state: Arc<RwLock<Connectivity>>,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            refresh_connectivity(backend.as_ref(), &state).await;
        }
    })
}
