use super::manager::SessionManager;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Arm the one-shot session timer.
///
/// There is no explicit cancellation: when the session is ended before the
/// timer fires, `finalize_timeout` finds the registry entry already gone
/// and the task exits without side effects. A fired timer is never rearmed.
pub fn schedule(
    manager: Arc<SessionManager>,
    session_id: String,
    limit: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(limit).await;
        manager.finalize_timeout(&session_id).await;
    })
}
