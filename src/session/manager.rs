use super::registry::SessionRegistry;
use super::session::{HandoffReason, Session};
use super::timeout;
use crate::accounting::{self, CallLogRecord, CallStatus, CallSummary};
use crate::config::CallConfig;
use crate::error::SessionError;
use crate::logstore::CallLogStore;
use crate::upstream::TokenIssuer;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Live handoff state of a session, polled by the client.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandoffStatus {
    pub needs_handoff: bool,
    pub handoff_reason: Option<HandoffReason>,
    /// Seconds until the time limit forces a handoff
    pub time_remaining: u64,
}

/// Orchestrates the session lifecycle: credential issuance, timeout
/// handoff, explicit end, accounting, and the summary/log read paths.
///
/// Exactly one `CallLogRecord` is produced per session. The explicit-end
/// path and the timeout path both funnel through `SessionRegistry::remove`;
/// whichever executes first owns finalization, the other observes the
/// session as absent and does nothing.
pub struct SessionManager {
    registry: SessionRegistry,
    store: Arc<dyn CallLogStore>,
    issuer: Arc<dyn TokenIssuer>,
    call: CallConfig,
}

impl SessionManager {
    pub fn new(
        issuer: Arc<dyn TokenIssuer>,
        store: Arc<dyn CallLogStore>,
        call: CallConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            registry: SessionRegistry::new(),
            store,
            issuer,
            call,
        })
    }

    /// Configured per-session time limit.
    pub fn max_duration(&self) -> Duration {
        Duration::from_secs(self.call.max_duration_secs)
    }

    /// Mint upstream credentials and register a new tracked session.
    ///
    /// Returns the upstream payload with `sessionId` injected at the top
    /// level. On upstream failure nothing is registered and no timer is
    /// armed (no partial state).
    pub async fn issue(
        self: &Arc<Self>,
        origin_ip: String,
    ) -> Result<serde_json::Value, SessionError> {
        let mut payload = self
            .issuer
            .mint()
            .await
            .map_err(|e| SessionError::Upstream(e.to_string()))?;

        let Some(body) = payload.as_object_mut() else {
            return Err(SessionError::Upstream(
                "unexpected upstream payload shape".to_string(),
            ));
        };

        let session = Session::new(origin_ip);
        let session_id = session.session_id.clone();

        self.registry.insert(session).await?;

        // Armed only once the session is visible in the registry
        timeout::schedule(Arc::clone(self), session_id.clone(), self.max_duration());

        body.insert(
            "sessionId".to_string(),
            serde_json::Value::String(session_id.clone()),
        );

        info!("Issued session {}", session_id);
        Ok(payload)
    }

    /// Explicit end requested by the client.
    ///
    /// The `remove` is the race serialization point with the timeout path:
    /// only the caller that gets the session back writes the record. A
    /// repeat call for the same id gets `NotFound`.
    pub async fn end_session(
        &self,
        session_id: &str,
        query_type: Option<String>,
    ) -> Result<CallLogRecord, SessionError> {
        let mut session = self
            .registry
            .remove(session_id)
            .await
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))?;

        // Last-moment client classification, applied to the final snapshot
        if let Some(query_type) = query_type {
            session.query_type = query_type;
        }

        let now = Utc::now();
        let duration = accounting::duration_minutes(&session, now);
        let status = accounting::classify_explicit_end(duration);
        let record = accounting::finalize(&session, status, now, self.call.cost_per_minute);

        info!(
            "Session {} ended: {:?} after {:.2} min",
            session_id, status, record.duration
        );

        // Losing one historical record must not fail the user-facing end
        if let Err(e) = self.store.append(record.clone()).await {
            error!("Failed to persist call record for {}: {}", session_id, e);
        }

        Ok(record)
    }

    /// Timeout path, called by the scheduler when the limit elapses. A
    /// no-op when the session has already been ended explicitly. Never
    /// returns an error: there is no caller to report to.
    pub(crate) async fn finalize_timeout(&self, session_id: &str) {
        let Some(mut session) = self.registry.remove(session_id).await else {
            // Explicit end won the race; the timer just expires
            return;
        };

        session.flag_handoff(HandoffReason::TimeLimitExceeded);

        let record = accounting::finalize(
            &session,
            CallStatus::TimeLimitHandoff,
            Utc::now(),
            self.call.cost_per_minute,
        );

        warn!(
            "Session {} hit the {}s limit, handing off",
            session_id, self.call.max_duration_secs
        );

        if let Err(e) = self.store.append(record).await {
            error!(
                "Failed to persist timeout record for {}: {}",
                session_id, e
            );
        }
    }

    /// Non-destructive read of a live session's handoff state.
    pub async fn handoff_status(&self, session_id: &str) -> Result<HandoffStatus, SessionError> {
        let session = self
            .registry
            .get(session_id)
            .await
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))?;

        let elapsed = session.elapsed_secs(Utc::now());

        Ok(HandoffStatus {
            needs_handoff: session.needs_handoff,
            handoff_reason: session.handoff_reason,
            time_remaining: self.call.max_duration_secs.saturating_sub(elapsed),
        })
    }

    /// Every persisted call record, oldest first.
    pub async fn call_logs(&self) -> Result<Vec<CallLogRecord>, SessionError> {
        Ok(self.store.query_all().await?)
    }

    /// Aggregate totals plus the newest records.
    pub async fn summary(&self) -> Result<CallSummary, SessionError> {
        let records = self.store.query_all().await?;
        let recent = self.store.query_recent(self.call.recent_calls).await?;
        Ok(accounting::summarize(&records, recent))
    }

    /// Number of sessions currently live (diagnostics).
    pub async fn active_sessions(&self) -> usize {
        self.registry.len().await
    }
}
