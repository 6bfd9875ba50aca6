use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Why a session was flagged for human-agent handoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandoffReason {
    TimeLimitExceeded,
}

/// A live voice-assistant session.
///
/// Exists only in the `SessionRegistry`, from credential issuance until the
/// first of {explicit end, timeout fire} removes it. The durable summary of
/// a finished session is `CallLogRecord`, not this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Opaque unique id, generated at creation, never reused
    pub session_id: String,

    /// When the session was created. Immutable.
    pub start_time: DateTime<Utc>,

    /// Best-effort client address, informational only
    #[serde(rename = "originIP")]
    pub origin_ip: String,

    /// Latches false -> true at most once, together with `handoff_reason`
    pub needs_handoff: bool,

    pub handoff_reason: Option<HandoffReason>,

    /// Caller-supplied topic tag, mutable until the session ends
    pub query_type: String,
}

impl Session {
    pub fn new(origin_ip: impl Into<String>) -> Self {
        Self {
            session_id: format!("sess-{}", uuid::Uuid::new_v4()),
            start_time: Utc::now(),
            origin_ip: origin_ip.into(),
            needs_handoff: false,
            handoff_reason: None,
            query_type: "unknown".to_string(),
        }
    }

    /// Mark the session for handoff. Only the first call takes effect.
    pub fn flag_handoff(&mut self, reason: HandoffReason) {
        if !self.needs_handoff {
            self.needs_handoff = true;
            self.handoff_reason = Some(reason);
        }
    }

    /// Seconds since the session started, clamped at zero.
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> u64 {
        now.signed_duration_since(self.start_time).num_seconds().max(0) as u64
    }
}
