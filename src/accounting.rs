//! Call accounting: duration/cost derivation, terminal status
//! classification, and the aggregate summary over persisted records.

use crate::session::{HandoffReason, Session};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Terminal classification of a finished call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallStatus {
    /// Explicit end below the quick-resolve threshold. This is a length
    /// heuristic carried over from the product: nothing confirms the query
    /// was actually resolved.
    #[serde(rename = "quick_resolved")]
    QuickResolved,

    /// Explicit end at or above the threshold
    #[serde(rename = "user-ended")]
    UserEnded,

    /// Session hit the time limit before the user ended it
    #[serde(rename = "time_limit_handoff")]
    TimeLimitHandoff,
}

/// Immutable, durable summary of one finished session. Written exactly once
/// per session lifecycle, never mutated afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallLogRecord {
    pub session_id: String,

    /// Finalization time
    pub timestamp: DateTime<Utc>,

    /// Minutes, rounded to 2 decimal places
    pub duration: f64,

    /// `duration * cost_per_minute`, rounded to 4 decimal places
    pub estimated_cost: f64,

    #[serde(rename = "originIP")]
    pub origin_ip: String,

    pub status: CallStatus,
    pub query_type: String,
    pub needs_handoff: bool,
    pub handoff_reason: Option<HandoffReason>,
}

/// Explicit ends shorter than this many minutes count as quick-resolved.
pub const QUICK_RESOLVE_THRESHOLD_MINUTES: f64 = 1.0;

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Minutes between session start and `now`, rounded for display/storage.
pub fn duration_minutes(session: &Session, now: DateTime<Utc>) -> f64 {
    let elapsed_ms = now.signed_duration_since(session.start_time).num_milliseconds();
    round2(elapsed_ms as f64 / 60_000.0)
}

/// Classify an explicit end by how long the call ran.
pub fn classify_explicit_end(duration_minutes: f64) -> CallStatus {
    if duration_minutes < QUICK_RESOLVE_THRESHOLD_MINUTES {
        CallStatus::QuickResolved
    } else {
        CallStatus::UserEnded
    }
}

/// Produce the final accounting record for a session.
///
/// Pure given its inputs: reads only the session snapshot, `now`, and the
/// configured rate. Status classification is the caller's responsibility.
pub fn finalize(
    session: &Session,
    status: CallStatus,
    now: DateTime<Utc>,
    cost_per_minute: f64,
) -> CallLogRecord {
    let duration = duration_minutes(session, now);

    CallLogRecord {
        session_id: session.session_id.clone(),
        timestamp: now,
        duration,
        estimated_cost: round4(duration * cost_per_minute),
        origin_ip: session.origin_ip.clone(),
        status,
        query_type: session.query_type.clone(),
        needs_handoff: session.needs_handoff,
        handoff_reason: session.handoff_reason,
    }
}

/// Aggregate view over the whole call log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallSummary {
    pub total_calls: usize,

    /// Minutes, 2 decimal places
    pub total_duration: f64,
    pub avg_duration: f64,

    /// 4 decimal places
    pub total_cost: f64,
    pub avg_cost: f64,

    /// Percentage of calls flagged for handoff, 1 decimal place
    pub handoff_rate: f64,

    /// Call counts per query-type tag
    pub by_query_type: BTreeMap<String, usize>,

    /// Newest-first slice of the most recent calls
    pub recent_calls: Vec<CallLogRecord>,
}

/// Compute aggregates over `records`; `recent_calls` is passed through
/// as-is (already limited and newest-first by the store).
pub fn summarize(records: &[CallLogRecord], recent_calls: Vec<CallLogRecord>) -> CallSummary {
    let total_calls = records.len();
    let total_duration: f64 = records.iter().map(|r| r.duration).sum();
    let total_cost: f64 = records.iter().map(|r| r.estimated_cost).sum();
    let handoff_count = records.iter().filter(|r| r.needs_handoff).count();

    let mut by_query_type = BTreeMap::new();
    for record in records {
        *by_query_type.entry(record.query_type.clone()).or_insert(0) += 1;
    }

    let (avg_duration, avg_cost, handoff_rate) = if total_calls == 0 {
        (0.0, 0.0, 0.0)
    } else {
        let n = total_calls as f64;
        (
            round2(total_duration / n),
            round4(total_cost / n),
            round1(handoff_count as f64 * 100.0 / n),
        )
    };

    CallSummary {
        total_calls,
        total_duration: round2(total_duration),
        avg_duration,
        total_cost: round4(total_cost),
        avg_cost,
        handoff_rate,
        by_query_type,
        recent_calls,
    }
}
