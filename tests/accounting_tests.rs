// Unit tests for call accounting: duration/cost derivation, terminal
// status classification, and summary aggregation.

use chrono::Utc;
use voiceline::accounting::{
    self, classify_explicit_end, duration_minutes, finalize, summarize, CallLogRecord,
};
use voiceline::{CallStatus, HandoffReason, Session};

/// Build a session whose start time lies `mins` minutes in the past.
fn session_started_minutes_ago(mins: f64) -> Session {
    let mut session = Session::new("203.0.113.7");
    session.start_time = Utc::now() - chrono::Duration::milliseconds((mins * 60_000.0) as i64);
    session
}

fn record(duration: f64, cost: f64, query_type: &str, needs_handoff: bool) -> CallLogRecord {
    CallLogRecord {
        session_id: format!("sess-{}", uuid::Uuid::new_v4()),
        timestamp: Utc::now(),
        duration,
        estimated_cost: cost,
        origin_ip: "203.0.113.7".to_string(),
        status: if needs_handoff {
            CallStatus::TimeLimitHandoff
        } else {
            CallStatus::UserEnded
        },
        query_type: query_type.to_string(),
        needs_handoff,
        handoff_reason: needs_handoff.then_some(HandoffReason::TimeLimitExceeded),
    }
}

#[test]
fn test_duration_and_cost_derivation() {
    let session = session_started_minutes_ago(2.0);
    let record = finalize(&session, CallStatus::UserEnded, Utc::now(), 0.30);

    assert!(
        (record.duration - 2.0).abs() < 0.02,
        "duration should match elapsed time, got {}",
        record.duration
    );
    assert!((record.estimated_cost - 0.60).abs() < 0.01);
}

#[test]
fn test_duration_rounding_two_decimals() {
    let session = session_started_minutes_ago(1.5);
    let duration = duration_minutes(&session, Utc::now());

    // 90 seconds -> 1.5 minutes after 2 dp rounding
    assert!((duration - 1.5).abs() < 0.02);
    assert_eq!(duration, (duration * 100.0).round() / 100.0);
}

#[test]
fn test_classification_thresholds() {
    assert_eq!(classify_explicit_end(0.5), CallStatus::QuickResolved);
    assert_eq!(classify_explicit_end(2.0), CallStatus::UserEnded);
    // Boundary: exactly one minute is not "quick"
    assert_eq!(classify_explicit_end(1.0), CallStatus::UserEnded);
    assert_eq!(classify_explicit_end(0.99), CallStatus::QuickResolved);
}

#[test]
fn test_finalize_carries_session_fields() {
    let mut session = session_started_minutes_ago(0.5);
    session.query_type = "skincare".to_string();
    session.flag_handoff(HandoffReason::TimeLimitExceeded);

    let record = finalize(&session, CallStatus::TimeLimitHandoff, Utc::now(), 0.30);

    assert_eq!(record.session_id, session.session_id);
    assert_eq!(record.origin_ip, "203.0.113.7");
    assert_eq!(record.query_type, "skincare");
    assert!(record.needs_handoff);
    assert_eq!(record.handoff_reason, Some(HandoffReason::TimeLimitExceeded));
}

#[test]
fn test_handoff_flag_latches() {
    let mut session = Session::new("203.0.113.7");
    assert!(!session.needs_handoff);

    session.flag_handoff(HandoffReason::TimeLimitExceeded);
    assert!(session.needs_handoff);
    assert_eq!(session.handoff_reason, Some(HandoffReason::TimeLimitExceeded));

    // Second flag is a no-op
    session.flag_handoff(HandoffReason::TimeLimitExceeded);
    assert!(session.needs_handoff);
}

#[test]
fn test_status_wire_format() {
    assert_eq!(
        serde_json::to_value(CallStatus::QuickResolved).unwrap(),
        "quick_resolved"
    );
    assert_eq!(
        serde_json::to_value(CallStatus::UserEnded).unwrap(),
        "user-ended"
    );
    assert_eq!(
        serde_json::to_value(CallStatus::TimeLimitHandoff).unwrap(),
        "time_limit_handoff"
    );
    assert_eq!(
        serde_json::to_value(HandoffReason::TimeLimitExceeded).unwrap(),
        "time_limit_exceeded"
    );
}

#[test]
fn test_record_serializes_camel_case() {
    let value = serde_json::to_value(record(1.0, 0.3, "unknown", false)).unwrap();

    assert!(value.get("sessionId").is_some());
    assert!(value.get("estimatedCost").is_some());
    assert!(value.get("originIP").is_some());
    assert!(value.get("needsHandoff").is_some());
    assert!(value.get("queryType").is_some());
}

#[test]
fn test_summary_aggregation() {
    let records = vec![
        record(1.0, 0.3, "skincare", false),
        record(2.0, 0.6, "haircare", true),
        record(3.0, 0.9, "skincare", false),
    ];

    let summary = summarize(&records, records.clone());

    assert_eq!(summary.total_calls, 3);
    assert_eq!(summary.total_duration, 6.0);
    assert_eq!(summary.avg_duration, 2.0);
    assert_eq!(summary.total_cost, 1.8);
    assert_eq!(summary.avg_cost, 0.6);
    assert_eq!(summary.handoff_rate, 33.3);
    assert_eq!(summary.by_query_type["skincare"], 2);
    assert_eq!(summary.by_query_type["haircare"], 1);
    assert_eq!(summary.recent_calls.len(), 3);
}

#[test]
fn test_summary_empty_log() {
    let summary = summarize(&[], Vec::new());

    assert_eq!(summary.total_calls, 0);
    assert_eq!(summary.total_duration, 0.0);
    assert_eq!(summary.avg_duration, 0.0);
    assert_eq!(summary.total_cost, 0.0);
    assert_eq!(summary.avg_cost, 0.0);
    assert_eq!(summary.handoff_rate, 0.0);
    assert!(summary.by_query_type.is_empty());
}

#[test]
fn test_cost_uses_configured_rate() {
    let session = session_started_minutes_ago(2.0);
    let record = accounting::finalize(&session, CallStatus::UserEnded, Utc::now(), 1.25);

    assert!((record.estimated_cost - record.duration * 1.25).abs() < 0.0001);
}
