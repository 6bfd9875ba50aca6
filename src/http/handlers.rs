use super::state::AppState;
use crate::error::SessionError;
use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tracing::error;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndSessionRequest {
    /// Required; rejected with 400 before touching the registry if missing
    pub session_id: Option<String>,

    /// Optional last-moment topic classification from the client
    pub query_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(err: SessionError) -> Response {
    let status = match &err {
        SessionError::Upstream(_) => StatusCode::BAD_GATEWAY,
        SessionError::NotFound(_) => StatusCode::NOT_FOUND,
        SessionError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
        SessionError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

/// Best-effort client address: proxy header first, else socket peer.
fn origin_ip(headers: &HeaderMap, peer: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_string())
        .unwrap_or_else(|| peer.ip().to_string())
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /token
/// Mint upstream credentials and start a tracked session
pub async fn issue_token(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Response {
    match state.manager.issue(origin_ip(&headers, peer)).await {
        Ok(payload) => (StatusCode::OK, Json(payload)).into_response(),
        Err(e) => {
            error!("Token issuance failed: {}", e);
            error_response(e)
        }
    }
}

/// POST /end-session
/// Finalize a session and return its call record
pub async fn end_session(
    State(state): State<AppState>,
    Json(req): Json<EndSessionRequest>,
) -> Response {
    let Some(session_id) = req.session_id else {
        return error_response(SessionError::MalformedRequest(
            "sessionId is required".to_string(),
        ));
    };

    match state.manager.end_session(&session_id, req.query_type).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /handoff-status/:session_id
/// Poll a live session's handoff state and remaining time
pub async fn handoff_status(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Response {
    match state.manager.handoff_status(&session_id).await {
        Ok(status) => (StatusCode::OK, Json(status)).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /call-summary
/// Aggregate totals plus the most recent calls
pub async fn call_summary(State(state): State<AppState>) -> Response {
    match state.manager.summary().await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => {
            error!("Summary query failed: {}", e);
            error_response(e)
        }
    }
}

/// GET /call-logs
/// Every persisted call record, unpaginated
pub async fn call_logs(State(state): State<AppState>) -> Response {
    match state.manager.call_logs().await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => {
            error!("Call log query failed: {}", e);
            error_response(e)
        }
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
