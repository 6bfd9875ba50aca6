//! HTTP API server for the browser voice client
//!
//! - GET /token - mint upstream credentials, start a tracked session
//! - POST /end-session - finalize a session, returns its call record
//! - GET /handoff-status/:id - poll handoff state and remaining time
//! - GET /call-summary - aggregate call statistics
//! - GET /call-logs - all persisted call records
//! - GET /health - health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
