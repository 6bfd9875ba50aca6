//! Session lifecycle management
//!
//! This module owns the voice-session state machine:
//! - `Session` — the mutable in-flight entity
//! - `SessionRegistry` — process-wide map, the sole source of truth
//! - `SessionManager` — issuance, explicit end, and the read paths
//! - timeout scheduling — one-shot per-session timer driving handoff

mod manager;
mod registry;
mod session;
mod timeout;

pub use manager::{HandoffStatus, SessionManager};
pub use registry::SessionRegistry;
pub use session::{HandoffReason, Session};
pub use timeout::schedule;
