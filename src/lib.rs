pub mod accounting;
pub mod config;
pub mod error;
pub mod http;
pub mod logstore;
pub mod session;
pub mod upstream;

pub use accounting::{CallLogRecord, CallStatus, CallSummary};
pub use config::{CallConfig, Config};
pub use error::SessionError;
pub use http::{create_router, AppState};
pub use logstore::{CallLogStore, JsonlLogStore, MemoryLogStore};
pub use session::{HandoffReason, HandoffStatus, Session, SessionManager, SessionRegistry};
pub use upstream::{RealtimeTokenIssuer, TokenIssuer};
