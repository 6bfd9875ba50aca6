use crate::session::SessionManager;
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<SessionManager>,
}
