use thiserror::Error;

/// Failure taxonomy for session operations.
///
/// Every I/O failure is converted to one of these at the boundary of the
/// operation that caused it; none of them is allowed to take the process
/// down. The HTTP layer maps each variant to a status code.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Credential issuance against the upstream speech API failed.
    /// No session is created when this is returned.
    #[error("upstream credential issuance failed: {0}")]
    Upstream(String),

    /// The referenced session is not (or no longer) in the registry.
    #[error("session {0} not found")]
    NotFound(String),

    /// The request was rejected before touching the registry.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// The call log store failed on a read path. Append failures during
    /// finalization are logged and swallowed instead, so the caller still
    /// receives the in-memory record.
    #[error("call log store error: {0}")]
    Persistence(#[from] anyhow::Error),
}
