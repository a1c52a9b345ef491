use thiserror::Error;

/// Failures reported at the session boundary. Each aborts the operation and
/// leaves previously held results untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("mail source unavailable: {0}")]
    SourceUnavailable(String),
    #[error("query failed: {0}")]
    QueryFailure(String),
    #[error("nothing to save: run a search that finds messages first")]
    NothingToSave,
    #[error("could not save report: {0}")]
    SinkFailure(String),
}
