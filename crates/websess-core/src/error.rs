use thiserror::Error;

/// The complete error taxonomy of the session layer. Both kinds are
/// expected control-flow signals on the hot path: handlers translate them
/// into a redirect to the login page, the reaper skips them. Neither is
/// ever surfaced to the client as an error response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("no such cookie value: {0}")]
    CookieKeyNotFound(String),

    #[error("no such session: {0}")]
    SessionNotFound(String),
}
