/// Failure talking to the scheduling service
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    /// HTTP 401; the session has expired or the token is wrong
    #[error("session expired, please sign in again")]
    Unauthorized,
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected response: {0}")]
    Decode(String),
}
