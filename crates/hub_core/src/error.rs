/// Submission was attempted with no non-blank subreddit name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no subreddit name entered")]
pub struct ValidationError;

/// A backend call that did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestFailure {
    /// The server answered with a non-2xx status.
    #[error("server responded with status {0}")]
    Status(u16),
    /// The request never produced a response.
    #[error("transport failure: {0}")]
    Transport(String),
    /// A 2xx response whose body could not be decoded.
    #[error("malformed response: {0}")]
    Malformed(String),
}
