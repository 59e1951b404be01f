use std::fmt;

use serde::{Deserialize, Serialize};

/// Correlates an engine command with its completion event.
pub type RequestId = u64;

/// Body of `POST /api/summaries/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionRequest<'a> {
    pub subreddits: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PostRecord {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub score: i64,
    pub comments: u64,
    pub url: String,
    pub author: String,
    pub subreddit: String,
}

/// One element of the `GET /api/summaries/` array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubredditSummary {
    pub subreddit: String,
    #[serde(default)]
    pub posts: Vec<PostRecord>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of `GET /api/me/`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct SessionStatus {
    pub authenticated: bool,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    SelectionSubmitted {
        request_id: RequestId,
        result: Result<(), ApiError>,
    },
    SummariesFetched {
        request_id: RequestId,
        result: Result<Vec<SubredditSummary>, ApiError>,
    },
    SessionChecked {
        request_id: RequestId,
        result: Result<SessionStatus, ApiError>,
    },
    LoggedOut {
        result: Result<(), ApiError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    Decode,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Decode => write!(f, "malformed response body"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to build http client: {0}")]
    Client(#[from] ApiError),
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
