use std::time::Duration;

use url::Url;

use crate::{ApiError, FailureKind};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";
/// Largest per-subreddit post count the backend accepts.
pub const MAX_POST_LIMIT: u8 = 25;

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Whole-request timeout. `None` leaves the request untimed.
    pub request_timeout: Option<Duration>,
    /// `name=value` session cookie issued by the backend after login.
    pub session_cookie: Option<String>,
    pub post_limit: Option<u8>,
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            session_cookie: None,
            post_limit: None,
            user_agent: concat!("summarize_hub/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientSettings {
    /// Base URL with a guaranteed trailing slash, so joins keep any path prefix.
    pub fn base(&self) -> Result<Url, ApiError> {
        let mut raw = self.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let url =
            Url::parse(&raw).map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(ApiError::new(
                FailureKind::InvalidUrl,
                format!("{raw} cannot be a base url"),
            ));
        }
        Ok(url)
    }

    /// `path` is relative, e.g. `api/summaries/`.
    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base()?
            .join(path)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    pub fn login_url(&self) -> Result<Url, ApiError> {
        self.endpoint("api/login/")
    }

    /// The configured post limit if it is within what the backend accepts.
    pub fn effective_post_limit(&self) -> Option<u8> {
        self.post_limit
            .filter(|limit| (1..=MAX_POST_LIMIT).contains(limit))
    }
}
