use std::sync::Arc;

use hub_logging::{hub_debug, hub_info, hub_warn};
use reqwest::cookie::Jar;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    ApiError, ClientSettings, FailureKind, SelectionRequest, SessionStatus, SubredditSummary,
};

/// The summarization backend, as seen by the client.
#[async_trait::async_trait]
pub trait SummaryApi: Send + Sync {
    /// `POST /api/summaries/`. The response body is ignored.
    async fn submit_selection(&self, subreddits: &[String]) -> Result<(), ApiError>;

    /// `GET /api/summaries/`.
    async fn fetch_summaries(&self) -> Result<Vec<SubredditSummary>, ApiError>;

    /// `GET /api/me/`.
    async fn check_session(&self) -> Result<SessionStatus, ApiError>;

    /// `POST /api/logout/`.
    async fn logout(&self) -> Result<(), ApiError>;
}

/// Credentialed reqwest client. The cookie jar is shared by every request
/// and retains whatever the backend sets.
#[derive(Debug, Clone)]
pub struct ReqwestSummaryApi {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestSummaryApi {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let base = settings.base()?;
        let jar = Arc::new(Jar::default());
        if let Some(cookie) = settings.session_cookie.as_deref() {
            jar.add_cookie_str(cookie, &base);
        }

        let mut builder = reqwest::Client::builder()
            .cookie_provider(jar)
            .connect_timeout(settings.connect_timeout)
            .user_agent(settings.user_agent.clone());
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self { settings, client })
    }

    fn summaries_url(&self) -> Result<Url, ApiError> {
        self.settings.endpoint("api/summaries/")
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        hub_debug!("{} answered {}", response.url(), status);
        if !status.is_success() {
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        Ok(response)
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        serde_json::from_slice(&bytes).map_err(|err| {
            hub_warn!("Response body did not decode: {}", err);
            ApiError::new(FailureKind::Decode, err.to_string())
        })
    }
}

#[async_trait::async_trait]
impl SummaryApi for ReqwestSummaryApi {
    async fn submit_selection(&self, subreddits: &[String]) -> Result<(), ApiError> {
        let url = self.summaries_url()?;
        let body = serde_json::to_vec(&SelectionRequest {
            subreddits,
            limit: self.settings.effective_post_limit(),
        })
        .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))?;

        hub_info!("POST {} subreddits={}", url, subreddits.len());
        self.send(
            self.client
                .post(url)
                .header(CONTENT_TYPE, "application/json")
                .body(body),
        )
        .await?;
        Ok(())
    }

    async fn fetch_summaries(&self) -> Result<Vec<SubredditSummary>, ApiError> {
        let mut url = self.summaries_url()?;
        if let Some(limit) = self.settings.effective_post_limit() {
            url.query_pairs_mut()
                .append_pair("limit", &limit.to_string());
        }

        hub_info!("GET {}", url);
        let response = self
            .send(self.client.get(url).header(ACCEPT, "application/json"))
            .await?;
        Self::read_json(response).await
    }

    async fn check_session(&self) -> Result<SessionStatus, ApiError> {
        let url = self.settings.endpoint("api/me/")?;
        hub_info!("GET {}", url);
        let response = self
            .send(self.client.get(url).header(ACCEPT, "application/json"))
            .await?;
        Self::read_json(response).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let url = self.settings.endpoint("api/logout/")?;
        hub_info!("POST {}", url);
        self.send(self.client.post(url)).await?;
        Ok(())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_builder() {
        return ApiError::new(FailureKind::InvalidUrl, err.to_string());
    }
    if err.is_decode() {
        return ApiError::new(FailureKind::Decode, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
