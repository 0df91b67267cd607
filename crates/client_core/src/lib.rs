use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::protocol::StatusPayload;
use thiserror::Error;
use tracing::debug;
use url::Url;

pub mod config;
mod poller;
pub mod render;

pub use poller::{PollTask, StatusPoller, DEFAULT_POLL_INTERVAL};
pub use render::{render, Indicator, StatusBoard, StatusView, UiState};

const STATUS_PATH: &str = "status";
const CONTROL_PATH: &str = "control";

/// Every way a request to the player service can fail.
///
/// The poller treats all variants alike; they are kept apart for logging.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("base url '{0}' cannot carry path segments")]
    InvalidBaseUrl(String),
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with HTTP {status}")]
    HttpStatus { url: String, status: StatusCode },
    #[error("malformed status body from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Transport seam between the poller and the player service.
#[async_trait]
pub trait StatusApi: Send + Sync {
    async fn fetch_status(&self) -> Result<StatusPayload, RequestError>;
    async fn send_control(&self, action: &str) -> Result<StatusPayload, RequestError>;
}

/// `StatusApi` over HTTP. No request timeout is applied.
#[derive(Clone)]
pub struct HttpStatusApi {
    http: Client,
    base_url: Url,
}

impl HttpStatusApi {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, RequestError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RequestError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_status_payload(&self, url: Url) -> Result<StatusPayload, RequestError> {
        let url_text = url.to_string();
        debug!(url = %url_text, "requesting player status");
        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| RequestError::Transport {
                url: url_text.clone(),
                source,
            })?;

        let status = res.status();
        if !status.is_success() {
            return Err(RequestError::HttpStatus {
                url: url_text,
                status,
            });
        }

        let body = res.bytes().await.map_err(|source| RequestError::Transport {
            url: url_text.clone(),
            source,
        })?;
        serde_json::from_slice(&body).map_err(|source| RequestError::Decode {
            url: url_text,
            source,
        })
    }
}

#[async_trait]
impl StatusApi for HttpStatusApi {
    async fn fetch_status(&self) -> Result<StatusPayload, RequestError> {
        let url = self.endpoint(&[STATUS_PATH])?;
        self.get_status_payload(url).await
    }

    async fn send_control(&self, action: &str) -> Result<StatusPayload, RequestError> {
        let url = self.endpoint(&[CONTROL_PATH, action])?;
        self.get_status_payload(url).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
