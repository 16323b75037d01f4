use std::time::Duration;

use reqwest::StatusCode;
use tracing::debug;
use url::Url;

use super::types::{FetchOutcome, NodeStatus};
use crate::error::FetchError;

/// Source of node status snapshots, one call per cycle.
#[async_trait::async_trait]
pub trait StatusFetcher: Send + Sync {
    async fn fetch(&self) -> Result<FetchOutcome, FetchError>;
}

/// Polls the uptime tracker over HTTP(S).
pub struct HttpStatusFetcher {
    client: reqwest::Client,
    url: Url,
}

impl HttpStatusFetcher {
    pub fn new(url: Url, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("nodewatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Client(e.into()))?;

        Ok(Self { client, url })
    }
}

#[async_trait::async_trait]
impl StatusFetcher for HttpStatusFetcher {
    async fn fetch(&self) -> Result<FetchOutcome, FetchError> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.into()))?;

        // Anything but 200 is reported as an unhealthy service, including empty 2xx replies.
        let status = response.status();
        if status != StatusCode::OK {
            debug!("Status source {} answered {}", self.url, status);
            return Ok(FetchOutcome::Unhealthy { status: status.as_u16() });
        }

        let body = response.bytes().await.map_err(|e| FetchError::Transport(e.into()))?;
        debug!("Received {} bytes from {}", body.len(), self.url);

        decode_nodes(&body).map(FetchOutcome::Nodes)
    }
}

/// Decode a status response body. Anything but a JSON array of records is rejected.
pub fn decode_nodes(body: &[u8]) -> Result<Vec<NodeStatus>, FetchError> {
    Ok(serde_json::from_slice(body)?)
}
