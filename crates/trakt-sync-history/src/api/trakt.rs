use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use trakt_sync_core::{SyncError, SyncParameters, SyncResult};

use crate::payload::SyncPayload;
use crate::response::ResponseBody;

pub const API_VERSION: &str = "2";
pub const USER_AGENT: &str = "trakt-sync/0.1";
const HISTORY_PATH: &str = "/sync/history";

/// A fully prepared `POST /sync/history` call.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRequest {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub payload: SyncPayload,
}

impl HistoryRequest {
    pub fn new(api_base: &str, params: &SyncParameters) -> Self {
        Self {
            url: format!("{}{HISTORY_PATH}", api_base.trim_end_matches('/')),
            headers: vec![
                ("Content-Type", "application/json".to_string()),
                ("trakt-api-version", API_VERSION.to_string()),
                ("trakt-api-key", params.client_id.clone()),
                ("Authorization", format!("Bearer {}", params.access_token)),
                ("User-Agent", USER_AGENT.to_string()),
            ],
            payload: SyncPayload::single(params.media_type, params.external_id),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Sends a history request exactly once.
#[async_trait]
pub trait HistoryTransport: Send + Sync {
    async fn post(&self, request: &HistoryRequest) -> SyncResult<ResponseBody>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> SyncResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| SyncError::Transport(format!("failed to build http client: {err}")))?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HistoryTransport for ReqwestTransport {
    async fn post(&self, request: &HistoryRequest) -> SyncResult<ResponseBody> {
        let body = serde_json::to_vec(&request.payload)
            .map_err(|err| SyncError::InvalidInput(format!("failed to encode payload: {err}")))?;

        let mut builder = self.client.post(&request.url).body(body);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }

        debug!(url = %request.url, "posting history sync");
        let response = builder
            .send()
            .await
            .map_err(|err| SyncError::Transport(format!("history request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::Api(format!(
                "history sync rejected: status={status} body={body}"
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|err| SyncError::Transport(format!("failed to read history response: {err}")))?;
        debug!(%status, bytes = text.len(), "history sync answered");
        Ok(ResponseBody::Text(text))
    }
}
