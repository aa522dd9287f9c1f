//! Typed client for the local stock backend.
//!
//! | Endpoint | Response |
//! |----------|----------|
//! | `GET /v1/stock-history/{ticker}` | `{ "ticker": .., "data": RawSample[] }` |
//! | `GET /v1/stock-news/{ticker}` | `NewsEvent[]` |
//!
//! The backend reports its own failures as `200 {"error": "..."}`; those are
//! surfaced as [`BackendErrorKind::Upstream`].

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::ClientConfig;
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::{NewsEvent, RawSample, Symbol};

/// Backend failure classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendErrorKind {
    /// Connection, timeout or body read failure.
    Transport,
    /// Non-2xx status code.
    Status,
    /// Body is not the expected JSON shape.
    Payload,
    /// Backend answered with an `{"error": ..}` document.
    Upstream,
}

/// Structured error for a failed backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendError {
    kind: BackendErrorKind,
    message: String,
}

impl BackendError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: BackendErrorKind::Transport,
            message: message.into(),
        }
    }

    pub fn status(status: u16, url: &str) -> Self {
        Self {
            kind: BackendErrorKind::Status,
            message: format!("backend returned status {status} for {url}"),
        }
    }

    pub fn payload(message: impl Into<String>) -> Self {
        Self {
            kind: BackendErrorKind::Payload,
            message: message.into(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self {
            kind: BackendErrorKind::Upstream,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> BackendErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            BackendErrorKind::Transport => "backend.transport",
            BackendErrorKind::Status => "backend.status",
            BackendErrorKind::Payload => "backend.payload",
            BackendErrorKind::Upstream => "backend.upstream",
        }
    }
}

impl Display for BackendError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for BackendError {}

#[derive(Debug, Deserialize)]
struct HistoryPayload {
    #[serde(default)]
    data: Option<Vec<RawSample>>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NewsPayload {
    Items(Vec<NewsEvent>),
    Failure { error: String },
}

/// Client for the history and news endpoints.
#[derive(Clone)]
pub struct StockBackend {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    timeout_ms: u64,
}

impl StockBackend {
    pub fn new(config: &ClientConfig, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            base_url: config.base_url().to_owned(),
            timeout_ms: config.timeout_ms(),
        }
    }

    /// Backend talking to the network through reqwest.
    pub fn with_reqwest(config: &ClientConfig) -> Self {
        Self::new(config, Arc::new(ReqwestHttpClient::new()))
    }

    pub fn is_mock(&self) -> bool {
        self.http_client.is_mock()
    }

    pub fn history_url(&self, symbol: &Symbol) -> String {
        format!("{}/v1/stock-history/{}", self.base_url, symbol.path_segment())
    }

    pub fn news_url(&self, symbol: &Symbol) -> String {
        format!("{}/v1/stock-news/{}", self.base_url, symbol.path_segment())
    }

    /// Raw price samples for `symbol`, unnormalized.
    pub async fn history(&self, symbol: &Symbol) -> Result<Vec<RawSample>, BackendError> {
        let url = self.history_url(symbol);
        let payload: HistoryPayload = self.get_json(&url).await?;

        if let Some(error) = payload.error {
            return Err(BackendError::upstream(error));
        }

        let samples = payload
            .data
            .ok_or_else(|| BackendError::payload(format!("missing 'data' in {url}")))?;
        tracing::debug!(%symbol, count = samples.len(), "received price history");
        Ok(samples)
    }

    /// News items for `symbol`, in backend order.
    pub async fn news(&self, symbol: &Symbol) -> Result<Vec<NewsEvent>, BackendError> {
        let url = self.news_url(symbol);
        match self.get_json::<NewsPayload>(&url).await? {
            NewsPayload::Items(items) => {
                tracing::debug!(%symbol, count = items.len(), "received news");
                Ok(items)
            }
            NewsPayload::Failure { error } => Err(BackendError::upstream(error)),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, BackendError> {
        let request = HttpRequest::get(url)
            .with_header("accept", "application/json")
            .with_timeout_ms(self.timeout_ms);

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| BackendError::transport(format!("GET {url}: {}", e.message())))?;

        if !response.is_success() {
            return Err(BackendError::status(response.status, url));
        }

        serde_json::from_str(&response.body)
            .map_err(|e| BackendError::payload(format!("malformed JSON from {url}: {e}")))
    }
}
