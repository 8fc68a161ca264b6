use super::{ChatCompletion, ChatRequest, SearchRequest, WebSearch};
use crate::error::{DailyWordError, DailyWordErrorExt, Result};
use async_trait::async_trait;
use reqwest::Response;
use serde::Deserialize;
use serde_json::Value;
use shiok_domain::config::UpstreamConfig;
use std::fmt;
use std::time::Duration;

/// `reqwest`-backed client for the generation and search APIs.
///
/// Both endpoints share one connection pool and one bearer credential.
#[derive(Clone)]
pub struct HttpUpstream {
    http: reqwest::Client,
    api_key: String,
    generation_url: String,
    search_url: String,
}

impl fmt::Debug for HttpUpstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpUpstream")
            .field("api_key", &"<redacted>")
            .field("generation_url", &self.generation_url)
            .field("search_url", &self.search_url)
            .finish_non_exhaustive()
    }
}

impl HttpUpstream {
    /// Builds the client from the `[upstream]` section.
    ///
    /// # Errors
    /// Returns [`DailyWordError::Transport`] if the TLS backend cannot be initialized.
    pub fn new(config: &UpstreamConfig, api_key: impl Into<String>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let http = builder.build().context("Failed to build upstream HTTP client")?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            generation_url: config.generation.url.clone(),
            search_url: config.search.url.clone(),
        })
    }

    async fn ensure_success(service: &'static str, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(DailyWordError::UpstreamStatus {
            service,
            status: status.as_u16(),
            message: body.into(),
            context: None,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct ChatEnvelope {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatEnvelope {
    fn into_text(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChatCompletion for HttpUpstream {
    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        let response = self
            .http
            .post(&self.generation_url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .context("Chat completion request")?;

        let response = Self::ensure_success("generation", response).await?;
        let bytes = response.bytes().await.context("Chat completion body")?;
        let envelope: ChatEnvelope =
            serde_json::from_slice(&bytes).context("Chat completion envelope")?;
        Ok(envelope.into_text())
    }
}

#[async_trait]
impl WebSearch for HttpUpstream {
    async fn search(&self, request: &SearchRequest) -> Result<Value> {
        let response = self
            .http
            .post(&self.search_url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .context("Search request")?;

        let response = Self::ensure_success("search", response).await?;
        let bytes = response.bytes().await.context("Search body")?;
        serde_json::from_slice(&bytes).context("Search payload")
    }
}
