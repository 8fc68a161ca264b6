use crate::constants::MAX_GENERATION_ATTEMPTS;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level API configuration shared across services.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfigInner {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub daily_word: DailyWordConfig,
    pub log: LogConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(flatten, default)]
    inner: Arc<ApiConfigInner>,
}

impl Deref for ApiConfig {
    type Target = ApiConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ApiConfig {
    fn deref_mut(&mut self) -> &mut ApiConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub ssl: Option<SslConfig>,
}

/// TLS certificate/key paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SslConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Credentials and endpoints of the text-generation and web-search APIs.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Bearer credential shared by both upstreams.
    pub api_key: Option<String>,
    /// Client-level timeout; `None` leaves the HTTP client default in place.
    pub timeout_seconds: Option<u64>,
    pub generation: GenerationConfig,
    pub search: SearchConfig,
}

/// OpenAI-compatible chat completion endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Web-search endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub url: String,
    pub max_results: u8,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DailyWordConfig {
    pub max_attempts: u8,
    /// Start without an upstream key and answer 500 on the word route instead of failing boot.
    pub allow_missing_credentials: bool,
}

/// Logging knobs applied by `shiok-logger`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default level directive (`trace`..`error`).
    pub level: String,
    /// Extra directives, e.g. `shiok_daily_word=debug,hyper=info`.
    pub env_filter: Option<String>,
    /// Enables rolling file output into this directory.
    pub directory: Option<PathBuf>,
    /// `minutely`, `hourly`, `daily` or `never`.
    pub rotation: String,
    pub json: bool,
    pub max_files: usize,
}

// --- Default ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 4583, ssl: None }
    }
}

impl Default for SslConfig {
    fn default() -> Self {
        Self { cert: PathBuf::from("cert.pem"), key: PathBuf::from("key.pem") }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            url: "https://api.perplexity.ai/chat/completions".to_owned(),
            model: "sonar".to_owned(),
            max_tokens: 150,
            temperature: 1.3,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { url: "https://api.perplexity.ai/search".to_owned(), max_results: 5 }
    }
}

impl Default for DailyWordConfig {
    fn default() -> Self {
        Self { max_attempts: MAX_GENERATION_ATTEMPTS, allow_missing_credentials: false }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            env_filter: None,
            directory: None,
            rotation: "daily".to_owned(),
            json: false,
            max_files: 10,
        }
    }
}
