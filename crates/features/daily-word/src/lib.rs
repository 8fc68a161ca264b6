//! # Daily Word
//!
//! The feature slice behind `POST /api/daily-word`. A [`Pipeline`] asks a text-generation API
//! for a Singapore-themed candidate word, checks it against the caller's exclusions, confirms
//! it through a web-search API, and retries under a fixed attempt budget.
//!
//! ## Layout
//! * [`client`]: the [`ChatCompletion`] / [`WebSearch`] seams and their `reqwest` implementation.
//! * [`generator`]: prompt construction and output validation.
//! * [`verifier`]: search payload normalization and the keyword heuristic.
//! * [`pipeline`]: the bounded retry loop.

pub mod client;
mod error;
pub mod extract;
pub mod generator;
#[cfg(feature = "server")]
mod handler;
pub mod pipeline;
pub mod verifier;

pub use crate::client::{ChatCompletion, HttpUpstream, WebSearch};
pub use crate::error::{DailyWordError, DailyWordErrorExt, Result};
#[cfg(feature = "server")]
pub use crate::error::{
    EXHAUSTED_MESSAGE, INTERNAL_MESSAGE, INVALID_CATEGORY_MESSAGE, MISSING_KEY_MESSAGE,
};
#[cfg(feature = "server")]
pub use crate::handler::WordRequest;
pub use crate::pipeline::{Pipeline, WordOfTheDay};

use crate::generator::Generator;
use crate::verifier::Verifier;
use shiok_domain::config::ApiConfig;
use shiok_domain::registry::{FeatureSlice, InitializedSlice};
use std::any::Any;
use std::ops::Deref;
use std::sync::Arc;

/// Daily word feature state.
#[derive(Debug)]
pub struct DailyWordInner {
    /// `None` when the service was started without upstream credentials.
    pipeline: Option<Pipeline>,
}

impl DailyWordInner {
    #[must_use]
    pub const fn pipeline(&self) -> Option<&Pipeline> {
        self.pipeline.as_ref()
    }
}

#[derive(Debug, Clone)]
pub struct DailyWord {
    inner: Arc<DailyWordInner>,
}

impl DailyWord {
    pub fn new(inner: DailyWordInner) -> Self {
        Self { inner: Arc::new(inner) }
    }

    /// Wires the slice to explicit upstream implementations.
    pub fn with_clients(
        config: &ApiConfig,
        chat: Arc<dyn ChatCompletion>,
        search: Arc<dyn WebSearch>,
    ) -> Self {
        let generator = Generator::new(chat, config.upstream.generation.clone());
        let verifier = Verifier::new(search, config.upstream.search.max_results);
        let pipeline = Pipeline::new(generator, verifier, config.daily_word.max_attempts);
        Self::new(DailyWordInner { pipeline: Some(pipeline) })
    }

    /// A slice that answers every request with "API key not configured".
    pub fn unconfigured() -> Self {
        Self::new(DailyWordInner { pipeline: None })
    }
}

impl Deref for DailyWord {
    type Target = DailyWordInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FeatureSlice for DailyWord {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Initialize the daily word feature from configuration.
///
/// The upstream key is read from `upstream.api_key`; callers resolve any environment
/// fallback before this point.
///
/// # Errors
/// * [`DailyWordError::MissingCredentials`] when no key is configured and
///   `daily_word.allow_missing_credentials` is off.
/// * [`DailyWordError::Transport`] when the HTTP client cannot be built.
pub fn init(config: &ApiConfig) -> Result<InitializedSlice> {
    let api_key = config.upstream.api_key.as_deref().map(str::trim).filter(|key| !key.is_empty());

    let slice = match api_key {
        Some(key) => {
            let upstream = Arc::new(HttpUpstream::new(&config.upstream, key)?);
            DailyWord::with_clients(config, upstream.clone(), upstream)
        },
        None if config.daily_word.allow_missing_credentials => {
            tracing::warn!("No upstream API key configured; the daily word route will answer 500");
            DailyWord::unconfigured()
        },
        None => {
            return Err(DailyWordError::MissingCredentials {
                context: Some("set upstream.api_key or PERPLEXITY_API_KEY".into()),
            });
        },
    };

    tracing::info!(
        max_attempts = config.daily_word.max_attempts,
        model = %config.upstream.generation.model,
        "Daily word slice initialized"
    );
    Ok(InitializedSlice::new(slice))
}

/// Routes of this slice, documented for `OpenAPI`.
#[cfg(feature = "server")]
pub fn router() -> utoipa_axum::router::OpenApiRouter<shiok_kernel::server::ApiState> {
    utoipa_axum::router::OpenApiRouter::new()
        .routes(utoipa_axum::routes!(handler::daily_word_handler))
}
