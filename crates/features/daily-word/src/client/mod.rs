//! Seams to the two upstream APIs.
//!
//! The pipeline only talks to [`ChatCompletion`] and [`WebSearch`]; [`HttpUpstream`] is the
//! production implementation of both.

mod http;

pub use http::HttpUpstream;

use crate::error::Result;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

/// Body of an OpenAI-compatible chat completion call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Body of a web-search call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub max_results: u8,
}

/// Text generation upstream.
#[async_trait]
pub trait ChatCompletion: Debug + Send + Sync {
    /// Returns the text of the first choice, or an empty string when the envelope carries none.
    ///
    /// # Errors
    /// Transport failures, non-success statuses and undecodable envelopes.
    async fn complete(&self, request: &ChatRequest) -> Result<String>;
}

/// Web search upstream.
#[async_trait]
pub trait WebSearch: Debug + Send + Sync {
    /// Returns the raw JSON payload; its shape varies between providers.
    ///
    /// # Errors
    /// Transport failures, non-success statuses and non-JSON bodies.
    async fn search(&self, request: &SearchRequest) -> Result<Value>;
}
