#![allow(dead_code, unreachable_pub)]

use async_trait::async_trait;
use serde_json::{Value, json};
use shiok_daily_word::client::{ChatRequest, SearchRequest};
use shiok_daily_word::{ChatCompletion, DailyWordError, Result, WebSearch};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn upstream_unavailable(service: &'static str) -> DailyWordError {
    DailyWordError::UpstreamStatus {
        service,
        status: 503,
        message: "Service Unavailable".into(),
        context: None,
    }
}

pub fn word_reply(word: &str, hint: &str, emoji: &str) -> String {
    format!(
        "Here is today's pick!\n{}",
        json!({ "word": word, "hint": hint, "emoji": emoji })
    )
}

pub fn search_hit(text: &str) -> Value {
    json!({ "results": [{ "title": "Result", "snippet": text, "url": "https://example.sg" }] })
}

/// Chat upstream replaying a script; once exhausted it repeats `fallback`.
#[derive(Debug)]
pub struct ScriptedChat {
    replies: Mutex<VecDeque<Result<String>>>,
    fallback: String,
    requests: Mutex<Vec<ChatRequest>>,
    calls: AtomicUsize,
}

impl ScriptedChat {
    pub fn new(replies: Vec<Result<String>>) -> Self {
        Self::with_fallback(replies, "I have no idea")
    }

    pub fn with_fallback(replies: Vec<Result<String>>, fallback: &str) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            fallback: fallback.to_owned(),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatCompletion for ScriptedChat {
    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        self.replies.lock().unwrap().pop_front().unwrap_or_else(|| Ok(self.fallback.clone()))
    }
}

/// Search upstream replaying a script; once exhausted it repeats `fallback`.
#[derive(Debug)]
pub struct ScriptedSearch {
    replies: Mutex<VecDeque<Result<Value>>>,
    fallback: fn() -> Result<Value>,
    queries: Mutex<Vec<SearchRequest>>,
    calls: AtomicUsize,
}

impl ScriptedSearch {
    pub fn new(replies: Vec<Result<Value>>) -> Self {
        Self::with_fallback(replies, || Ok(json!({ "results": [] })))
    }

    pub fn with_fallback(replies: Vec<Result<Value>>, fallback: fn() -> Result<Value>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            fallback,
            queries: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Fails every call with HTTP 503.
    pub fn unavailable() -> Self {
        Self::with_fallback(Vec::new(), || Err(upstream_unavailable("search")))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<SearchRequest> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl WebSearch for ScriptedSearch {
    async fn search(&self, request: &SearchRequest) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(request.clone());
        self.replies.lock().unwrap().pop_front().unwrap_or_else(self.fallback)
    }
}
