//! Candidate verification against web-search evidence.
//!
//! The check is a heuristic: a search result confirms a word when its text mentions the word
//! and at least one keyword of the category. Anything inconclusive is a rejection.

use crate::client::{SearchRequest, WebSearch};
use serde::Deserialize;
use serde_json::Value;
use shiok_domain::category::Category;
use std::sync::Arc;
use tracing::{debug, warn};

/// JSON pointers tried in order to locate the result list; the first array found wins.
const RESULT_LIST_POINTERS: [&str; 4] = ["/results", "/data/results", "/data", "/top_results"];

/// Text-bearing fields of a search result; all optional, all other fields ignored.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResult {
    pub title: Option<String>,
    pub snippet: Option<String>,
    pub content: Option<String>,
    pub text: Option<String>,
}

impl SearchResult {
    /// Lowercase concatenation of every present text field.
    #[must_use]
    pub fn text_blob(&self) -> String {
        [&self.title, &self.snippet, &self.content, &self.text]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }

    /// Whether this result mentions `word` together with one of `keywords`.
    #[must_use]
    pub fn confirms(&self, word: &str, keywords: &[&str]) -> bool {
        let blob = self.text_blob();
        blob.contains(&word.to_lowercase()) && keywords.iter().any(|keyword| blob.contains(keyword))
    }
}

/// Locates the result list in a provider payload.
///
/// Returns `None` when no known key holds an array. Entries that are not objects, or whose
/// text fields are not strings, are dropped.
#[must_use]
pub fn search_results(payload: &Value) -> Option<Vec<SearchResult>> {
    let list = RESULT_LIST_POINTERS
        .iter()
        .find_map(|pointer| payload.pointer(pointer).and_then(Value::as_array))?;

    Some(
        list.iter()
            .filter_map(|entry| SearchResult::deserialize(entry).ok())
            .collect(),
    )
}

#[must_use]
pub fn search_query(word: &str, category: Category) -> String {
    format!("{word} singapore {}", category.profile().query_tail)
}

/// Checks candidates against the web-search API.
#[derive(Debug, Clone)]
pub struct Verifier {
    client: Arc<dyn WebSearch>,
    max_results: u8,
}

impl Verifier {
    pub fn new(client: Arc<dyn WebSearch>, max_results: u8) -> Self {
        Self { client, max_results }
    }

    /// Returns `true` only when at least one search result confirms the word.
    ///
    /// Fails closed: upstream errors, unknown payload shapes and empty result lists all
    /// yield `false`.
    pub async fn verify(&self, word: &str, category: Category) -> bool {
        let request =
            SearchRequest { query: search_query(word, category), max_results: self.max_results };

        let payload = match self.client.search(&request).await {
            Ok(payload) => payload,
            Err(e) => {
                warn!(%category, word, error = %e, "Verification search failed");
                return false;
            },
        };

        let Some(results) = search_results(&payload) else {
            warn!(%category, word, "Verification payload has no result list");
            return false;
        };

        let keywords = category.profile().keywords;
        let confirmed = results.iter().any(|result| result.confirms(word, keywords));
        debug!(%category, word, results = results.len(), confirmed, "Verification finished");
        confirmed
    }
}
