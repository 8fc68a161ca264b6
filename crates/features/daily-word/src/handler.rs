use crate::DailyWord;
use crate::error::{DailyWordError, DailyWordErrorExt, Result};
use crate::pipeline::WordOfTheDay;
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use serde::Deserialize;
use serde_json::Value;
use shiok_domain::category::Category;
use shiok_domain::constants::GAME_TAG;
use shiok_domain::word::ExclusionSet;
use shiok_kernel::server::{ApiState, ErrorResponse};

/// Daily word request.
///
/// Both fields are read leniently: a non-string category is treated as invalid and
/// non-string exclusion entries are dropped. Any JSON body that is not an object reads as
/// an empty request.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct WordRequest {
    /// One of `food`, `places`, `singlish`, `all`.
    #[serde(default)]
    #[schema(value_type = String, example = "food")]
    pub category: Option<Value>,
    /// Words the player has already seen.
    #[serde(default)]
    #[schema(value_type = Option<Vec<String>>, example = json!(["LAKSA", "SATAY"]))]
    pub exclude: Option<Value>,
}

impl WordRequest {
    /// Reads a request out of any JSON value, regardless of its shape.
    #[must_use]
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(map) => serde_json::from_value(Value::Object(map)).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    /// # Errors
    /// [`DailyWordError::InvalidCategory`] when the category is missing, not a string, or unknown.
    pub fn category(&self) -> Result<Category> {
        let raw = self.category.as_ref().and_then(Value::as_str).ok_or_else(|| {
            DailyWordError::InvalidCategory { message: "missing".into(), context: None }
        })?;
        raw.parse::<Category>().map_err(|e| DailyWordError::InvalidCategory {
            message: e.to_string().into(),
            context: None,
        })
    }

    /// Caller exclusions: trimmed, uppercased, deduplicated, capped.
    #[must_use]
    pub fn exclusions(&self) -> ExclusionSet {
        self.exclude
            .as_ref()
            .and_then(Value::as_array)
            .map(|entries| ExclusionSet::from_caller(entries.iter().filter_map(Value::as_str)))
            .unwrap_or_default()
    }
}

#[utoipa::path(
    post,
    path = "/api/daily-word",
    request_body = WordRequest,
    responses(
        (status = OK, description = "A verified word", body = WordOfTheDay),
        (status = BAD_REQUEST, description = "Invalid category", body = ErrorResponse),
        (status = SERVICE_UNAVAILABLE, description = "No verified word within the attempt budget", body = ErrorResponse),
        (status = INTERNAL_SERVER_ERROR, description = "Missing API key or unexpected failure", body = ErrorResponse),
    ),
    tag = GAME_TAG,
)]
pub(crate) async fn daily_word_handler(
    State(state): State<ApiState>,
    body: Bytes,
) -> Result<Json<WordOfTheDay>> {
    let slice = state
        .try_get_slice::<DailyWord>()
        .map_err(|e| DailyWordError::Internal { message: e.to_string().into(), context: None })?;
    let pipeline = slice.pipeline().ok_or(DailyWordError::MissingCredentials { context: None })?;

    // Content-Type is not enforced; only bytes that are not JSON at all are a server error.
    let body: Value = serde_json::from_slice(&body).context("Malformed request body")?;
    let request = WordRequest::from_json(body);

    let category = request.category()?;
    let excluded = request.exclusions();

    let word = pipeline.run(category, excluded).await.context(category.as_str())?;
    Ok(Json(word))
}
