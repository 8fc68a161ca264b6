use std::borrow::Cow;

/// Errors of the daily word slice.
///
/// Only [`DailyWordError::MissingCredentials`], [`DailyWordError::InvalidCategory`] and
/// [`DailyWordError::Exhausted`] reach players with their own message; everything else is
/// reported as a generic internal error.
#[derive(Debug, thiserror::Error)]
pub enum DailyWordError {
    /// No bearer credential for the upstream APIs.
    #[error("Upstream credentials missing{}", format_context(.context))]
    MissingCredentials { context: Option<Cow<'static, str>> },

    /// The request named no category or an unknown one.
    #[error("Invalid category{}: {message}", format_context(.context))]
    InvalidCategory { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Every attempt ended without a verified candidate.
    #[error("No verified word after {attempts} attempts{}", format_context(.context))]
    Exhausted { attempts: u8, context: Option<Cow<'static, str>> },

    /// Network or protocol failure talking to an upstream.
    #[error("Upstream transport error{}: {source}", format_context(.context))]
    Transport { source: reqwest::Error, context: Option<Cow<'static, str>> },

    /// An upstream answered with a non-success status.
    #[error("Upstream {service} returned HTTP {status}{}: {message}", format_context(.context))]
    UpstreamStatus {
        service: &'static str,
        status: u16,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// JSON could not be decoded.
    #[error("JSON decode error{}: {source}", format_context(.context))]
    Decode { source: serde_json::Error, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal daily word error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}

pub type Result<T> = std::result::Result<T, DailyWordError>;

pub trait DailyWordErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T>;
}

impl<T> DailyWordErrorExt<T> for Result<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut e| {
            match &mut e {
                DailyWordError::MissingCredentials { context: c }
                | DailyWordError::InvalidCategory { context: c, .. }
                | DailyWordError::Exhausted { context: c, .. }
                | DailyWordError::Transport { context: c, .. }
                | DailyWordError::UpstreamStatus { context: c, .. }
                | DailyWordError::Decode { context: c, .. }
                | DailyWordError::Internal { context: c, .. } => *c = Some(context.into()),
            }
            e
        })
    }
}

impl<T> DailyWordErrorExt<T> for std::result::Result<T, reqwest::Error> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T> {
        self.map_err(|source| DailyWordError::Transport { source, context: Some(context.into()) })
    }
}

impl<T> DailyWordErrorExt<T> for std::result::Result<T, serde_json::Error> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T> {
        self.map_err(|source| DailyWordError::Decode { source, context: Some(context.into()) })
    }
}

#[cfg(feature = "server")]
mod response {
    use super::DailyWordError;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use shiok_kernel::server::error_response;

    pub const MISSING_KEY_MESSAGE: &str = "API key not configured";
    pub const INVALID_CATEGORY_MESSAGE: &str = "Invalid category";
    pub const EXHAUSTED_MESSAGE: &str =
        "Unable to find a verified word right now. Please try again.";
    pub const INTERNAL_MESSAGE: &str = "Internal server error";

    impl DailyWordError {
        #[must_use]
        pub const fn status(&self) -> StatusCode {
            match self {
                Self::InvalidCategory { .. } => StatusCode::BAD_REQUEST,
                Self::Exhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }

        /// Message safe to show to players.
        #[must_use]
        pub const fn public_message(&self) -> &'static str {
            match self {
                Self::MissingCredentials { .. } => MISSING_KEY_MESSAGE,
                Self::InvalidCategory { .. } => INVALID_CATEGORY_MESSAGE,
                Self::Exhausted { .. } => EXHAUSTED_MESSAGE,
                _ => INTERNAL_MESSAGE,
            }
        }
    }

    impl IntoResponse for DailyWordError {
        fn into_response(self) -> Response {
            let status = self.status();
            match &self {
                Self::InvalidCategory { .. } | Self::Exhausted { .. } => {
                    tracing::warn!(error = %self, "Daily word request rejected");
                },
                _ => tracing::error!(error = %self, "Daily word request failed"),
            }
            error_response(status, self.public_message())
        }
    }
}

#[cfg(feature = "server")]
pub use response::{EXHAUSTED_MESSAGE, INTERNAL_MESSAGE, INVALID_CATEGORY_MESSAGE, MISSING_KEY_MESSAGE};
