//! The generate → check → verify loop behind the daily word route.

use crate::error::{DailyWordError, Result};
use crate::generator::Generator;
use crate::verifier::Verifier;
use serde::Serialize;
use shiok_domain::category::Category;
use shiok_domain::word::{Candidate, ExclusionSet};
use tracing::{info, warn};

/// An accepted, verified word annotated with its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct WordOfTheDay {
    /// 3-10 uppercase letters.
    #[cfg_attr(feature = "server", schema(example = "LAKSA"))]
    pub word: String,
    #[cfg_attr(feature = "server", schema(example = "Spicy coconut noodle soup"))]
    pub hint: String,
    #[cfg_attr(feature = "server", schema(example = "🍜"))]
    pub emoji: String,
    #[cfg_attr(feature = "server", schema(value_type = String, example = "food"))]
    pub category: Category,
}

impl WordOfTheDay {
    #[must_use]
    pub fn new(candidate: Candidate, category: Category) -> Self {
        Self { word: candidate.word, hint: candidate.hint, emoji: candidate.emoji, category }
    }
}

/// Bounded retry loop over a [`Generator`] and a [`Verifier`].
///
/// Attempts run strictly one after another; the first verified candidate wins.
#[derive(Debug, Clone)]
pub struct Pipeline {
    generator: Generator,
    verifier: Verifier,
    max_attempts: u8,
}

impl Pipeline {
    pub fn new(generator: Generator, verifier: Verifier, max_attempts: u8) -> Self {
        Self { generator, verifier, max_attempts: max_attempts.max(1) }
    }

    #[must_use]
    pub const fn max_attempts(&self) -> u8 {
        self.max_attempts
    }

    /// Runs attempts until a candidate is verified or the ceiling is reached.
    ///
    /// Words that fail verification are added to `excluded` so they are not offered again
    /// within this run. Duplicates of excluded words are skipped without a search.
    ///
    /// # Errors
    /// Returns [`DailyWordError::Exhausted`] when every attempt failed.
    pub async fn run(&self, category: Category, mut excluded: ExclusionSet) -> Result<WordOfTheDay> {
        for attempt in 1..=self.max_attempts {
            let Some(candidate) = self.generator.generate(category, &excluded).await else {
                warn!(%category, attempt, "No usable candidate generated");
                continue;
            };

            if excluded.contains(&candidate.word) {
                info!(%category, attempt, word = %candidate.word, "Candidate already excluded");
                continue;
            }

            if !self.verifier.verify(&candidate.word, category).await {
                warn!(%category, attempt, word = %candidate.word, "Candidate failed verification");
                excluded.insert(&candidate.word);
                continue;
            }

            info!(%category, attempt, word = %candidate.word, "Candidate verified");
            return Ok(WordOfTheDay::new(candidate, category));
        }

        Err(DailyWordError::Exhausted { attempts: self.max_attempts, context: None })
    }
}
