//! Candidate generation: prompt construction, the chat call and output validation.

use crate::client::{ChatCompletion, ChatMessage, ChatRequest};
use crate::extract::extract_json_object;
use regex::Regex;
use shiok_domain::category::Category;
use shiok_domain::config::GenerationConfig;
use shiok_domain::constants::{
    DEFAULT_EMOJI, DEFAULT_HINT, MAX_WORD_LEN, MIN_WORD_LEN, PROMPT_EXCLUSION_PREVIEW,
};
use shiok_domain::word::{Candidate, ExclusionSet};
use shiok_kernel::safe_nanoid;
use std::sync::{Arc, LazyLock};
use tracing::{debug, warn};

static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^[A-Za-z]{{{MIN_WORD_LEN},{MAX_WORD_LEN}}}$"))
        .expect("word pattern is a valid regex")
});

/// Length of the per-call random seed embedded into the user prompt.
const SEED_LEN: usize = 8;

/// Asks the text-generation API for one candidate word.
#[derive(Debug, Clone)]
pub struct Generator {
    client: Arc<dyn ChatCompletion>,
    settings: GenerationConfig,
}

impl Generator {
    pub fn new(client: Arc<dyn ChatCompletion>, settings: GenerationConfig) -> Self {
        Self { client, settings }
    }

    /// Produces at most one candidate for `category`.
    ///
    /// Every failure (transport, status, missing or malformed JSON, bad word) is logged and
    /// collapses to `None`; the caller decides whether to try again.
    pub async fn generate(&self, category: Category, excluded: &ExclusionSet) -> Option<Candidate> {
        let seed = safe_nanoid!(SEED_LEN);
        let request = self.request(category, excluded, &seed);

        let text = match self.client.complete(&request).await {
            Ok(text) => text,
            Err(e) => {
                warn!(%category, error = %e, "Generation call failed");
                return None;
            },
        };

        let candidate = parse_candidate(&text);
        match &candidate {
            Some(candidate) => debug!(%category, word = %candidate.word, "Generated candidate"),
            None => warn!(%category, output = %text, "Generation output rejected"),
        }
        candidate
    }

    /// Builds the two-turn conversation for one attempt.
    #[must_use]
    pub fn request(&self, category: Category, excluded: &ExclusionSet, seed: &str) -> ChatRequest {
        ChatRequest {
            model: self.settings.model.clone(),
            messages: vec![
                ChatMessage::system(system_prompt(category, excluded)),
                ChatMessage::user(user_prompt(category, seed)),
            ],
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        }
    }
}

#[must_use]
pub fn system_prompt(category: Category, excluded: &ExclusionSet) -> String {
    let profile = category.profile();
    let avoid = if excluded.is_empty() {
        String::new()
    } else {
        let preview: Vec<&str> = excluded.iter().take(PROMPT_EXCLUSION_PREVIEW).collect();
        format!("6. Do NOT use any of these words: {}\n", preview.join(", "))
    };

    format!(
        "You are a fun Singapore culture expert creating a Wordle-style guessing game. Be creative \
         and pick interesting words!\n\n\
         RULES:\n\
         1. Word length must be {MIN_WORD_LEN}-{MAX_WORD_LEN} letters\n\
         2. The word must relate to: {description}\n\
         3. Pick words that are FUN to guess - well-known to Singaporeans and tourists alike\n\
         4. Use ONLY LETTERS (A-Z), no spaces, hyphens, digits, or special characters\n\
         5. For multi-word concepts, pick just ONE key word (e.g., \"KAYA\" not \"KAYA TOAST\")\n\
         {avoid}\n\
         Example words for inspiration: {examples}\n\n\
         Respond ONLY in this exact JSON format:\n\
         {{\"word\": \"WORD\", \"hint\": \"A fun clue (max 12 words)\", \"emoji\": \"relevant emoji\"}}",
        description = profile.description,
        examples = profile.examples.join(", "),
    )
}

#[must_use]
pub fn user_prompt(category: Category, seed: &str) -> String {
    format!(
        "Generate a unique Singapore {subject} word for a guessing game! Random seed: {seed}\n\n\
         Pick something fresh, recognizable and exciting - could be short ({MIN_WORD_LEN}-4 \
         letters) or longer (7-{MAX_WORD_LEN} letters). Avoid overused words. Think of:\n\
         - Lesser known but recognizable terms\n\
         - Fun-to-guess words with interesting backstories\n\
         - Words that make players go \"oooh I know this!\"\n\n\
         Surprise me!",
        subject = category.profile().subject,
    )
}

/// Turns raw model output into a candidate, or `None` if it does not qualify.
#[must_use]
pub fn parse_candidate(text: &str) -> Option<Candidate> {
    let object = extract_json_object(text)?;

    let word = object.get("word")?.as_str()?.trim();
    if !WORD_PATTERN.is_match(word) {
        return None;
    }

    let text_field = |key: &str, fallback: &str| {
        object
            .get(key)
            .and_then(|value| value.as_str())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(fallback)
            .to_owned()
    };

    Some(Candidate {
        word: word.to_ascii_uppercase(),
        hint: text_field("hint", DEFAULT_HINT),
        emoji: text_field("emoji", DEFAULT_EMOJI),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_uppercases_word() {
        let candidate =
            parse_candidate(r#"{"word": " laksa ", "hint": "Spicy noodle soup", "emoji": "🍜"}"#)
                .unwrap();
        assert_eq!(candidate.word, "LAKSA");
        assert_eq!(candidate.hint, "Spicy noodle soup");
        assert_eq!(candidate.emoji, "🍜");
    }

    #[test]
    fn missing_hint_and_emoji_fall_back() {
        let candidate = parse_candidate(r#"{"word": "SHIOK", "hint": "  "}"#).unwrap();
        assert_eq!(candidate.hint, DEFAULT_HINT);
        assert_eq!(candidate.emoji, DEFAULT_EMOJI);
    }

    #[test]
    fn rejects_words_outside_the_format() {
        for bad in ["SH10K", "MY", "CHARKWAYTEOW", "KAYA TOAST", "BAK-KUT", "CAFÉ", ""] {
            let text = format!(r#"{{"word": "{bad}"}}"#);
            assert!(parse_candidate(&text).is_none(), "{bad} should be rejected");
        }
    }

    #[test]
    fn accepts_length_bounds() {
        assert_eq!(parse_candidate(r#"{"word": "mrt"}"#).unwrap().word, "MRT");
        assert_eq!(parse_candidate(r#"{"word": "Esplanades"}"#).unwrap().word, "ESPLANADES");
    }

    #[test]
    fn rejects_non_string_or_missing_word() {
        assert!(parse_candidate(r#"{"word": 12345}"#).is_none());
        assert!(parse_candidate(r#"{"hint": "no word"}"#).is_none());
        assert!(parse_candidate("I could not think of one").is_none());
    }

    #[test]
    fn system_prompt_previews_at_most_twenty_exclusions() {
        let words: Vec<String> = (0..30).map(|i| format!("WORD{i:02}")).collect();
        let excluded = ExclusionSet::from_caller(&words);
        let prompt = system_prompt(Category::Food, &excluded);

        assert!(prompt.contains("WORD00"));
        assert!(prompt.contains("WORD19"));
        assert!(!prompt.contains("WORD20"));
        assert!(prompt.contains("LAKSA"));
        assert!(prompt.contains("hawker dishes"));
    }

    #[test]
    fn system_prompt_omits_avoid_rule_when_nothing_is_excluded() {
        let prompt = system_prompt(Category::Places, &ExclusionSet::new());
        assert!(!prompt.contains("Do NOT use"));
        assert!(prompt.contains("SENTOSA"));
    }

    #[test]
    fn user_prompt_carries_seed_and_subject() {
        let prompt = user_prompt(Category::All, "abc123");
        assert!(prompt.contains("abc123"));
        assert!(prompt.contains("Singapore culture word"));
    }
}
