//! Candidate words and the request-scoped exclusion set.

use crate::constants::MAX_CALLER_EXCLUSIONS;
use fxhash::FxHashSet;
use serde::{Deserialize, Serialize};

/// A proposed secret word.
///
/// Produced by the generator with `word` already uppercased and validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub word: String,
    pub hint: String,
    pub emoji: String,
}

/// Words that must not be offered for the current request.
///
/// Entries are stored trimmed and uppercased, so `"laksa"`, `" Laksa "` and
/// `"LAKSA"` all block the same word. Insertion order is preserved for prompt
/// previews.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    ordered: Vec<String>,
    members: FxHashSet<String>,
}

impl ExclusionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the set from caller-supplied entries.
    ///
    /// Blank entries are skipped and duplicates collapse; at most
    /// [`MAX_CALLER_EXCLUSIONS`] distinct words are kept.
    pub fn from_caller<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for entry in entries {
            if set.len() >= MAX_CALLER_EXCLUSIONS {
                break;
            }
            set.insert(entry.as_ref());
        }
        set
    }

    /// Canonical form of an entry, or `None` when it is blank.
    #[must_use]
    pub fn normalize(word: &str) -> Option<String> {
        let trimmed = word.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_uppercase())
    }

    /// Adds a word. Returns `false` if it was blank or already present.
    pub fn insert(&mut self, word: &str) -> bool {
        let Some(word) = Self::normalize(word) else {
            return false;
        };
        if !self.members.insert(word.clone()) {
            return false;
        }
        self.ordered.push(word);
        true
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        Self::normalize(word).is_some_and(|word| self.members.contains(&word))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(String::as_str)
    }
}
