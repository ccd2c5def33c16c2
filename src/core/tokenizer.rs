//! Significant-token extraction
//!
//! Splits normalized text into the words that carry meaning for title
//! comparison, dropping one-letter tokens and French/English stop words.

use super::text_normalizer::normalize;
use lazy_static::lazy_static;
use std::collections::BTreeSet;
use tracing::warn;

/// Articles, prepositions and conjunctions ignored when comparing titles
pub const DEFAULT_STOP_WORDS: [&str; 19] = [
    "le", "la", "les", "un", "une", "des", "du", "de", "et", "ou", // French
    "the", "a", "an", "and", "of", "in", "on", "at", "to", // English
];

lazy_static! {
    static ref DEFAULT_TOKENIZER: Tokenizer = Tokenizer::default();
}

/// Extracts significant tokens using a fixed stop-word set
#[derive(Debug, Clone, PartialEq)]
pub struct Tokenizer {
    stop_words: BTreeSet<String>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(DEFAULT_STOP_WORDS)
    }
}

impl Tokenizer {
    /// Create a tokenizer with a custom stop-word set.
    ///
    /// Stop words are normalized on the way in so they compare against
    /// normalized tokens ("Les" and "les" are the same entry). An entry that
    /// normalizes to several words ("d'or", "part two") contributes each word.
    pub fn new<I, S>(stop_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for entry in stop_words {
            let entry = entry.as_ref();
            let normalized = normalize(entry);
            if normalized.contains(' ') {
                warn!(
                    "Stop word '{}' spans several words, using each of: {}",
                    entry, normalized
                );
            }
            set.extend(normalized.split(' ').filter(|w| !w.is_empty()).map(str::to_string));
        }
        Self { stop_words: set }
    }

    /// Check membership against an already-normalized token
    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }

    pub fn stop_words(&self) -> impl Iterator<Item = &str> {
        self.stop_words.iter().map(String::as_str)
    }

    /// Normalize `text` and keep tokens longer than one char that are not stop words.
    ///
    /// Order is preserved and duplicates are kept.
    pub fn significant_tokens(&self, text: &str) -> Vec<String> {
        normalize(text)
            .split(' ')
            .filter(|t| t.len() > 1 && !self.is_stop_word(t))
            .map(str::to_string)
            .collect()
    }
}

/// Significant tokens using the default stop words
pub fn significant_tokens(text: &str) -> Vec<String> {
    DEFAULT_TOKENIZER.significant_tokens(text)
}
