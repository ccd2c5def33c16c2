//! Fuzzy title matching
//!
//! Decides whether a catalog title matches a free-form query. Two strategies
//! are OR-ed together:
//!
//! 1. Containment: one normalized string is a substring of the other
//!    ("Matrix" inside "The Matrix Reloaded").
//! 2. Token overlap: at least `threshold` of the catalog title's significant
//!    tokens appear somewhere in the query's significant tokens.
//!
//! The overlap ratio uses the catalog title's token count as denominator, so
//! a short catalog entry is easier to hit from a verbose query than the reverse.

use super::text_normalizer::normalize;
use super::tokenizer::{Tokenizer, DEFAULT_STOP_WORDS};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

/// Fraction of catalog-title tokens that must appear in the query (inclusive)
pub const DEFAULT_THRESHOLD: f64 = 0.5;

lazy_static! {
    static ref DEFAULT_MATCHER: FuzzyMatcher = FuzzyMatcher::default();
}

/// Tunable knobs of the matcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    #[serde(default = "default_stop_words")]
    pub stop_words: Vec<String>,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_stop_words() -> Vec<String> {
    DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect()
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

impl MatchConfig {
    /// Threshold actually applied.
    ///
    /// Only finite values in `(0, 1]` are meaningful: 0 or less would match
    /// any pair with tokens, above 1 disables the overlap strategy. Anything
    /// else falls back to [`DEFAULT_THRESHOLD`].
    pub fn effective_threshold(&self) -> f64 {
        if self.threshold.is_finite() && self.threshold > 0.0 && self.threshold <= 1.0 {
            self.threshold
        } else {
            warn!(
                "⚠️ Ignoring match threshold {} (must be in (0, 1]), using {}",
                self.threshold, DEFAULT_THRESHOLD
            );
            DEFAULT_THRESHOLD
        }
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            stop_words: default_stop_words(),
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Title matcher built from a [`MatchConfig`]
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyMatcher {
    tokenizer: Tokenizer,
    threshold: f64,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new(&MatchConfig::default())
    }
}

impl FuzzyMatcher {
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            tokenizer: Tokenizer::new(&config.stop_words),
            threshold: config.effective_threshold(),
        }
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Does `library_title` match `user_query`?
    pub fn is_match(&self, library_title: &str, user_query: &str) -> bool {
        self.contains_either_way(library_title, user_query)
            || self
                .token_overlap(library_title, user_query)
                .is_some_and(|ratio| ratio >= self.threshold)
    }

    /// Containment strategy on normalized forms.
    ///
    /// An empty normalized side only matches another empty side: the empty
    /// string is a substring of everything, which would turn a blank or
    /// punctuation-only query into a match-all.
    pub fn contains_either_way(&self, library_title: &str, user_query: &str) -> bool {
        let lib_norm = normalize(library_title);
        let query_norm = normalize(user_query);

        if lib_norm.is_empty() || query_norm.is_empty() {
            return lib_norm.is_empty() && query_norm.is_empty();
        }

        query_norm.contains(lib_norm.as_str()) || lib_norm.contains(query_norm.as_str())
    }

    /// Fraction of the library title's significant tokens present in the query.
    ///
    /// `None` when either side has no significant tokens; that is treated
    /// as no evidence rather than a match.
    pub fn token_overlap(&self, library_title: &str, user_query: &str) -> Option<f64> {
        let lib_tokens = self.tokenizer.significant_tokens(library_title);
        let query_tokens = self.tokenizer.significant_tokens(user_query);

        if lib_tokens.is_empty() || query_tokens.is_empty() {
            return None;
        }

        let query_set: HashSet<&str> = query_tokens.iter().map(String::as_str).collect();
        // Duplicate library tokens each count
        let matches = lib_tokens
            .iter()
            .filter(|t| query_set.contains(t.as_str()))
            .count();

        Some(matches as f64 / lib_tokens.len() as f64)
    }

    /// Keep the candidates matching `query`, in their original order
    pub fn filter<'a, T, F>(&self, candidates: &'a [T], query: &str, title_of: F) -> Vec<&'a T>
    where
        F: Fn(&T) -> &str,
    {
        candidates
            .iter()
            .filter(|c| self.is_match(title_of(c), query))
            .collect()
    }
}

/// Match using the default stop words and threshold
pub fn is_match(library_title: &str, user_query: &str) -> bool {
    DEFAULT_MATCHER.is_match(library_title, user_query)
}
