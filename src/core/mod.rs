//! Core matching modules
//!
//! Contains the text normalization, tokenization and fuzzy title
//! matching used to reconcile user queries against catalog titles.

pub mod matcher;
pub mod text_normalizer;
pub mod tokenizer;

pub use matcher::{is_match, FuzzyMatcher, MatchConfig, DEFAULT_THRESHOLD};
pub use text_normalizer::normalize;
pub use tokenizer::{significant_tokens, Tokenizer, DEFAULT_STOP_WORDS};
