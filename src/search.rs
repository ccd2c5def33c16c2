//! Catalog search flow
//!
//! 1. A query that looks like a barcode is first turned into a product title.
//! 2. The backend's exact search runs with the resulting term.
//! 3. When that finds nothing, the whole catalog is fetched and filtered
//!    locally with the fuzzy matcher.

use crate::barcode::{is_barcode, TitleResolver};
use crate::catalog::{CatalogBackend, Movie, Support};
use crate::core::{normalize, FuzzyMatcher};
use crate::error::ShelfResult;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of [`SearchService::search`]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchOutcome {
    /// Term actually searched (the product title when a barcode resolved)
    pub term: String,
    pub movies: Vec<Movie>,
    /// Results come from the local fuzzy filter rather than the backend search
    pub fuzzy_fallback: bool,
    /// Barcode that was resolved into `term`, if any
    pub barcode: Option<String>,
}

pub struct SearchService {
    backend: Arc<dyn CatalogBackend>,
    resolver: Option<Arc<dyn TitleResolver>>,
    matcher: FuzzyMatcher,
}

impl SearchService {
    pub fn new(backend: Arc<dyn CatalogBackend>, matcher: FuzzyMatcher) -> Self {
        Self {
            backend,
            resolver: None,
            matcher,
        }
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn TitleResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn matcher(&self) -> &FuzzyMatcher {
        &self.matcher
    }

    /// Search the catalog for `query`.
    ///
    /// A failing exact search is logged and treated as empty so the fuzzy
    /// fallback still runs; a failing full listing is returned as an error.
    pub async fn search(&self, query: &str) -> ShelfResult<SearchOutcome> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(SearchOutcome::default());
        }

        let mut outcome = SearchOutcome {
            term: query.to_string(),
            ..SearchOutcome::default()
        };

        if is_barcode(query) {
            if let Some(resolver) = &self.resolver {
                if let Some(title) = resolver.resolve_title(query).await {
                    info!("📦 Barcode {} resolved to '{}'", query, title);
                    outcome.barcode = Some(query.to_string());
                    outcome.term = title;
                }
            }
        }

        let exact = match self.backend.search(&outcome.term).await {
            Ok(movies) => movies,
            Err(e) => {
                warn!("⚠️ Exact search failed, trying fuzzy fallback: {}", e);
                Vec::new()
            }
        };

        if !exact.is_empty() {
            debug!("Exact search '{}': {} hits", outcome.term, exact.len());
            outcome.movies = exact;
            return Ok(outcome);
        }

        let all = self.backend.get_all().await?;
        outcome.movies = all
            .into_iter()
            .filter(|m| self.matcher.is_match(&m.title, &outcome.term))
            .collect();
        outcome.fuzzy_fallback = true;
        debug!(
            "Fuzzy fallback '{}': {} hits",
            outcome.term,
            outcome.movies.len()
        );

        Ok(outcome)
    }

    /// Fetch the catalog and filter it with [`filter_library`]
    pub async fn library(
        &self,
        support: Option<Support>,
        filter: Option<&str>,
    ) -> ShelfResult<Vec<Movie>> {
        let all = self.backend.get_all().await?;
        Ok(filter_library(&all, support, filter, &self.matcher))
    }
}

/// Title ordering: accent/case/punctuation-insensitive, ties broken on the raw title
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    normalize(a).cmp(&normalize(b)).then_with(|| a.cmp(b))
}

/// Keep movies of `support` (all when `None`) whose title matches `filter`
/// (all when absent or blank), sorted by title.
pub fn filter_library(
    movies: &[Movie],
    support: Option<Support>,
    filter: Option<&str>,
    matcher: &FuzzyMatcher,
) -> Vec<Movie> {
    let filter = filter.map(str::trim).filter(|f| !f.is_empty());

    let mut kept: Vec<Movie> = movies
        .iter()
        .filter(|m| support.map_or(true, |s| m.support == s))
        .filter(|m| filter.map_or(true, |f| matcher.is_match(&m.title, f)))
        .cloned()
        .collect();

    kept.sort_by(|a, b| compare_titles(&a.title, &b.title));
    kept
}
