//! Mock catalog backend for testing
//!
//! Serves a fixed record list and records every call it receives.

use async_trait::async_trait;
use movieshelf::catalog::{CatalogBackend, Movie, Support};
use movieshelf::error::{ShelfError, ShelfResult};
use std::sync::{Arc, Mutex};

/// Exact search answers are scripted; `get_all` returns `movies`
pub struct MockCatalog {
    pub movies: Vec<Movie>,
    /// Records returned by `search`, regardless of the query
    pub exact_hits: Vec<Movie>,
    /// Make `search` fail with a backend error
    pub fail_search: bool,
    /// Make `get_all` fail with a network error
    pub fail_get_all: bool,
    /// Every call, e.g. `search:blade runner` or `get_all`
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockCatalog {
    pub fn new(movies: Vec<Movie>) -> Self {
        Self {
            movies,
            exact_hits: Vec::new(),
            fail_search: false,
            fail_get_all: false,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl CatalogBackend for MockCatalog {
    async fn search(&self, query: &str) -> ShelfResult<Vec<Movie>> {
        self.record(format!("search:{}", query));
        if self.fail_search {
            return Err(ShelfError::Backend("search unavailable".to_string()));
        }
        Ok(self.exact_hits.clone())
    }

    async fn get_all(&self) -> ShelfResult<Vec<Movie>> {
        self.record("get_all".to_string());
        if self.fail_get_all {
            return Err(ShelfError::Network("connection reset".to_string()));
        }
        Ok(self.movies.clone())
    }

    async fn add(&self, title: &str, support: Support) -> ShelfResult<Option<String>> {
        self.record(format!("add:{}:{}", title, support));
        Ok(None)
    }

    async fn edit(
        &self,
        old_title: &str,
        new_title: &str,
        support: Support,
    ) -> ShelfResult<Option<String>> {
        self.record(format!("edit:{}:{}:{}", old_title, new_title, support));
        Ok(None)
    }

    async fn delete(&self, title: &str, support: Support) -> ShelfResult<Option<String>> {
        self.record(format!("delete:{}:{}", title, support));
        Ok(None)
    }
}
