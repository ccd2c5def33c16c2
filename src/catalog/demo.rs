//! In-memory demo catalog
//!
//! Selected when the API URL is `demo`. Mimics the remote API, including a
//! short artificial latency, so the whole flow can be tried without a sheet.

use super::{CatalogBackend, Movie, Support};
use crate::error::ShelfResult;
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

/// Latency applied to every demo call unless configured otherwise
pub const DEFAULT_DEMO_DELAY: Duration = Duration::from_millis(800);

pub struct DemoCatalog {
    movies: RwLock<Vec<Movie>>,
    delay: Duration,
}

impl DemoCatalog {
    pub fn new(movies: Vec<Movie>, delay: Duration) -> Self {
        Self {
            movies: RwLock::new(movies),
            delay,
        }
    }

    /// Demo catalog seeded with a handful of well-known titles
    pub fn with_sample_data(delay: Duration) -> Self {
        Self::new(sample_movies(), delay)
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

pub fn sample_movies() -> Vec<Movie> {
    vec![
        Movie::new("Titanic", Support::LaserDisc),
        Movie::new("Avatar", Support::BluRay),
        Movie::new("Dune: Part Two", Support::BluRay),
        Movie::new("Inception", Support::Dvd),
        Movie::new("The Matrix", Support::BluRay),
        Movie::new("Interstellar", Support::ToBuy),
        Movie::new("Blade Runner 2049", Support::BluRay),
        Movie::new("Pulp Fiction", Support::Dvd),
    ]
}

#[async_trait]
impl CatalogBackend for DemoCatalog {
    /// Case-insensitive substring search on titles
    async fn search(&self, query: &str) -> ShelfResult<Vec<Movie>> {
        let q = query.to_lowercase();
        let results: Vec<Movie> = self
            .movies
            .read()
            .await
            .iter()
            .filter(|m| m.title.to_lowercase().contains(&q))
            .cloned()
            .collect();
        debug!("Demo search '{}': {} hits", query, results.len());
        self.simulate_latency().await;
        Ok(results)
    }

    async fn get_all(&self) -> ShelfResult<Vec<Movie>> {
        let all = self.movies.read().await.clone();
        self.simulate_latency().await;
        Ok(all)
    }

    async fn add(&self, title: &str, support: Support) -> ShelfResult<Option<String>> {
        self.movies.write().await.push(Movie::new(title, support));
        self.simulate_latency().await;
        Ok(Some("Added in demo mode".to_string()))
    }

    /// Renames the first record with the same title and support; a missing
    /// record is not an error.
    async fn edit(
        &self,
        old_title: &str,
        new_title: &str,
        support: Support,
    ) -> ShelfResult<Option<String>> {
        {
            let mut movies = self.movies.write().await;
            if let Some(movie) = movies
                .iter_mut()
                .find(|m| m.title == old_title && m.support == support)
            {
                movie.title = new_title.to_string();
            } else {
                debug!("Demo edit: no '{}' on {}", old_title, support);
            }
        }
        self.simulate_latency().await;
        Ok(Some("Updated in demo mode".to_string()))
    }

    async fn delete(&self, title: &str, support: Support) -> ShelfResult<Option<String>> {
        self.movies
            .write()
            .await
            .retain(|m| !(m.title == title && m.support == support));
        self.simulate_latency().await;
        Ok(Some("Deleted in demo mode".to_string()))
    }
}
