//! MovieShelf Error Types
//!
//! Centralized error handling for the catalog layer.
//! The matching core is total and never produces one of these.

use thiserror::Error;

/// Central error type for MovieShelf
#[derive(Error, Debug)]
pub enum ShelfError {
    #[error("API URL not configured")]
    NotConfigured,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Unknown support '{0}' (expected Blu-Ray, DVD, LASERDISC or à acheter)")]
    UnknownSupport(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for MovieShelf operations
pub type ShelfResult<T> = Result<T, ShelfError>;

/// Transport-level failures all surface as `Network`
impl From<reqwest::Error> for ShelfError {
    fn from(err: reqwest::Error) -> Self {
        ShelfError::Network(err.to_string())
    }
}
