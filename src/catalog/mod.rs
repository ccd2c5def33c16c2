//! Movie catalog backends
//!
//! The catalog lives behind a spreadsheet-style HTTP API (search, getAll,
//! add, edit, delete). A built-in demo backend keeps everything in memory.

use crate::config::Config;
use crate::core::normalize;
use crate::error::{ShelfError, ShelfResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub mod demo;
pub mod remote;

pub use demo::DemoCatalog;
pub use remote::RemoteCatalog;

/// API URL value that selects the in-memory demo backend
pub const DEMO_URL: &str = "demo";

/// Physical media a catalog entry is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Support {
    #[serde(rename = "Blu-Ray")]
    BluRay,
    #[serde(rename = "DVD")]
    Dvd,
    #[serde(rename = "LASERDISC")]
    LaserDisc,
    #[serde(rename = "à acheter")]
    ToBuy,
}

impl Support {
    /// All supports, in display order
    pub const ALL: [Support; 4] = [
        Support::BluRay,
        Support::Dvd,
        Support::LaserDisc,
        Support::ToBuy,
    ];

    /// Label used on the wire and in the spreadsheet
    pub fn as_str(&self) -> &'static str {
        match self {
            Support::BluRay => "Blu-Ray",
            Support::Dvd => "DVD",
            Support::LaserDisc => "LASERDISC",
            Support::ToBuy => "à acheter",
        }
    }
}

impl fmt::Display for Support {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Support {
    type Err = ShelfError;

    /// Accepts the wire label in any case/accent/punctuation form,
    /// plus a few shell-friendly aliases ("bluray", "to-buy").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        let support = match key.as_str() {
            "blu ray" | "bluray" | "br" => Support::BluRay,
            "dvd" => Support::Dvd,
            "laserdisc" | "laser disc" | "ld" => Support::LaserDisc,
            "a acheter" | "to buy" | "tobuy" | "wishlist" => Support::ToBuy,
            _ => return Err(ShelfError::UnknownSupport(s.to_string())),
        };
        Ok(support)
    }
}

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    pub support: Support,
    /// Row identifier, when the sheet provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Movie {
    pub fn new(title: impl Into<String>, support: Support) -> Self {
        Self {
            title: title.into(),
            support,
            id: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    Success,
    Error,
}

/// Envelope returned by every API action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: ApiStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Turn an `"error"` envelope into [`ShelfError::Backend`]
    pub fn into_result(self) -> ShelfResult<(Option<T>, Option<String>)> {
        match self.status {
            ApiStatus::Success => Ok((self.data, self.message)),
            ApiStatus::Error => Err(ShelfError::Backend(
                self.message
                    .unwrap_or_else(|| "unspecified backend error".to_string()),
            )),
        }
    }
}

/// Persistence collaborator for the catalog.
///
/// Mutations return the backend's informational message, if any.
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    /// Exact-match search performed by the backend
    async fn search(&self, query: &str) -> ShelfResult<Vec<Movie>>;

    /// Every record in the catalog
    async fn get_all(&self) -> ShelfResult<Vec<Movie>>;

    async fn add(&self, title: &str, support: Support) -> ShelfResult<Option<String>>;

    /// Rename the record identified by `old_title` and `support`
    async fn edit(
        &self,
        old_title: &str,
        new_title: &str,
        support: Support,
    ) -> ShelfResult<Option<String>>;

    /// Remove records identified by `title` and `support`
    async fn delete(&self, title: &str, support: Support) -> ShelfResult<Option<String>>;
}

/// Get the catalog backend based on configuration
pub fn open_backend(config: &Config) -> ShelfResult<Arc<dyn CatalogBackend>> {
    let url = config
        .api_url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or(ShelfError::NotConfigured)?;

    if url == DEMO_URL {
        info!("🎬 Using in-memory demo catalog");
        return Ok(Arc::new(DemoCatalog::with_sample_data(Duration::from_millis(
            config.demo_delay_ms,
        ))));
    }

    info!("🌐 Using remote catalog at {}", url);
    Ok(Arc::new(RemoteCatalog::new(
        url,
        Duration::from_secs(config.request_timeout_secs),
    )?))
}
