use crate::barcode::DEFAULT_LOOKUP_URL;
use crate::core::MatchConfig;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Catalog
    /// Spreadsheet script URL, or `demo` for the in-memory catalog
    pub api_url: Option<String>,
    pub request_timeout_secs: u64,
    pub demo_delay_ms: u64,

    // Barcode lookup
    pub barcode_lookup_url: String,
    /// Prefix prepended to the URL-encoded lookup URL, e.g. `https://corsproxy.io/?`
    pub cors_proxy: Option<String>,

    // Matching
    pub matching: MatchConfig,

    // Meta
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: None,
            request_timeout_secs: 10,
            demo_delay_ms: 800,
            barcode_lookup_url: DEFAULT_LOOKUP_URL.to_string(),
            cors_proxy: None,
            matching: MatchConfig::default(),
            log_level: "INFO".to_string(),
        }
    }
}

impl Config {
    /// Load config from the default location, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    /// Load config from `path`.
    ///
    /// A missing file yields defaults. A corrupt file is moved aside to
    /// `*.json.corrupt` and defaults are used.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        match serde_json::from_str(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::warn!("⚠️ Config file corrupted or invalid, using defaults: {}", e);
                let backup_path = path.with_extension("json.corrupt");
                if let Err(e) = std::fs::rename(path, &backup_path) {
                    tracing::warn!("Could not back up corrupt config: {}", e);
                }
                Ok(Self::default())
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Set the catalog API URL; a blank value clears it
    pub fn set_api_url(&mut self, url: &str) {
        let url = url.trim();
        self.api_url = if url.is_empty() {
            None
        } else {
            Some(url.to_string())
        };
    }
}

pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("movieshelf")
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}
