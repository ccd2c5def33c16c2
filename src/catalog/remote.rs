//! Remote catalog over the spreadsheet web API
//!
//! Every action is a GET on the configured script URL with the action name
//! and its arguments as query parameters, answered by an [`ApiResponse`]
//! JSON envelope.

use super::{ApiResponse, CatalogBackend, Movie, Support};
use crate::error::{ShelfError, ShelfResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

pub struct RemoteCatalog {
    client: Client,
    url: String,
}

impl RemoteCatalog {
    pub fn new(url: &str, timeout: Duration) -> ShelfResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.trim().to_string(),
        })
    }

    /// Build the request URL for an action.
    ///
    /// A `_=<epoch millis>` parameter is always appended so intermediaries
    /// never serve a cached answer.
    pub fn request_url(&self, params: &[(&str, &str)]) -> String {
        let mut url = self.url.clone();
        let mut sep = if url.contains('?') { '&' } else { '?' };

        for (key, value) in params {
            url.push(sep);
            url.push_str(&urlencoding::encode(key));
            url.push('=');
            url.push_str(&urlencoding::encode(value));
            sep = '&';
        }

        url.push(sep);
        url.push_str("_=");
        url.push_str(&chrono::Utc::now().timestamp_millis().to_string());
        url
    }

    async fn call<T: DeserializeOwned>(
        &self,
        params: &[(&str, &str)],
    ) -> ShelfResult<(Option<T>, Option<String>)> {
        let url = self.request_url(params);
        debug!("Catalog request: {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!("❌ Catalog unreachable: {}", e);
            ShelfError::Network(e.to_string())
        })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("❌ Catalog API error ({}): {}", status, body);
            return Err(ShelfError::Network(format!("HTTP {}", status)));
        }

        parse_response(&body)
    }
}

/// Decode an API envelope, mapping `"error"` to [`ShelfError::Backend`]
pub fn parse_response<T: DeserializeOwned>(
    body: &str,
) -> ShelfResult<(Option<T>, Option<String>)> {
    let envelope: ApiResponse<T> = serde_json::from_str(body)?;
    envelope.into_result()
}

#[async_trait]
impl CatalogBackend for RemoteCatalog {
    async fn search(&self, query: &str) -> ShelfResult<Vec<Movie>> {
        let (data, _) = self
            .call::<Vec<Movie>>(&[("action", "search"), ("query", query)])
            .await?;
        Ok(data.unwrap_or_default())
    }

    async fn get_all(&self) -> ShelfResult<Vec<Movie>> {
        let (data, _) = self.call::<Vec<Movie>>(&[("action", "getAll")]).await?;
        Ok(data.unwrap_or_default())
    }

    async fn add(&self, title: &str, support: Support) -> ShelfResult<Option<String>> {
        let (_, message) = self
            .call::<serde_json::Value>(&[
                ("action", "add"),
                ("title", title),
                ("support", support.as_str()),
            ])
            .await?;
        Ok(message)
    }

    async fn edit(
        &self,
        old_title: &str,
        new_title: &str,
        support: Support,
    ) -> ShelfResult<Option<String>> {
        let (_, message) = self
            .call::<serde_json::Value>(&[
                ("action", "edit"),
                ("oldTitle", old_title),
                ("newTitle", new_title),
                ("support", support.as_str()),
            ])
            .await?;
        Ok(message)
    }

    async fn delete(&self, title: &str, support: Support) -> ShelfResult<Option<String>> {
        let (_, message) = self
            .call::<serde_json::Value>(&[
                ("action", "delete"),
                ("title", title),
                ("support", support.as_str()),
            ])
            .await?;
        Ok(message)
    }
}
