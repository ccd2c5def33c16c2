//! Barcode → product title lookup
//!
//! Scanned or typed UPC/EAN codes are resolved to a product name through a
//! public UPC database, then stripped of packaging noise ("[Blu-ray]",
//! "Collector Edition", quotes) so the result works as a search query.
//! Any failure simply means "no title found".

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Public UPC lookup endpoint (trial tier, rate limited)
pub const DEFAULT_LOOKUP_URL: &str = "https://api.upcitemdb.com/prod/trial/lookup";

lazy_static! {
    static ref QUOTES: Regex = Regex::new(r#"["«»]"#).expect("valid regex");
    static ref BRACKETED: Regex = Regex::new(r"\[.*?\]|\(.*?\)").expect("valid regex");
    static ref FORMAT_WORDS: Regex =
        Regex::new(r"(?i)Blu-ray|DVD|4K|Ultra HD|Edition|Collector").expect("valid regex");
    static ref SEPARATORS: Regex = Regex::new(r"[-:_]").expect("valid regex");
}

/// True for 8 to 14 ASCII digits (EAN-8 up to GTIN-14), ignoring surrounding whitespace
pub fn is_barcode(text: &str) -> bool {
    let code = text.trim();
    (8..=14).contains(&code.len()) && code.bytes().all(|b| b.is_ascii_digit())
}

/// Strip packaging noise from a product name
pub fn clean_product_title(raw: &str) -> String {
    let title = QUOTES.replace_all(raw, "");
    let title = BRACKETED.replace_all(&title, "");
    let title = FORMAT_WORDS.replace_all(title.trim(), "");
    let title = SEPARATORS.replace_all(title.trim(), " ");
    title.trim().to_string()
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    code: String,
    #[serde(default)]
    items: Vec<LookupItem>,
}

#[derive(Debug, Deserialize)]
struct LookupItem {
    #[serde(default)]
    title: String,
}

/// Extract the cleaned title of the first item of a lookup answer
pub fn parse_lookup_response(body: &str) -> Option<String> {
    let response: LookupResponse = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(e) => {
            debug!("Unreadable lookup response: {}", e);
            return None;
        }
    };

    if response.code != "OK" {
        debug!("Lookup answered code {}", response.code);
        return None;
    }

    let title = clean_product_title(&response.items.first()?.title);
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

/// Turns a numeric code into a better search query
#[async_trait]
pub trait TitleResolver: Send + Sync {
    async fn resolve_title(&self, code: &str) -> Option<String>;
}

pub struct BarcodeResolver {
    client: Client,
    lookup_url: String,
    proxy: Option<String>,
}

impl BarcodeResolver {
    /// `proxy` is a prefix the URL-encoded lookup URL is appended to
    /// (e.g. `https://corsproxy.io/?`).
    pub fn new(lookup_url: &str, proxy: Option<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("HTTP client setup failed, using defaults: {}", e);
                Client::new()
            });
        Self {
            client,
            lookup_url: lookup_url.to_string(),
            proxy: proxy.filter(|p| !p.trim().is_empty()),
        }
    }

    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(
            &config.barcode_lookup_url,
            config.cors_proxy.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn request_url(&self, code: &str) -> String {
        let target = format!("{}?upc={}", self.lookup_url, code.trim());
        match &self.proxy {
            Some(proxy) => format!("{}{}", proxy, urlencoding::encode(&target)),
            None => target,
        }
    }
}

#[async_trait]
impl TitleResolver for BarcodeResolver {
    async fn resolve_title(&self, code: &str) -> Option<String> {
        if !is_barcode(code) {
            debug!("'{}' is not a barcode, skipping lookup", code);
            return None;
        }

        let url = self.request_url(code);
        debug!("Barcode lookup: {}", url);

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("⚠️ Barcode lookup failed for {}: {}", code, e);
                return None;
            }
        };

        if !response.status().is_success() {
            warn!("⚠️ Barcode lookup for {} answered {}", code, response.status());
            return None;
        }

        let body = response.text().await.ok()?;
        let title = parse_lookup_response(&body);
        match &title {
            Some(t) => info!("🔎 Barcode {} → '{}'", code, t),
            None => info!("🔎 No product found for barcode {}", code),
        }
        title
    }
}
