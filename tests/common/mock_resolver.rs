//! Mock barcode resolver for testing

use async_trait::async_trait;
use movieshelf::barcode::TitleResolver;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Resolves codes from a fixed table; unknown codes resolve to nothing
pub struct MockResolver {
    titles: HashMap<String, String>,
    pub lookups: Arc<Mutex<Vec<String>>>,
}

impl MockResolver {
    pub fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            titles: entries
                .iter()
                .map(|(code, title)| (code.to_string(), title.to_string()))
                .collect(),
            lookups: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl TitleResolver for MockResolver {
    async fn resolve_title(&self, code: &str) -> Option<String> {
        self.lookups.lock().unwrap().push(code.to_string());
        self.titles.get(code).cloned()
    }
}
