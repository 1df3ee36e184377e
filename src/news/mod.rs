//! News retrieval – the GDELT DOC client and an in-memory source.

pub mod gdelt;

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;

#[cfg(test)]
use crate::utils::error::Error;
use crate::utils::error::Result;
use crate::utils::types::Article;

pub use gdelt::GdeltSource;

/// Anything that can return recent articles about a currency.
///
/// Failures are returned as-is; callers must not paper over them with an empty
/// batch, since that would read as "no news" rather than "fetch failed".
#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn fetch_articles(&self, currency: &str, timespan: &str) -> Result<Vec<Article>>;
}

/// Fixed articles per currency code. Used for offline runs and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    batches: HashMap<String, Vec<Article>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_articles(mut self, currency: &str, articles: Vec<Article>) -> Self {
        self.batches.insert(currency.to_uppercase(), articles);
        self
    }

    /// Load `{"EUR": [article, ...], "USD": [...]}` from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let raw: HashMap<String, Vec<Article>> = serde_json::from_str(&content)?;
        let batches = raw.into_iter().map(|(k, v)| (k.to_uppercase(), v)).collect();
        Ok(Self { batches })
    }
}

#[async_trait]
impl NewsSource for StaticSource {
    async fn fetch_articles(&self, currency: &str, _timespan: &str) -> Result<Vec<Article>> {
        Ok(self.batches.get(&currency.to_uppercase()).cloned().unwrap_or_default())
    }
}

/// A source that always fails.
#[cfg(test)]
#[derive(Debug, Clone)]
pub(crate) struct FailingSource {
    pub message: String,
}

#[cfg(test)]
#[async_trait]
impl NewsSource for FailingSource {
    async fn fetch_articles(&self, _currency: &str, _timespan: &str) -> Result<Vec<Article>> {
        Err(Error::RetrievalError(self.message.clone()))
    }
}
