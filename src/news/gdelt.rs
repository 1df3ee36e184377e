//! GDELT DOC 2.0 `artlist` client.

use async_trait::async_trait;
use metrics::histogram;
use serde_json::Value;
use std::time::{Duration, Instant};
use url::Url;

use super::NewsSource;
use crate::config::NewsConfig;
use crate::sentiment::query::QueryBuilder;
use crate::utils::error::{Error, Result};
use crate::utils::types::Article;

/// Characters of an upstream body quoted in error messages.
const SNIPPET_CHARS: usize = 200;

#[derive(Debug, Clone)]
pub struct GdeltSource {
    client: reqwest::Client,
    endpoint: Url,
    query: QueryBuilder,
    max_records: u32,
    sort: String,
}

impl GdeltSource {
    pub fn new(cfg: &NewsConfig, query: QueryBuilder) -> Result<Self> {
        let endpoint = Url::parse(&cfg.endpoint)
            .map_err(|e| Error::ConfigError(format!("invalid news endpoint '{}': {}", cfg.endpoint, e)))?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .user_agent(concat!("fxsentiment/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, endpoint, query, max_records: cfg.max_records, sort: cfg.sort.clone() })
    }

    /// Full request URL for one currency.
    pub fn request_url(&self, currency: &str, timespan: &str) -> Url {
        let query = self.query.currency_query(currency);
        let max_records = self.max_records.to_string();
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("query", &query)
            .append_pair("mode", "artlist")
            .append_pair("format", "json")
            .append_pair("timespan", timespan)
            .append_pair("maxrecords", &max_records)
            .append_pair("sort", &self.sort);
        url
    }
}

#[async_trait]
impl NewsSource for GdeltSource {
    async fn fetch_articles(&self, currency: &str, timespan: &str) -> Result<Vec<Article>> {
        let url = self.request_url(currency, timespan);
        log::debug!("GDELT request for {}: {}", currency, url);

        let start = Instant::now();
        let resp = self.client.get(url).send().await;
        histogram!("gdelt_fetch_ms", start.elapsed().as_millis() as f64);

        let resp = resp.map_err(|e| Error::RetrievalError(format!("GDELT request failed: {}", e)))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| Error::RetrievalError(format!("GDELT body read failed: {}", e)))?;

        if !status.is_success() {
            return Err(Error::RetrievalError(format!(
                "GDELT HTTP {}: {}",
                status.as_u16(),
                snippet(&body)
            )));
        }

        let articles = parse_articles(&body)?;
        log::info!("GDELT returned {} articles for {} ({})", articles.len(), currency, timespan);
        Ok(articles)
    }
}

/// Decode an `artlist` JSON body.
///
/// A body with no `articles` array is an empty batch. Items that do not decode
/// as articles are dropped individually.
pub fn parse_articles(body: &str) -> Result<Vec<Article>> {
    let json: Value = serde_json::from_str(body).map_err(|_| {
        Error::RetrievalError(format!(
            "GDELT returned non-JSON (likely query rejected / rate limited). Snippet: {}",
            snippet(body)
        ))
    })?;

    if let Some(err) = json.get("error").filter(|v| is_truthy(v)) {
        let msg = err.as_str().map(str::to_string).unwrap_or_else(|| err.to_string());
        return Err(Error::RetrievalError(format!("GDELT error: {}", msg)));
    }

    let items = match json.get("articles").and_then(Value::as_array) {
        | Some(items) => items,
        | None => return Ok(Vec::new()),
    };

    let mut articles = Vec::with_capacity(items.len());
    for item in items {
        match serde_json::from_value::<Article>(item.clone()) {
            | Ok(a) => articles.push(a),
            | Err(e) => log::warn!("skipping malformed GDELT article: {}", e),
        }
    }
    Ok(articles)
}

/// `""`, `false`, `0` and `null` do not signal an upstream error.
fn is_truthy(value: &Value) -> bool {
    match value {
        | Value::Null => false,
        | Value::Bool(b) => *b,
        | Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        | Value::String(s) => !s.is_empty(),
        | Value::Array(_) | Value::Object(_) => true,
    }
}

fn snippet(body: &str) -> String {
    body.chars().take(SNIPPET_CHARS).collect()
}
