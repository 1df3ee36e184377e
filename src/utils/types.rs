//! Common types used throughout the sentiment service.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::sentiment::catalog::CurrencyProfiles;
use crate::utils::error::{Error, Result};

/// GDELT `seendate` layout, e.g. `20240612T134500Z`.
const SEEN_DATE_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// One news item as returned by the retrieval collaborator.
///
/// Field names follow the GDELT `artlist` payload so a response can be
/// deserialized directly; every field tolerates `null` or absence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, rename = "domain", deserialize_with = "null_as_default")]
    pub source_domain: String,
    #[serde(default, rename = "sourcecountry", deserialize_with = "null_as_default")]
    pub source_country: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub language: String,
    /// Raw publication stamp as delivered upstream.
    #[serde(default, rename = "seendate")]
    pub seen_date: Option<String>,
}

impl Article {
    /// Convenience constructor for a headline-only article.
    pub fn headline(title: impl Into<String>) -> Self {
        Self { title: title.into(), ..Default::default() }
    }

    /// Title and description joined into the text handed to the polarity scorer.
    /// Title comes first; blank parts are dropped. Empty when both are blank.
    pub fn combined_text(&self) -> String {
        let title = self.title.trim();
        let desc = self.description.as_deref().map(str::trim).unwrap_or("");
        match (title.is_empty(), desc.is_empty()) {
            | (false, false) => format!("{}. {}", title, desc),
            // No trailing ". " for title-only text; VADER scores "Title" and "Title." alike.
            | (false, true) => title.to_string(),
            | (true, false) => desc.to_string(),
            | (true, true) => String::new(),
        }
    }

    /// Publication time, if the upstream stamp is parseable.
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.seen_date.as_deref()?.trim();
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, SEEN_DATE_FORMAT) {
            return Some(Utc.from_utc_datetime(&naive));
        }
        DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.with_timezone(&Utc))
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A headline trimmed down for display next to an analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Headline {
    pub title: String,
    pub url: String,
    pub domain: String,
    pub source_country: String,
    pub language: String,
    pub seen_at: Option<DateTime<Utc>>,
}

impl From<&Article> for Headline {
    fn from(a: &Article) -> Self {
        Self {
            title: a.title.clone(),
            url: a.url.clone(),
            domain: a.source_domain.clone(),
            source_country: a.source_country.clone(),
            language: a.language.clone(),
            seen_at: a.published_at(),
        }
    }
}

/// First `limit` articles that carry a title, in upstream order.
pub fn pick_top_headlines(articles: &[Article], limit: usize) -> Vec<Headline> {
    articles
        .iter()
        .filter(|a| !a.title.trim().is_empty())
        .take(limit)
        .map(Headline::from)
        .collect()
}

/// A forex pair written as six letters, e.g. `EURUSD` (base `EUR`, quote `USD`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyPair {
    pub base: String,
    pub quote: String,
}

impl CurrencyPair {
    /// Create a pair from two currency codes
    pub fn new(base: &str, quote: &str) -> Self {
        Self { base: base.to_uppercase(), quote: quote.to_uppercase() }
    }

    /// Parse and validate a pair code against the supported currency table.
    pub fn parse(raw: &str, profiles: &CurrencyProfiles) -> Result<Self> {
        let code = raw.trim().to_uppercase();
        if code.len() != 6 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(Error::InvalidPair(format!("Provide pair like EURUSD, got '{}'", raw.trim())));
        }
        let pair = Self::new(&code[..3], &code[3..]);
        for side in [&pair.base, &pair.quote] {
            if !profiles.contains(side) {
                return Err(Error::UnsupportedCurrency {
                    code: side.clone(),
                    supported: profiles.codes().join(", "),
                });
            }
        }
        Ok(pair)
    }

    /// Six-letter code, e.g. `EURUSD`
    pub fn code(&self) -> String {
        format!("{}{}", self.base, self.quote)
    }
}

impl std::fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.base, self.quote)
    }
}
