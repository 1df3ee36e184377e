//! Static lookup tables: weighted macro themes and per-currency search terms.
//!
//! Both tables are plain immutable values. They are built once (from defaults or
//! from the `[[themes]]` / `[[currencies]]` config sections) and handed to the
//! classifier and query builder explicitly.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::utils::error::{Error, Result};

/// A named macro-economic category with a weight multiplier and trigger terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub weight: f64,
    pub terms: Vec<String>,
}

impl Theme {
    pub fn new(name: &str, weight: f64, terms: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            weight,
            terms: terms.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Ordered theme table. Order matters: it breaks ties when ranking drivers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeCatalog {
    themes: Vec<Theme>,
}

impl ThemeCatalog {
    /// Build a catalog, rejecting duplicate names, weights not above 1.0 and
    /// themes without terms.
    pub fn new(themes: Vec<Theme>) -> Result<Self> {
        let mut seen = HashSet::new();
        for theme in &themes {
            if theme.name.trim().is_empty() {
                return Err(Error::ConfigError("theme name must be set".to_string()));
            }
            if !seen.insert(theme.name.as_str()) {
                return Err(Error::ConfigError(format!("duplicate theme '{}'", theme.name)));
            }
            if !(theme.weight.is_finite() && theme.weight > 1.0) {
                return Err(Error::ConfigError(format!(
                    "theme '{}' weight must be > 1.0, got {}",
                    theme.name, theme.weight
                )));
            }
            if theme.terms.iter().all(|t| t.trim().is_empty()) {
                return Err(Error::ConfigError(format!("theme '{}' has no terms", theme.name)));
            }
        }
        Ok(Self { themes })
    }

    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

impl Default for ThemeCatalog {
    fn default() -> Self {
        Self {
            themes: vec![
                Theme::new(
                    "Rates/Decision",
                    2.6,
                    &[
                        "rate hike",
                        "rate cut",
                        "hold rates",
                        "interest rates",
                        "policy decision",
                        "rate decision",
                        "meeting",
                        "statement",
                    ],
                ),
                Theme::new(
                    "CPI/Inflation",
                    2.3,
                    &["CPI", "inflation", "core inflation", "PCE", "prices", "consumer prices"],
                ),
                Theme::new(
                    "Jobs/NFP",
                    2.3,
                    &[
                        "NFP",
                        "nonfarm",
                        "payrolls",
                        "jobs report",
                        "unemployment",
                        "jobless claims",
                        "wage growth",
                    ],
                ),
                Theme::new("GDP/Growth", 2.1, &["GDP", "growth", "recession", "contraction", "expansion"]),
                Theme::new("PMI/Activity", 2.0, &["PMI", "manufacturing", "services PMI", "ISM"]),
                Theme::new(
                    "Central Bank Speak",
                    2.0,
                    &[
                        "Fed chair",
                        "Powell",
                        "ECB president",
                        "Lagarde",
                        "BoE governor",
                        "BoJ governor",
                        "RBA governor",
                        "BoC governor",
                        "speech",
                        "testimony",
                    ],
                ),
            ],
        }
    }
}

/// Search terms for one currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyProfile {
    pub code: String,
    pub terms: Vec<String>,
}

impl CurrencyProfile {
    pub fn new(code: &str, terms: &[&str]) -> Self {
        Self { code: code.to_string(), terms: terms.iter().map(|t| t.to_string()).collect() }
    }
}

/// Supported currencies in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyProfiles {
    profiles: Vec<CurrencyProfile>,
}

impl CurrencyProfiles {
    /// Build the table, requiring unique three-letter upper-case codes.
    pub fn new(profiles: Vec<CurrencyProfile>) -> Result<Self> {
        let mut seen = HashSet::new();
        for p in &profiles {
            if p.code.len() != 3 || !p.code.chars().all(|c| c.is_ascii_uppercase()) {
                return Err(Error::ConfigError(format!(
                    "currency code must be three upper-case letters, got '{}'",
                    p.code
                )));
            }
            if !seen.insert(p.code.as_str()) {
                return Err(Error::ConfigError(format!("duplicate currency '{}'", p.code)));
            }
        }
        Ok(Self { profiles })
    }

    pub fn profiles(&self) -> &[CurrencyProfile] {
        &self.profiles
    }

    pub fn get(&self, code: &str) -> Option<&CurrencyProfile> {
        self.profiles.iter().find(|p| p.code == code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    pub fn codes(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.code.as_str()).collect()
    }
}

impl Default for CurrencyProfiles {
    fn default() -> Self {
        Self {
            profiles: vec![
                CurrencyProfile::new("USD", &["USD", "dollar", "Fed", "FOMC", "Treasury"]),
                CurrencyProfile::new("EUR", &["EUR", "euro", "ECB", "Eurozone", "European Central Bank"]),
                CurrencyProfile::new("JPY", &["JPY", "yen", "BoJ", "Bank of Japan", "Tokyo"]),
                CurrencyProfile::new("GBP", &["GBP", "pound", "sterling", "BoE", "Bank of England"]),
                CurrencyProfile::new(
                    "AUD",
                    &["AUD", "Aussie", "RBA", "Reserve Bank of Australia", "Australia"],
                ),
                CurrencyProfile::new("CAD", &["CAD", "loonie", "BoC", "Bank of Canada", "Canada"]),
                CurrencyProfile::new(
                    "CHF",
                    &["CHF", "franc", "SNB", "Swiss National Bank", "Switzerland"],
                ),
                CurrencyProfile::new(
                    "NZD",
                    &["NZD", "kiwi", "RBNZ", "Reserve Bank of New Zealand", "New Zealand"],
                ),
            ],
        }
    }
}
