//! Currency code → news index search query.

use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

use super::catalog::CurrencyProfiles;

/// Anything outside ASCII word characters forces a quoted phrase.
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]").expect("static regex"));

/// Default economic filter appended to every currency query.
pub fn default_econ_terms() -> Vec<String> {
    ["rates", "inflation", "GDP", "central bank"].iter().map(|s| s.to_string()).collect()
}

/// Wrap multi-word or punctuated terms in double quotes.
pub fn quote_if_needed(term: &str) -> String {
    let t = term.trim();
    if !t.is_empty() && NON_WORD.is_match(t) {
        format!("\"{}\"", t)
    } else {
        t.to_string()
    }
}

/// Builds short boolean queries so the index does not reject them.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    profiles: Arc<CurrencyProfiles>,
    econ_terms: Vec<String>,
}

impl QueryBuilder {
    pub fn new(profiles: Arc<CurrencyProfiles>, econ_terms: Vec<String>) -> Self {
        Self { profiles, econ_terms }
    }

    /// `(<currency terms OR-ed>) AND (<econ terms OR-ed>)`. Unknown codes search
    /// for the bare code.
    pub fn currency_query(&self, code: &str) -> String {
        let terms: Vec<String> = match self.profiles.get(code) {
            | Some(p) if !p.terms.is_empty() => p.terms.iter().map(|t| quote_if_needed(t)).collect(),
            | _ => vec![quote_if_needed(code)],
        };
        let econ: Vec<String> = self.econ_terms.iter().map(|t| quote_if_needed(t)).collect();
        format!("({}) AND ({})", terms.join(" OR "), econ.join(" OR "))
    }
}
