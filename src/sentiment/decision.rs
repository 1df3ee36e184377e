//! Pair decision: spread of two weighted sentiments mapped to a signal.

use serde::{Deserialize, Serialize};

use super::aggregator::CurrencySentiment;
use super::{clamp, rationale};
use crate::utils::types::CurrencyPair;

/// Spread at or above which the pair is called bullish.
pub const BULLISH_THRESHOLD: f64 = 0.12;
/// Spread at or below which the pair is called bearish.
pub const BEARISH_THRESHOLD: f64 = -0.12;
/// Spread is bounded to ±this value.
pub const MAX_SPREAD: f64 = 2.0;

/// Three-way trading signal for the base currency against the quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Bullish,
    Bearish,
    Neutral,
}

impl Decision {
    /// Inclusive thresholds on both sides; the band in between is neutral.
    pub fn from_spread(spread: f64) -> Self {
        if spread >= BULLISH_THRESHOLD {
            Decision::Bullish
        } else if spread <= BEARISH_THRESHOLD {
            Decision::Bearish
        } else {
            Decision::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            | Decision::Bullish => "BULLISH",
            | Decision::Bearish => "BEARISH",
            | Decision::Neutral => "NEUTRAL",
        }
    }

    /// Human label shown next to the signal.
    pub fn label(&self) -> &'static str {
        match self {
            | Decision::Bullish => "Bullish (Buy)",
            | Decision::Bearish => "Bearish (Sell)",
            | Decision::Neutral => "Neutral",
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spread and the decision derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Verdict {
    pub spread: f64,
    pub decision: Decision,
}

/// Compare two currencies. A side without usable news has average 0 and is
/// simply treated as neutral.
pub fn decide(base: &CurrencySentiment, quote: &CurrencySentiment) -> Verdict {
    let spread = clamp(base.weighted_average - quote.weighted_average, -MAX_SPREAD, MAX_SPREAD);
    Verdict { spread, decision: Decision::from_spread(spread) }
}

/// Final output of one pair analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub pair: String,
    pub base: String,
    pub quote: String,
    pub base_sentiment: CurrencySentiment,
    pub quote_sentiment: CurrencySentiment,
    pub spread: f64,
    pub decision: Decision,
    pub decision_label: String,
    pub summary: String,
    pub why: String,
}

impl AnalysisResult {
    /// Decide and explain. `summary` and `why` are built from the same verdict so
    /// they can never disagree on direction.
    pub fn new(
        pair: &CurrencyPair, base_sentiment: CurrencySentiment, quote_sentiment: CurrencySentiment,
    ) -> Self {
        let verdict = decide(&base_sentiment, &quote_sentiment);
        let why = rationale::why(pair, &base_sentiment, &quote_sentiment, &verdict);
        let summary = rationale::summary(pair, &base_sentiment, &quote_sentiment, &verdict);
        Self {
            pair: pair.code(),
            base: pair.base.clone(),
            quote: pair.quote.clone(),
            base_sentiment,
            quote_sentiment,
            spread: verdict.spread,
            decision: verdict.decision,
            decision_label: verdict.decision.label().to_string(),
            summary,
            why,
        }
    }
}
