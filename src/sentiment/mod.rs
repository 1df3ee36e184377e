//! News sentiment weighting and decision engine.
//!
//! Pure, synchronous computation over already-fetched article batches:
//! themes and polarity per headline, a weighted summary per currency, and a
//! three-way decision for the pair.

pub mod aggregator;
pub mod catalog;
pub mod classifier;
pub mod decision;
pub mod polarity;
pub mod query;
pub mod rationale;

pub use aggregator::{CurrencySentiment, Influencer, SentimentAggregator, ThemeHits};
pub use catalog::{CurrencyProfile, CurrencyProfiles, Theme, ThemeCatalog};
pub use classifier::{ThemeClassifier, ThemeMatch};
pub use decision::{decide, AnalysisResult, Decision, Verdict};
pub use polarity::{PolarityModel, PolarityScorer, VaderModel};
pub use query::QueryBuilder;

/// Bound `value` to `[min, max]`. NaN collapses to the bound nearest zero so the
/// output is always a plain number.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return 0.0_f64.max(min).min(max);
    }
    value.max(min).min(max)
}
