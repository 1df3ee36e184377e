//! Adapter around the per-text polarity model.
//!
//! The model is a black box that returns a bag of named scores; only the
//! `compound` entry is used. A missing or non-finite compound reads as neutral so
//! one unscorable headline never sinks a whole analysis.

use std::collections::HashMap;
use std::sync::Arc;

use vader_sentiment::SentimentIntensityAnalyzer;

/// Key of the overall polarity in a model's score map.
pub const COMPOUND: &str = "compound";

/// Raw polarity model: text in, named scores out.
pub trait PolarityModel: Send + Sync {
    fn polarity_scores(&self, text: &str) -> HashMap<String, f64>;
}

/// VADER lexicon model.
pub struct VaderModel {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderModel {
    pub fn new() -> Self {
        Self { analyzer: SentimentIntensityAnalyzer::new() }
    }
}

impl Default for VaderModel {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarityModel for VaderModel {
    fn polarity_scores(&self, text: &str) -> HashMap<String, f64> {
        self.analyzer
            .polarity_scores(text)
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }
}

/// Normalizes model output to a single scalar.
#[derive(Clone)]
pub struct PolarityScorer {
    model: Arc<dyn PolarityModel>,
}

impl PolarityScorer {
    pub fn new(model: Arc<dyn PolarityModel>) -> Self {
        Self { model }
    }

    pub fn vader() -> Self {
        Self::new(Arc::new(VaderModel::new()))
    }

    /// Compound polarity of `text`, or 0.0 when the model gives nothing usable.
    pub fn score(&self, text: &str) -> f64 {
        self.model
            .polarity_scores(text)
            .get(COMPOUND)
            .copied()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }
}

impl std::fmt::Debug for PolarityScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolarityScorer").finish_non_exhaustive()
    }
}
