//! Folds one currency's article batch into a weighted sentiment summary.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::collections::HashMap;

use super::classifier::ThemeClassifier;
use super::polarity::PolarityScorer;
use super::clamp;
use crate::utils::types::Article;

/// Maximum number of influencers kept per currency.
pub const TOP_INFLUENCERS: usize = 3;

/// Per-theme hit counts, kept in catalog order and serialized as a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemeHits(Vec<(String, usize)>);

impl ThemeHits {
    /// Build from `(name, count)` pairs already in catalog order.
    pub fn from_counts(counts: &[(&str, usize)]) -> Self {
        Self(counts.iter().map(|(n, c)| (n.to_string(), *c)).collect())
    }

    pub fn get(&self, name: &str) -> usize {
        self.0.iter().find(|(n, _)| n == name).map(|(_, c)| *c).unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(n, c)| (n.as_str(), *c))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The `n` most frequent themes. Equal counts keep catalog order.
    pub fn top(&self, n: usize) -> Vec<(&str, usize)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}

impl Serialize for ThemeHits {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(n, c)| (n, c)))
    }
}

/// An article kept to explain a sentiment result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Influencer {
    pub title: String,
    pub url: String,
    pub domain: String,
    pub seen_at: Option<DateTime<Utc>>,
    pub weight: f64,
    pub polarity_score: f64,
    pub matched_theme_names: Vec<String>,
}

/// Weighted sentiment summary for one currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencySentiment {
    /// Σ(score × weight) / Σ(weight), clamped to [-1, 1]; 0 without usable articles.
    pub weighted_average: f64,
    /// Articles whose weight exceeded the 1.0 baseline.
    pub high_impact_count: usize,
    pub hit_counts_by_theme: ThemeHits,
    /// Σ(weight) rounded to two decimals, for display only.
    pub total_weight_mass: f64,
    pub top_influencers: Vec<Influencer>,
}

impl Default for CurrencySentiment {
    fn default() -> Self {
        Self {
            weighted_average: 0.0,
            high_impact_count: 0,
            hit_counts_by_theme: ThemeHits::default(),
            total_weight_mass: 0.0,
            top_influencers: Vec::new(),
        }
    }
}

/// Runs the classifier and scorer over a batch and accumulates the result.
#[derive(Debug, Clone)]
pub struct SentimentAggregator {
    classifier: ThemeClassifier,
    scorer: PolarityScorer,
}

impl SentimentAggregator {
    pub fn new(classifier: ThemeClassifier, scorer: PolarityScorer) -> Self {
        Self { classifier, scorer }
    }

    pub fn aggregate(&self, articles: &[Article]) -> CurrencySentiment {
        let mut weight_mass = 0.0;
        let mut weighted_sum = 0.0;
        let mut high_impact_count = 0;
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut candidates = Vec::with_capacity(articles.len());

        for article in articles {
            // Untitled, undescribed records would only drag the average to zero.
            let text = article.combined_text();
            if text.is_empty() {
                continue;
            }

            let score = self.scorer.score(&text);
            let theme_match = self.classifier.classify(&article.title);

            weight_mass += theme_match.weight;
            weighted_sum += score * theme_match.weight;

            if theme_match.is_high_impact() {
                high_impact_count += 1;
                for name in &theme_match.matched_theme_names {
                    *counts.entry(name.clone()).or_default() += 1;
                }
            }

            candidates.push(Influencer {
                title: article.title.clone(),
                url: article.url.clone(),
                domain: article.source_domain.clone(),
                seen_at: article.published_at(),
                weight: theme_match.weight,
                polarity_score: score,
                matched_theme_names: theme_match.matched_theme_names,
            });
        }

        let weighted_average =
            if weight_mass > 0.0 { clamp(weighted_sum / weight_mass, -1.0, 1.0) } else { 0.0 };

        rank_influencers(&mut candidates);
        candidates.truncate(TOP_INFLUENCERS);

        let hits = self
            .classifier
            .catalog()
            .themes()
            .iter()
            .filter_map(|t| counts.get(t.name.as_str()).map(|c| (t.name.clone(), *c)))
            .collect();

        log::debug!(
            "aggregated {} articles: avg={:.3} mass={:.2} high_impact={}",
            articles.len(),
            weighted_average,
            weight_mass,
            high_impact_count
        );

        CurrencySentiment {
            weighted_average,
            high_impact_count,
            hit_counts_by_theme: ThemeHits(hits),
            total_weight_mass: (weight_mass * 100.0).round() / 100.0,
            top_influencers: candidates,
        }
    }
}

/// Heaviest first; among equal weights the most extreme polarity first.
fn rank_influencers(candidates: &mut [Influencer]) {
    candidates.sort_by(|a, b| {
        b.weight
            .total_cmp(&a.weight)
            .then_with(|| b.polarity_score.abs().total_cmp(&a.polarity_score.abs()))
    });
}
