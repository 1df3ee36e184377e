//! Headline → macro theme classification.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::catalog::ThemeCatalog;

/// Weight assigned to a headline that matches no theme.
pub const BASELINE_WEIGHT: f64 = 1.0;

/// Outcome of classifying one headline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeMatch {
    pub weight: f64,
    /// Matched theme names in catalog order, without duplicates.
    pub matched_theme_names: Vec<String>,
}

impl Default for ThemeMatch {
    fn default() -> Self {
        Self { weight: BASELINE_WEIGHT, matched_theme_names: Vec::new() }
    }
}

impl ThemeMatch {
    pub fn is_high_impact(&self) -> bool {
        self.weight > BASELINE_WEIGHT
    }
}

/// Substring matcher over a theme catalog. Terms are lower-cased once up front.
#[derive(Debug, Clone)]
pub struct ThemeClassifier {
    catalog: Arc<ThemeCatalog>,
    lowered: Vec<Vec<String>>,
}

impl ThemeClassifier {
    pub fn new(catalog: Arc<ThemeCatalog>) -> Self {
        let lowered = catalog
            .themes()
            .iter()
            .map(|t| {
                t.terms
                    .iter()
                    .map(|term| term.trim().to_lowercase())
                    .filter(|term| !term.is_empty())
                    .collect()
            })
            .collect();
        Self { catalog, lowered }
    }

    pub fn catalog(&self) -> &ThemeCatalog {
        &self.catalog
    }

    /// Classify a headline. Every theme is checked; the resulting weight is the
    /// largest matched theme weight (never the sum), floored at the baseline.
    pub fn classify(&self, title: &str) -> ThemeMatch {
        let text = title.to_lowercase();
        let mut result = ThemeMatch::default();
        if text.trim().is_empty() {
            return result;
        }

        for (theme, terms) in self.catalog.themes().iter().zip(&self.lowered) {
            if terms.iter().any(|term| text.contains(term.as_str())) {
                result.weight = result.weight.max(theme.weight);
                if !result.matched_theme_names.contains(&theme.name) {
                    result.matched_theme_names.push(theme.name.clone());
                }
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::catalog::Theme;

    fn default_classifier() -> ThemeClassifier {
        ThemeClassifier::new(Arc::new(ThemeCatalog::default()))
    }

    #[test]
    fn unmatched_headline_has_baseline_weight() {
        let m = default_classifier().classify("Quiet day, no major news");
        assert_eq!(m.weight, 1.0);
        assert!(m.matched_theme_names.is_empty());
        assert!(!m.is_high_impact());
    }

    #[test]
    fn empty_title() {
        let m = default_classifier().classify("");
        assert_eq!(m, ThemeMatch::default());
    }

    #[test]
    fn weight_is_max_not_sum() {
        let catalog = ThemeCatalog::new(vec![
            Theme::new("A", 2.0, &["alpha"]),
            Theme::new("B", 2.3, &["beta"]),
        ])
        .unwrap();
        let classifier = ThemeClassifier::new(Arc::new(catalog));
        let m = classifier.classify("alpha meets beta");
        assert_eq!(m.weight, 2.3);
        assert_eq!(m.matched_theme_names, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let m = default_classifier().classify("US cpi beats forecasts");
        assert_eq!(m.weight, 2.3);
        assert_eq!(m.matched_theme_names, vec!["CPI/Inflation".to_string()]);
    }

    #[test]
    fn every_theme_is_checked() {
        let m = default_classifier().classify("Fed signals rate hike amid inflation surge");
        assert_eq!(m.weight, 2.6);
        assert_eq!(
            m.matched_theme_names,
            vec!["Rates/Decision".to_string(), "CPI/Inflation".to_string()]
        );
        assert!(m.is_high_impact());
    }

    #[test]
    fn several_terms_of_one_theme_count_once() {
        let m = default_classifier().classify("Core inflation and consumer prices climb");
        assert_eq!(m.matched_theme_names, vec!["CPI/Inflation".to_string()]);
    }
}
