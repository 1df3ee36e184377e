//! Pair analysis: fetch both sides, weigh them, and assemble the report.

use metrics::counter;
use serde::Serialize;
use std::sync::Arc;

use crate::config::Config;
use crate::news::NewsSource;
use crate::sentiment::{
    AnalysisResult, CurrencyProfiles, PolarityScorer, SentimentAggregator, ThemeClassifier,
};
use crate::utils::error::Result;
use crate::utils::types::{pick_top_headlines, CurrencyPair, Headline};

/// Fixed explanatory notes attached to every report.
pub const REPORT_NOTES: [&str; 2] = [
    "Weighted sentiment: headlines with high-impact macro terms are weighted more.",
    "Spread = base weighted sentiment minus quote weighted sentiment.",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadlineSet {
    pub base: Vec<Headline>,
    pub quote: Vec<Headline>,
}

/// Full response for one pair request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub timespan: String,
    pub headlines: HeadlineSet,
    pub notes: Vec<String>,
}

pub struct PairAnalyzer {
    source: Arc<dyn NewsSource>,
    aggregator: SentimentAggregator,
    profiles: Arc<CurrencyProfiles>,
    headline_limit: usize,
    default_timespan: String,
}

impl PairAnalyzer {
    pub fn new(
        source: Arc<dyn NewsSource>, aggregator: SentimentAggregator, profiles: Arc<CurrencyProfiles>,
    ) -> Self {
        Self {
            source,
            aggregator,
            profiles,
            headline_limit: 10,
            default_timespan: "24h".to_string(),
        }
    }

    /// Wire an analyzer from configuration, scoring polarity with the given scorer.
    pub fn from_config(cfg: &Config, source: Arc<dyn NewsSource>, scorer: PolarityScorer) -> Self {
        let classifier = ThemeClassifier::new(Arc::new(cfg.themes.clone()));
        let mut analyzer = Self::new(
            source,
            SentimentAggregator::new(classifier, scorer),
            Arc::new(cfg.currencies.clone()),
        );
        analyzer.headline_limit = cfg.news.headline_limit;
        analyzer.default_timespan = cfg.news.default_timespan.clone();
        analyzer
    }

    /// Analyze a raw pair code such as `eurusd`. A blank timespan uses the default.
    ///
    /// Validation happens before any fetch. If either side fails to fetch the
    /// whole analysis fails.
    pub async fn analyze(&self, pair_raw: &str, timespan: Option<&str>) -> Result<AnalysisReport> {
        let pair = CurrencyPair::parse(pair_raw, &self.profiles)?;
        let timespan = match timespan.map(str::trim) {
            | Some(t) if !t.is_empty() => t.to_string(),
            | _ => self.default_timespan.clone(),
        };

        log::info!("analyzing {} over {}", pair, timespan);
        let (base_articles, quote_articles) = tokio::try_join!(
            self.source.fetch_articles(&pair.base, &timespan),
            self.source.fetch_articles(&pair.quote, &timespan),
        )?;

        let base_sentiment = self.aggregator.aggregate(&base_articles);
        let quote_sentiment = self.aggregator.aggregate(&quote_articles);
        let result = AnalysisResult::new(&pair, base_sentiment, quote_sentiment);

        counter!("fx_analyses_total", 1, "decision" => result.decision.as_str());
        log::info!("{}: spread {:.3} -> {}", pair, result.spread, result.decision);

        Ok(AnalysisReport {
            result,
            timespan,
            headlines: HeadlineSet {
                base: pick_top_headlines(&base_articles, self.headline_limit),
                quote: pick_top_headlines(&quote_articles, self.headline_limit),
            },
            notes: REPORT_NOTES.iter().map(|n| n.to_string()).collect(),
        })
    }
}
