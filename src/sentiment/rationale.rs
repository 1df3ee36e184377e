//! Human-readable explanation of a pair verdict.

use super::aggregator::CurrencySentiment;
use super::decision::{Decision, Verdict};
use crate::utils::types::CurrencyPair;

/// Themes listed per currency in the drivers clause.
const DRIVERS_PER_SIDE: usize = 2;
/// Upper bound on sentences in `why`; extra clauses are dropped whole.
const MAX_WHY_SENTENCES: usize = 3;

fn drivers(sentiment: &CurrencySentiment) -> String {
    let top: Vec<String> = sentiment
        .hit_counts_by_theme
        .top(DRIVERS_PER_SIDE)
        .into_iter()
        .map(|(name, count)| format!("{} ({})", name, count))
        .collect();
    if top.is_empty() {
        "none".to_string()
    } else {
        top.join(", ")
    }
}

fn example_title(sentiment: &CurrencySentiment) -> Option<&str> {
    sentiment
        .top_influencers
        .first()
        .map(|i| i.title.trim())
        .filter(|t| !t.is_empty())
}

/// Short "why": direction, leading themes, and one headline per side.
pub fn why(
    pair: &CurrencyPair, base: &CurrencySentiment, quote: &CurrencySentiment, verdict: &Verdict,
) -> String {
    let (b, q) = (&pair.base, &pair.quote);
    let direction = match verdict.decision {
        | Decision::Bullish => format!("More positive (weighted) news for {} than {}", b, q),
        | Decision::Bearish => format!("More positive (weighted) news for {} than {}", q, b),
        | Decision::Neutral => format!("No clear advantage between {} and {}", b, q),
    };

    let mut sentences = vec![format!(
        "{}, based on high-impact macro headlines (spread {:.2}).",
        direction, verdict.spread
    )];

    if !base.hit_counts_by_theme.is_empty() || !quote.hit_counts_by_theme.is_empty() {
        sentences.push(format!(
            "Top drivers: {} → {}, {} → {}.",
            b,
            drivers(base),
            q,
            drivers(quote)
        ));
    }

    let examples: Vec<String> = [(b, base), (q, quote)]
        .into_iter()
        .filter_map(|(code, s)| example_title(s).map(|t| format!("{}: “{}”", code, t)))
        .collect();
    if !examples.is_empty() {
        sentences.push(format!("Example: {}.", examples.join(" | ")));
    }

    sentences.truncate(MAX_WHY_SENTENCES);
    sentences.join(" ")
}

/// Narrative restating the numbers behind the verdict.
pub fn summary(
    pair: &CurrencyPair, base: &CurrencySentiment, quote: &CurrencySentiment, verdict: &Verdict,
) -> String {
    let direction = match verdict.decision {
        | Decision::Bullish => "tilts bullish",
        | Decision::Bearish => "tilts bearish",
        | Decision::Neutral => "looks mixed/neutral",
    };
    format!(
        "For {}, weighted headline sentiment for {} is {:.2} vs {} at {:.2} (spread {:.2}), so the signal {}. High-impact hits: {}={}, {}={}.",
        pair.code(),
        pair.base,
        base.weighted_average,
        pair.quote,
        quote.weighted_average,
        verdict.spread,
        direction,
        pair.base,
        base.high_impact_count,
        pair.quote,
        quote.high_impact_count
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::aggregator::{Influencer, ThemeHits};
    use crate::sentiment::decision::decide;

    fn influencer(title: &str) -> Influencer {
        Influencer {
            title: title.to_string(),
            url: String::new(),
            domain: String::new(),
            seen_at: None,
            weight: 2.6,
            polarity_score: 0.5,
            matched_theme_names: vec![],
        }
    }

    fn sentiment(avg: f64, hits: &[(&str, usize)], titles: &[&str]) -> CurrencySentiment {
        CurrencySentiment {
            weighted_average: avg,
            high_impact_count: hits.iter().map(|(_, c)| *c).sum(),
            hit_counts_by_theme: ThemeHits::from_counts(hits),
            total_weight_mass: 0.0,
            top_influencers: titles.iter().map(|t| influencer(t)).collect(),
        }
    }

    #[test]
    fn empty_sides_have_no_artifacts() {
        let pair = CurrencyPair::new("EUR", "USD");
        let (base, quote) = (CurrencySentiment::default(), CurrencySentiment::default());
        let verdict = decide(&base, &quote);
        let text = why(&pair, &base, &quote, &verdict);
        assert_eq!(
            text,
            "No clear advantage between EUR and USD, based on high-impact macro headlines (spread 0.00)."
        );
        assert!(!text.contains("Top drivers"));
        assert!(!text.contains("Example"));
    }

    #[test]
    fn full_rationale() {
        let pair = CurrencyPair::new("EUR", "USD");
        let base = sentiment(
            0.4,
            &[("Rates/Decision", 1), ("CPI/Inflation", 3), ("GDP/Growth", 3)],
            &["ECB signals rate hike"],
        );
        let quote = sentiment(0.1, &[], &["Dollar drifts"]);
        let verdict = decide(&base, &quote);
        let text = why(&pair, &base, &quote, &verdict);
        assert_eq!(
            text,
            "More positive (weighted) news for EUR than USD, based on high-impact macro headlines (spread 0.30). \
             Top drivers: EUR → CPI/Inflation (3), GDP/Growth (3), USD → none. \
             Example: EUR: “ECB signals rate hike” | USD: “Dollar drifts”."
        );
    }

    #[test]
    fn example_omits_side_without_influencer() {
        let pair = CurrencyPair::new("USD", "JPY");
        let base = sentiment(-0.3, &[("Jobs/NFP", 2)], &[]);
        let quote = sentiment(0.2, &[], &["Yen firms after BoJ meeting"]);
        let verdict = decide(&base, &quote);
        let text = why(&pair, &base, &quote, &verdict);
        assert!(text.starts_with("More positive (weighted) news for JPY than USD"));
        assert!(text.ends_with("Example: JPY: “Yen firms after BoJ meeting”."));
        assert!(!text.contains("USD: “"));
    }

    #[test]
    fn summary_matches_decision() {
        let pair = CurrencyPair::new("AUD", "USD");
        let base = sentiment(0.6, &[("Rates/Decision", 1)], &[]);
        let quote = sentiment(0.0, &[], &[]);
        let verdict = decide(&base, &quote);
        assert_eq!(
            summary(&pair, &base, &quote, &verdict),
            "For AUDUSD, weighted headline sentiment for AUD is 0.60 vs USD at 0.00 (spread 0.60), \
             so the signal tilts bullish. High-impact hits: AUD=1, USD=0."
        );
    }
}
