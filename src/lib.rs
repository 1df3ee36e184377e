//! # fxsentiment
//! Forex news-sentiment signal engine.
//!
//! Pulls recent macro headlines for both currencies of a pair, weighs each
//! headline by the economic theme it mentions, and turns the difference in
//! weighted sentiment into a bullish / bearish / neutral call with a short
//! human-readable rationale.

pub use crate::utils::error::{Error, Result};

pub mod analysis;
pub mod config;
pub mod metrics;
pub mod news;
pub mod sentiment;
pub mod server;
pub mod utils;

pub use crate::analysis::{AnalysisReport, PairAnalyzer};
pub use crate::config::Config;
pub use crate::sentiment::{AnalysisResult, CurrencySentiment, Decision};
