//! Integration test: HTTP API routes over a stub news source.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::collections::HashMap;
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;

use fxsentiment::analysis::PairAnalyzer;
use fxsentiment::config::Config;
use fxsentiment::news::{NewsSource, StaticSource};
use fxsentiment::sentiment::{PolarityModel, PolarityScorer};
use fxsentiment::server::{serve_on, AppState};
use fxsentiment::utils::types::Article;
use fxsentiment::Error;

struct Table;

impl PolarityModel for Table {
    fn polarity_scores(&self, text: &str) -> HashMap<String, f64> {
        let v = if text.contains("cut") { -0.5 } else { 0.1 };
        HashMap::from([("compound".to_string(), v)])
    }
}

/// Always fails the way an unreachable news index would.
struct FailingSource {
    message: String,
}

#[async_trait]
impl NewsSource for FailingSource {
    async fn fetch_articles(&self, _currency: &str, _timespan: &str) -> fxsentiment::Result<Vec<Article>> {
        Err(Error::RetrievalError(self.message.clone()))
    }
}

fn spawn_api(source: Arc<dyn NewsSource>) -> SocketAddr {
    let cfg = Config::default();
    let analyzer = PairAnalyzer::from_config(&cfg, source, PolarityScorer::new(Arc::new(Table)));
    let state = Arc::new(AppState { analyzer, pairs: cfg.signal.pairs.clone() });

    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve_on(listener, state));
    addr
}

fn static_source() -> Arc<dyn NewsSource> {
    Arc::new(
        StaticSource::new()
            .with_articles("EUR", vec![Article::headline("ECB signals rate cut")])
            .with_articles("USD", vec![Article::headline("Dollar steady")]),
    )
}

async fn get(addr: SocketAddr, path: &str) -> (StatusCode, String) {
    let resp = reqwest::get(format!("http://{}{}", addr, path)).await.expect("request");
    let status = resp.status();
    (status, resp.text().await.expect("body"))
}

#[tokio::test]
async fn lists_pairs_and_health() {
    let addr = spawn_api(static_source());

    let (status, body) = get(addr, "/api/pairs").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["pairs"][0], "EURUSD");
    assert_eq!(json["pairs"].as_array().unwrap().len(), 7);

    let (status, body) = get(addr, "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn analyze_returns_report() {
    let addr = spawn_api(static_source());

    let (status, body) = get(addr, "/api/analyze?pair=eurusd&timespan=48h").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["pair"], "EURUSD");
    assert_eq!(json["timespan"], "48h");
    assert_eq!(json["decision"], "BEARISH");
    assert_eq!(json["decisionLabel"], "Bearish (Sell)");
    assert_eq!(json["baseSentiment"]["highImpactCount"], 1);
    assert_eq!(json["baseSentiment"]["hitCountsByTheme"]["Rates/Decision"], 1);
    assert_eq!(json["headlines"]["base"][0]["title"], "ECB signals rate cut");
    assert_eq!(json["notes"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn default_timespan_applies() {
    let addr = spawn_api(static_source());
    let (status, body) = get(addr, "/api/analyze?pair=EURUSD").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["timespan"], "24h");
}

#[tokio::test]
async fn bad_pairs_are_rejected_with_400() {
    let addr = spawn_api(static_source());

    for path in [
        "/api/analyze",
        "/api/analyze?pair=EURUS",
        "/api/analyze?pair=EURXYZ",
        "/api/analyze?pair=EURUSD&pair=GBPUSD",
    ] {
        let (status, body) = get(addr, path).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", path);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert!(json["error"].is_string());
    }

    let (_, body) = get(addr, "/api/analyze?pair=EURXYZ").await;
    assert!(body.contains("Supported: USD, EUR, JPY, GBP, AUD, CAD, CHF, NZD"));

    let (_, body) = get(addr, "/api/analyze?pair=EURUSD&pair=GBPUSD").await;
    let json: Value = serde_json::from_str(&body).unwrap();
    assert!(json["error"].as_str().unwrap().contains("duplicate field"));
}

#[tokio::test]
async fn retrieval_failure_is_502() {
    let addr = spawn_api(Arc::new(FailingSource { message: "GDELT HTTP 429: Too Many Requests".into() }));

    let (status, body) = get(addr, "/api/analyze?pair=EURUSD").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert!(json["error"].as_str().unwrap().contains("GDELT HTTP 429"));
}
