//! Integration test: GdeltSource against a stub DOC API server.

use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
use serde_json::json;
use std::collections::HashMap;
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;

use fxsentiment::config::NewsConfig;
use fxsentiment::news::{GdeltSource, NewsSource};
use fxsentiment::sentiment::query::default_econ_terms;
use fxsentiment::sentiment::{CurrencyProfiles, QueryBuilder};

async fn ok_handler(Query(params): Query<HashMap<String, String>>) -> Json<serde_json::Value> {
    // Echo the request parameters back through the article fields.
    Json(json!({
        "articles": [
            {
                "url": "https://news.test/1",
                "title": format!("{} / {}", params["mode"], params["timespan"]),
                "seendate": "20240612T134500Z",
                "domain": "news.test",
                "language": "English",
                "sourcecountry": "United States"
            },
            { "url": "https://news.test/2", "title": params["query"].clone() }
        ]
    }))
}

async fn html_handler() -> &'static str {
    "<html>Please limit requests to one every 5 seconds</html>"
}

async fn error_handler() -> Json<serde_json::Value> {
    Json(json!({ "error": "The specified phrase is too short." }))
}

async fn empty_handler() -> Json<serde_json::Value> {
    Json(json!({}))
}

async fn fail_handler() -> (StatusCode, &'static str) {
    (StatusCode::SERVICE_UNAVAILABLE, "upstream overloaded")
}

fn spawn_stub() -> SocketAddr {
    let app = Router::new()
        .route("/ok", get(ok_handler))
        .route("/html", get(html_handler))
        .route("/error", get(error_handler))
        .route("/empty", get(empty_handler))
        .route("/fail", get(fail_handler));
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().unwrap();
    let server = axum::Server::from_tcp(listener).unwrap().serve(app.into_make_service());
    tokio::spawn(server);
    addr
}

fn source(addr: SocketAddr, path: &str) -> GdeltSource {
    let cfg = NewsConfig { endpoint: format!("http://{}{}", addr, path), ..NewsConfig::default() };
    let query = QueryBuilder::new(Arc::new(CurrencyProfiles::default()), default_econ_terms());
    GdeltSource::new(&cfg, query).expect("client")
}

#[tokio::test]
async fn decodes_articles_and_sends_params() {
    let addr = spawn_stub();
    let articles = source(addr, "/ok").fetch_articles("USD", "3d").await.expect("fetch");

    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].title, "artlist / 3d");
    assert_eq!(articles[0].source_domain, "news.test");
    assert!(articles[0].published_at().is_some());
    assert_eq!(
        articles[1].title,
        "(USD OR dollar OR Fed OR FOMC OR Treasury) AND (rates OR inflation OR GDP OR \"central bank\")"
    );
}

#[tokio::test]
async fn non_json_body_is_a_retrieval_error() {
    let addr = spawn_stub();
    let err = source(addr, "/html").fetch_articles("EUR", "24h").await.unwrap_err();
    assert!(err.is_retrieval());
    let msg = err.to_string();
    assert!(msg.contains("GDELT returned non-JSON (likely query rejected / rate limited)"));
    assert!(msg.contains("Please limit requests"));
}

#[tokio::test]
async fn error_field_is_a_retrieval_error() {
    let addr = spawn_stub();
    let err = source(addr, "/error").fetch_articles("EUR", "24h").await.unwrap_err();
    assert!(err.to_string().contains("GDELT error: The specified phrase is too short."));
}

#[tokio::test]
async fn missing_articles_is_empty() {
    let addr = spawn_stub();
    let articles = source(addr, "/empty").fetch_articles("CHF", "24h").await.expect("fetch");
    assert!(articles.is_empty());
}

#[tokio::test]
async fn http_failure_reports_status_and_body() {
    let addr = spawn_stub();
    let err = source(addr, "/fail").fetch_articles("NZD", "24h").await.unwrap_err();
    assert!(err.is_retrieval());
    assert!(err.to_string().contains("GDELT HTTP 503: upstream overloaded"));
}
