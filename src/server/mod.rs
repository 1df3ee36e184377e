//! JSON HTTP API over the pair analyzer.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::net::TcpListener;
use std::sync::Arc;

use crate::analysis::{AnalysisReport, PairAnalyzer};
use crate::config::Config;
use crate::news::GdeltSource;
use crate::sentiment::{PolarityScorer, QueryBuilder};
use crate::utils::error::{Error, Result};

pub struct AppState {
    pub analyzer: PairAnalyzer,
    pub pairs: Vec<String>,
}

impl AppState {
    /// Production wiring: GDELT retrieval and VADER polarity.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let query = QueryBuilder::new(Arc::new(cfg.currencies.clone()), cfg.query.econ_terms.clone());
        let source = GdeltSource::new(&cfg.news, query)?;
        let analyzer = PairAnalyzer::from_config(cfg, Arc::new(source), PolarityScorer::vader());
        Ok(Self { analyzer, pairs: cfg.signal.pairs.clone() })
    }
}

/// Error body `{"error": "..."}` with a status chosen by error kind.
#[derive(Debug)]
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        if self.0.is_validation() {
            StatusCode::BAD_REQUEST
        } else if self.0.is_retrieval() {
            StatusCode::BAD_GATEWAY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::warn!("analysis failed: {}", self.0);
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeParams {
    pub pair: Option<String>,
    pub timespan: Option<String>,
}

async fn root_handler() -> &'static str {
    concat!("fxsentiment ", env!("CARGO_PKG_VERSION"), " - GET /api/analyze?pair=EURUSD")
}

async fn health_handler() -> &'static str {
    "OK"
}

async fn metrics_handler() -> String {
    crate::metrics::render().unwrap_or_default()
}

async fn pairs_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({ "pairs": state.pairs }))
}

#[tracing::instrument(skip(state))]
async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<AnalyzeParams>, QueryRejection>,
) -> std::result::Result<Json<AnalysisReport>, ApiError> {
    let Query(params) = params.map_err(|rejection| Error::InvalidRequest(rejection.body_text()))?;
    let pair = params.pair.unwrap_or_default();
    let report = state.analyzer.analyze(&pair, params.timespan.as_deref()).await?;
    Ok(Json(report))
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/healthz", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/api/pairs", get(pairs_handler))
        .route("/api/analyze", get(analyze_handler))
        .with_state(state)
}

/// Serve the API on an already bound listener until the server stops.
pub async fn serve_on(listener: TcpListener, state: Arc<AppState>) -> Result<()> {
    let app = router(state);
    axum::Server::from_tcp(listener)
        .map_err(|e| Error::Other(format!("server setup: {}", e)))?
        .serve(app.into_make_service())
        .await
        .map_err(|e| Error::Other(format!("server error: {}", e)))
}

/// Bind the configured address and serve the API.
pub async fn serve(cfg: &Config) -> Result<()> {
    let state = Arc::new(AppState::from_config(cfg)?);
    let addr = cfg.socket_addr()?;
    let listener = TcpListener::bind(addr)?;
    log::info!("Running on http://{}", listener.local_addr()?);
    serve_on(listener, state).await
}
