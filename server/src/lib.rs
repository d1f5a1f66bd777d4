use axum::{extract::{Query, State}, routing::{get, post}, Json, Router};
use docsearch_core::ranker::clamp_top_k;
use docsearch_core::{BenchmarkReport, DocId, Document, Metrics, SearchEngine, SearchHit};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_k")]
    pub k: i64,
}

#[derive(Deserialize)]
pub struct BenchmarkParams {
    #[serde(default = "default_k")]
    pub k: i64,
}

fn default_k() -> i64 { 5 }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub k: usize,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
    pub evaluation: Option<Metrics>,
}

#[derive(Deserialize)]
pub struct EvaluateRequest {
    pub query: String,
    /// Full ranking as returned by search with k = corpus size, not a top-k prefix.
    pub ranking: Vec<DocId>,
    #[serde(default = "default_k")]
    pub k: i64,
}

#[derive(Serialize)]
pub struct EvaluateResponse {
    pub query: String,
    /// `null` when the query has no relevance judgment.
    pub evaluation: Option<Metrics>,
}

#[derive(Serialize)]
pub struct CorpusResponse {
    pub documents: Vec<Document>,
}

#[derive(Serialize)]
pub struct Judgment {
    pub query: String,
    pub relevant: Vec<DocId>,
}

#[derive(Serialize)]
pub struct JudgmentsResponse {
    pub queries: Vec<Judgment>,
}

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SearchEngine>,
}

pub fn build_app(engine: Arc<SearchEngine>) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/corpus", get(corpus_handler))
        .route("/judgments", get(judgments_handler))
        .route("/search", get(search_handler))
        .route("/evaluate", post(evaluate_handler))
        .route("/benchmark", get(benchmark_handler))
        .with_state(AppState { engine })
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let k = clamp_top_k(params.k, state.engine.corpus().len());
    let outcome = state.engine.search_and_evaluate(&params.q, k);
    let elapsed = start.elapsed();
    tracing::info!(query = %outcome.query, k, total_hits = outcome.total_hits, took_s = elapsed.as_secs_f64(), "search");
    Json(SearchResponse {
        query: outcome.query,
        k: outcome.k,
        took_s: elapsed.as_secs_f64(),
        total_hits: outcome.total_hits,
        results: outcome.results,
        evaluation: outcome.evaluation,
    })
}

pub async fn evaluate_handler(State(state): State<AppState>, Json(req): Json<EvaluateRequest>) -> Json<EvaluateResponse> {
    let k = clamp_top_k(req.k, state.engine.corpus().len());
    let evaluation = state.engine.evaluate(&req.query, &req.ranking, k);
    if evaluation.is_none() {
        tracing::debug!(query = %req.query, "no relevance judgment");
    }
    Json(EvaluateResponse { query: req.query, evaluation })
}

pub async fn benchmark_handler(State(state): State<AppState>, Query(params): Query<BenchmarkParams>) -> Json<BenchmarkReport> {
    let k = clamp_top_k(params.k, state.engine.corpus().len());
    Json(state.engine.benchmark(k))
}

pub async fn corpus_handler(State(state): State<AppState>) -> Json<CorpusResponse> {
    Json(CorpusResponse { documents: state.engine.corpus().documents().to_vec() })
}

pub async fn judgments_handler(State(state): State<AppState>) -> Json<JudgmentsResponse> {
    let queries = state
        .engine
        .judgments()
        .iter()
        .map(|(query, relevant)| Judgment { query: query.to_string(), relevant: relevant.iter().copied().collect() })
        .collect();
    Json(JudgmentsResponse { queries })
}
