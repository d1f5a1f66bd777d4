use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use docsearch_core::SearchEngine;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    docsearch_server::build_app(Arc::new(SearchEngine::builtin()))
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

async fn get(uri: &str) -> (StatusCode, Value) {
    send(app(), Request::get(uri).body(Body::empty()).unwrap()).await
}

#[tokio::test]
async fn search_returns_ranked_results_with_metrics() {
    let (status, json) = get("/search?q=pain%20relief%20drug&k=5").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<u64> = json["results"].as_array().unwrap().iter().map(|h| h["doc_id"].as_u64().unwrap()).collect();
    assert_eq!(ids, vec![0, 11, 2, 7, 1]);
    assert!(json["results"][0]["text"].as_str().unwrap().starts_with("Aspirin"));
    assert_eq!(json["total_hits"], 4);
    assert_eq!(json["evaluation"]["mrr"], 1.0);
    assert!((json["evaluation"]["precision_at_k"].as_f64().unwrap() - 0.6).abs() < 1e-9);
}

#[tokio::test]
async fn unjudged_query_has_null_evaluation() {
    let (status, json) = get("/search?q=the%20a%20of").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["results"].as_array().unwrap().len(), 0);
    assert!(json["evaluation"].is_null());
    assert_eq!(json["k"], 5);
}

#[tokio::test]
async fn out_of_range_k_is_clamped() {
    let (_, json) = get("/search?q=asthma&k=-4").await;
    assert_eq!(json["k"], 0);
    assert_eq!(json["results"].as_array().unwrap().len(), 0);

    let (_, json) = get("/search?q=asthma&k=999").await;
    assert_eq!(json["k"], 20);
    assert_eq!(json["results"].as_array().unwrap().len(), 20);
}

#[tokio::test]
async fn missing_query_is_rejected() {
    let (status, _) = get("/search?k=3").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn evaluate_scores_a_supplied_ranking() {
    let body = json!({ "query": "cancer treatment", "ranking": [17, 3, 2], "k": 2 });
    let req = Request::post("/evaluate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, json) = send(app(), req).await;
    assert_eq!(status, StatusCode::OK);
    let m = &json["evaluation"];
    assert_eq!(m["precision_at_k"], 0.5);
    assert_eq!(m["recall_at_k"], 0.5);
    assert_eq!(m["mrr"], 1.0);
    // hits at positions 1 and 3
    assert!((m["map"].as_f64().unwrap() - (1.0 + 2.0 / 3.0) / 2.0).abs() < 1e-9);

    let body = json!({ "query": "Cancer treatment", "ranking": [2, 17], "k": 2 });
    let req = Request::post("/evaluate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (_, json) = send(app(), req).await;
    assert!(json["evaluation"].is_null());
}

#[tokio::test]
async fn corpus_judgments_and_benchmark() {
    let (_, corpus) = get("/corpus").await;
    assert_eq!(corpus["documents"].as_array().unwrap().len(), 20);
    assert_eq!(corpus["documents"][19]["doc_id"], 19);

    let (_, judgments) = get("/judgments").await;
    assert_eq!(judgments["queries"][0]["query"], "pain relief drug");
    assert_eq!(judgments["queries"][0]["relevant"], json!([0, 7, 11]));

    let (status, report) = get("/benchmark?k=5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["queries"].as_array().unwrap().len(), 4);
    assert_eq!(report["mean"]["mrr"], 1.0);
}

#[tokio::test]
async fn health() {
    let resp = app().oneshot(Request::get("/health").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"ok");
}
