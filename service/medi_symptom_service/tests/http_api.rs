mod common;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use medi_classifier::{BackendError, ProbabilityModel};
use medi_symptom_service::{router, SymptomChecker};
use pretty_assertions::assert_eq;
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

fn app() -> Router {
    router(Arc::new(common::checker()))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, JsonValue) {
    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body = serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null);
    (status, body)
}

async fn post_predict(body: impl Into<Body>) -> (StatusCode, JsonValue) {
    let request = Request::builder()
        .method("POST")
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .expect("request");
    send(app(), request).await
}

async fn get(uri: &str) -> (StatusCode, JsonValue) {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request");
    send(app(), request).await
}

fn is_one_decimal(p: f64) -> bool {
    ((p * 10.0).round() - p * 10.0).abs() < 1e-9
}

#[tokio::test]
async fn predict_known_symptoms_with_topk() {
    let (status, body) =
        post_predict(json!({"symptoms": ["itching", "skin_rash"], "topk": 2}).to_string()).await;
    assert_eq!(status, StatusCode::OK);

    let results = body["results"].as_array().expect("results");
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["disease"], "Fungal infection");
    assert_eq!(results[0]["description"], "A fungal infection of the skin.");
    assert_eq!(
        results[0]["precautions"],
        json!(["bath twice", "keep infected area dry"])
    );
    let mut previous = f64::INFINITY;
    for result in results {
        let p = result["probability"].as_f64().expect("probability");
        assert!((0.0..=100.0).contains(&p));
        assert!(is_one_decimal(p), "{p} is not rounded to one decimal");
        assert!(p <= previous);
        previous = p;
    }

    // itching (1) + skin_rash (3)
    assert_eq!(
        body["triage"],
        json!({"level": "Amber", "reasons": ["Skin Rash", "Itching"], "score": 4.0})
    );
    assert_eq!(body["input_symptoms"], json!(["itching", "skin_rash"]));
    assert_eq!(body["unknown_symptoms"], json!([]));
}

#[tokio::test]
async fn predict_comma_separated_string_with_unknowns() {
    let (status, body) = post_predict(
        json!({"symptoms": "Chest Pain, breathlessness, purple toes, "}).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["input_symptoms"],
        json!(["Chest Pain", "breathlessness", "purple toes"])
    );
    assert_eq!(body["unknown_symptoms"], json!(["purple toes"]));
    assert_eq!(body["results"].as_array().expect("results").len(), 3);
    assert_eq!(body["results"][0]["disease"], "Heart attack");
    assert_eq!(body["results"][1]["description"], "");
    assert_eq!(body["triage"]["level"], "Red");
    assert_eq!(body["triage"]["score"], 11.0);
}

#[tokio::test]
async fn predict_unknown_only_is_unprocessable() {
    let (status, body) =
        post_predict(json!({"symptoms": ["zzz_not_a_symptom"]}).to_string()).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "no_known_symptoms");
    assert_eq!(body["unknown_symptoms"], json!(["zzz_not_a_symptom"]));
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
}

#[tokio::test]
async fn predict_empty_symptoms_is_bad_request() {
    let (status, body) = post_predict(json!({"symptoms": []}).to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
    assert!(body.get("code").is_none());
}

#[tokio::test]
async fn predict_without_json_body_is_bad_request() {
    let (status, body) = post_predict("not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = post_predict(Body::empty()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn predict_rejects_negative_topk() {
    let (status, _) =
        post_predict(json!({"symptoms": ["itching"], "topk": -1}).to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn predict_topk_zero_returns_no_results() {
    let (status, body) =
        post_predict(json!({"symptoms": ["itching"], "topk": 0}).to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"], json!([]));
    assert_eq!(body["triage"]["level"], "Green");
}

#[tokio::test]
async fn lists_symptoms_and_labels() {
    let (status, body) = get("/symptoms").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["symptoms"], json!(common::SYMPTOMS));

    let (status, body) = get("/labels").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"num_classes": 3, "classes": common::LABELS}));
}

#[tokio::test]
async fn root_reports_ok() {
    let (status, body) = get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
}

/// Backend with the fixture's shape whose inference always fails
struct FailingModel;

impl ProbabilityModel for FailingModel {
    fn predict_proba(&self, _features: &[f64]) -> Result<Vec<f64>, BackendError> {
        Err(BackendError::InferenceError("weights unavailable".into()))
    }

    fn input_dim(&self) -> usize {
        common::SYMPTOMS.len()
    }

    fn output_dim(&self) -> usize {
        common::LABELS.len()
    }

    fn backend_name(&self) -> &str {
        "failing"
    }
}

#[tokio::test]
async fn inference_failure_is_internal_server_error() {
    let checker = SymptomChecker::new(common::tables(), common::labels(), Box::new(FailingModel))
        .expect("checker");
    let request = Request::builder()
        .method("POST")
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"symptoms": ["itching"]}).to_string()))
        .expect("request");

    let (status, body) = send(router(Arc::new(checker)), request).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = body["error"].as_str().expect("error message");
    assert!(error.contains("weights unavailable"), "{error}");
    assert!(body.get("code").is_none());
}
