//! HTTP routes for the symptom checker

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value as JsonValue;
use tower_http::cors::{Any, CorsLayer};

use crate::checker::{CheckError, SymptomChecker};
use crate::request::{CheckResponse, SymptomRequest};

#[derive(Debug, Serialize)]
struct RootResponse {
    ok: bool,
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct SymptomsResponse<'a> {
    symptoms: &'a [String],
}

#[derive(Debug, Serialize)]
struct LabelsResponse<'a> {
    num_classes: usize,
    classes: &'a [String],
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unknown_symptoms: Option<Vec<String>>,
}

/// Build the API router over a loaded checker
pub fn router(checker: Arc<SymptomChecker>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/symptoms", get(symptoms))
        .route("/labels", get(labels))
        .route("/predict", post(predict))
        .layer(cors)
        .with_state(checker)
}

async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        ok: true,
        message: "ANN Symptom Classifier",
    })
}

async fn health() -> &'static str {
    "ok"
}

async fn symptoms(State(checker): State<Arc<SymptomChecker>>) -> Response {
    Json(SymptomsResponse {
        symptoms: checker.vocabulary().keys(),
    })
    .into_response()
}

async fn labels(State(checker): State<Arc<SymptomChecker>>) -> Response {
    let labels = checker.labels();
    Json(LabelsResponse {
        num_classes: labels.len(),
        classes: labels.as_slice(),
    })
    .into_response()
}

// The body is read raw so that a missing or non-JSON body is reported as
// missing symptoms rather than as an extractor rejection.
async fn predict(
    State(checker): State<Arc<SymptomChecker>>,
    body: Bytes,
) -> Result<Json<CheckResponse>, CheckError> {
    let payload: JsonValue = serde_json::from_slice(&body).unwrap_or(JsonValue::Null);
    let request = SymptomRequest::from_json(&payload)?;
    let response = checker.check(&request)?;
    Ok(Json(response))
}

impl IntoResponse for CheckError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, body) = match self {
            CheckError::InvalidRequest(_) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: message,
                    code: None,
                    unknown_symptoms: None,
                },
            ),
            CheckError::NoKnownSymptoms { unknown } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse {
                    error: message,
                    code: Some("no_known_symptoms"),
                    unknown_symptoms: Some(unknown),
                },
            ),
            CheckError::Inference(e) => {
                log::error!("inference failed: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: message,
                        code: None,
                        unknown_symptoms: None,
                    },
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
