//! In-process stand-in for the prediction backend, used by tests.

use axum::{
    extract::{Multipart, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::config::ClientConfig;
use crate::logic::backend::PredictionClient;

pub const SESSION: &str = "5f0c6a8e-2b1d-4c57-9a43-1d2f7e9b8c10";
pub const MODEL_BYTES: &[u8] = b"pickled-model";
pub const THRESHOLD: f64 = 0.4;

/// Start the stub on an ephemeral port; returns its base URL
pub async fn spawn() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router()).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Client wired to a fresh stub
pub async fn client() -> PredictionClient {
    let url = spawn().await;
    PredictionClient::new(ClientConfig::default().with_api_url(url)).unwrap()
}

fn router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/predict", post(predict))
        .route("/stats", get(stats))
        .route("/sample", get(sample))
        .route("/predict-ph", post(forecast))
        .route("/api/datalab/upload", post(upload))
        .route("/api/datalab/use_sample", post(use_sample))
        .route("/api/datalab/preview/:session_id", get(preview))
        .route("/api/datalab/eda/:session_id", get(eda))
        .route("/api/datalab/impute/:session_id", post(impute))
        .route("/api/datalab/compare/:session_id", get(compare))
        .route("/api/datalab/train/:session_id", post(train))
        .route("/api/datalab/download_model/:session_id", get(download_model))
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

fn known(session_id: &str) -> Result<(), Response> {
    if session_id == SESSION {
        Ok(())
    } else {
        Err(detail(StatusCode::NOT_FOUND, "Session not found"))
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "model_loaded": true, "version": "2.0.0" }))
}

async fn predict(Json(body): Json<Value>) -> Response {
    let Some(ph) = body.get("ph").and_then(Value::as_f64) else {
        return detail(StatusCode::UNPROCESSABLE_ENTITY, "ph is required");
    };

    let is_potable = (6.5..=8.5).contains(&ph);
    let (score, status, ph_impact) = if is_potable {
        (0.7, "Potable", 0.08)
    } else {
        (0.2, "Not Potable", -0.21)
    };
    Json(json!({
        "is_potable": is_potable,
        "potability_score": score,
        "threshold_used": THRESHOLD,
        "status": status,
        "explanation": [
            { "feature": "Sulfate", "value": body["Sulfate"], "contribution": 0.12 },
            { "feature": "ph", "value": ph, "contribution": ph_impact },
            { "feature": "Turbidity", "value": body["Turbidity"], "contribution": -0.03 }
        ]
    }))
    .into_response()
}

async fn stats() -> Json<Value> {
    Json(json!({
        "r2_score": 0.62,
        "rmse": 0.31,
        "recall_optimized": 0.83,
        "model_name": "XGBoost (optimized)",
        "feature_importance": [
            { "feature": "Sulfate", "importance": 0.14 },
            { "feature": "ph", "importance": 0.13 }
        ]
    }))
}

async fn sample() -> Json<Value> {
    Json(json!({
        "ph": 7.2, "Hardness": 196.4, "Solids": 21000.0, "Chloramines": 7.1,
        "Sulfate": 333.0, "Conductivity": 420.5, "Organic_carbon": 14.2,
        "Trihalomethanes": 66.4, "Turbidity": 3.9
    }))
}

async fn forecast(Json(body): Json<Value>) -> Json<Value> {
    let history: Vec<f64> = body["ph_history"]
        .as_array()
        .map(|a| a.iter().filter_map(Value::as_f64).collect())
        .unwrap_or_default();
    let last = history.last().copied().unwrap_or(7.0);
    Json(json!({ "predicted_ph": last + 0.1, "trend": "increasing", "confidence": 0.9 }))
}

async fn upload(mut multipart: Multipart) -> Response {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let name = field.file_name().unwrap_or_default().to_string();
        if !name.ends_with(".csv") {
            return detail(StatusCode::BAD_REQUEST, "Only CSV files are allowed.");
        }
        let bytes = field.bytes().await.unwrap_or_default();
        if bytes.is_empty() {
            return detail(StatusCode::BAD_REQUEST, "Uploaded file is empty.");
        }
        return Json(json!({ "session_id": SESSION, "message": format!("{} uploaded", name) }))
            .into_response();
    }
    detail(StatusCode::BAD_REQUEST, "No file provided.")
}

async fn use_sample() -> Json<Value> {
    Json(json!({ "session_id": SESSION }))
}

async fn preview(Path(session_id): Path<String>) -> Response {
    if let Err(e) = known(&session_id) {
        return e;
    }
    Json(json!({
        "columns": ["ph", "Sulfate", "Potability"],
        "rows": [[7.1, 330.2, 0], [null, 310.0, 1]]
    }))
    .into_response()
}

async fn eda(Path(session_id): Path<String>) -> Response {
    if let Err(e) = known(&session_id) {
        return e;
    }
    Json(json!({
        "total_rows": 2,
        "total_columns": 3,
        "columns": ["ph", "Sulfate", "Potability"],
        "null_counts": { "ph": 1, "Sulfate": 0, "Potability": 0 },
        "description": { "Sulfate": { "mean": 320.1 } },
        "histograms": { "Sulfate": [{ "name": "300-340", "count": 2 }] }
    }))
    .into_response()
}

async fn impute(Path(session_id): Path<String>, Json(plan): Json<Value>) -> Response {
    if let Err(e) = known(&session_id) {
        return e;
    }
    let remaining = if plan.get("ph").is_some() { 0 } else { 1 };
    Json(json!({
        "message": "Imputation successful",
        "remaining_nulls": { "ph": remaining, "Sulfate": 0, "Potability": 0 },
        "cleaned_file": "cleaned.csv"
    }))
    .into_response()
}

async fn compare(Path(session_id): Path<String>) -> Response {
    if let Err(e) = known(&session_id) {
        return e;
    }
    Json(json!({
        "comparisons": { "ph": [{ "name": "7.0-7.5", "Raw": 1, "Cleaned": 2 }] }
    }))
    .into_response()
}

async fn train(Path(session_id): Path<String>) -> Response {
    if let Err(e) = known(&session_id) {
        return e;
    }
    Json(json!({
        "accuracy": 0.68,
        "f1_score": 0.61,
        "precision": 0.66,
        "recall": 0.57,
        "confusion_matrix": [[350, 62], [146, 98]],
        "feature_importance": [{ "feature": "Sulfate", "importance": 0.2 }],
        "target": "Potability",
        "roc_curve": [{ "fpr": 0.0, "tpr": 0.0 }, { "fpr": 1.0, "tpr": 1.0 }]
    }))
    .into_response()
}

async fn download_model(Path(session_id): Path<String>) -> Response {
    if let Err(e) = known(&session_id) {
        return e;
    }
    (StatusCode::OK, MODEL_BYTES.to_vec()).into_response()
}
