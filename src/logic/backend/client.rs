//! Prediction API Client
//!
//! HTTP client for the water-quality prediction backend.

use reqwest::multipart::{Form, Part};
use reqwest::Response;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::logic::datalab::{
    ensure_csv, ComparisonReport, DatasetPreview, EdaReport, ImputationPlan, ImputeResponse,
    SessionId, TrainingReport, UploadResponse,
};
use crate::logic::prediction::{PredictionRequest, PredictionResult};
use crate::logic::stats::{HealthStatus, ModelStats, PhForecast, PhForecastRequest};

/// Prediction backend client
#[derive(Debug, Clone)]
pub struct PredictionClient {
    config: ClientConfig,
    http_client: reqwest::Client,
}

impl PredictionClient {
    /// Create new client
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, http_client })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Check server health
    pub async fn health(&self) -> Result<HealthStatus> {
        let response = self.http_client.get(self.config.endpoint("/health")).send().await?;
        decode(response).await
    }

    /// Classify one set of readings
    pub async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult> {
        log::debug!("POST /predict ph={} turbidity={}", request.ph, request.turbidity);

        let response = self
            .http_client
            .post(self.config.endpoint("/predict"))
            .json(request)
            .send()
            .await?;

        let result: PredictionResult = decode(response).await?;
        log::info!(
            "Prediction: potable={} score={:.3}",
            result.is_potable,
            result.potability_score
        );
        Ok(result)
    }

    /// Global model statistics
    pub async fn stats(&self) -> Result<ModelStats> {
        let response = self.http_client.get(self.config.endpoint("/stats")).send().await?;
        let stats: ModelStats = decode(response).await?;
        stats.validate()?;
        Ok(stats)
    }

    /// Random readings for auto-fill
    pub async fn sample(&self) -> Result<PredictionRequest> {
        let response = self.http_client.get(self.config.endpoint("/sample")).send().await?;
        decode(response).await
    }

    /// Random readings, or the built-in sample if the backend fails
    pub async fn sample_or_fallback(&self) -> PredictionRequest {
        match self.sample().await {
            Ok(sample) => sample,
            Err(e) => {
                log::warn!("Sample fetch failed, using fallback: {}", e);
                PredictionRequest::fallback_sample()
            }
        }
    }

    /// Next pH from a short history
    pub async fn forecast_ph(&self, request: &PhForecastRequest) -> Result<PhForecast> {
        let response = self
            .http_client
            .post(self.config.endpoint("/predict-ph"))
            .json(request)
            .send()
            .await?;
        decode(response).await
    }

    // ========== Data Lab ==========

    /// Upload a CSV file and open a session
    pub async fn upload_dataset(&self, path: &Path) -> Result<UploadResponse> {
        ensure_csv(path)?;

        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "dataset.csv".to_string());

        log::info!("Uploading {} ({} bytes)", file_name, bytes.len());

        let part = Part::bytes(bytes).file_name(file_name).mime_str("text/csv")?;
        let form = Form::new().part("file", part);

        let response = self
            .http_client
            .post(self.config.datalab_endpoint("/upload"))
            .multipart(form)
            .send()
            .await?;

        let upload: UploadResponse = decode(response).await?;
        log::info!("Dataset session created: {}", upload.session_id);
        Ok(upload)
    }

    /// Open a session on the backend's bundled sample dataset
    pub async fn use_sample_dataset(&self) -> Result<UploadResponse> {
        let response = self
            .http_client
            .post(self.config.datalab_endpoint("/use_sample"))
            .send()
            .await?;
        decode(response).await
    }

    pub async fn preview(&self, session: SessionId) -> Result<DatasetPreview> {
        let preview: DatasetPreview = self.get_session("preview", session).await?;
        preview.validate()?;
        Ok(preview)
    }

    pub async fn eda(&self, session: SessionId) -> Result<EdaReport> {
        let report: EdaReport = self.get_session("eda", session).await?;
        report.validate()?;
        Ok(report)
    }

    pub async fn impute(&self, session: SessionId, plan: &ImputationPlan) -> Result<ImputeResponse> {
        let url = self.config.datalab_endpoint(&format!("/impute/{}", session));
        let response = self.http_client.post(url).json(plan).send().await?;
        let result: ImputeResponse = decode(response).await?;
        log::info!("Imputation applied: {}", result.message);
        Ok(result)
    }

    pub async fn compare(&self, session: SessionId) -> Result<ComparisonReport> {
        let report: ComparisonReport = self.get_session("compare", session).await?;
        report.validate()?;
        Ok(report)
    }

    pub async fn train(&self, session: SessionId) -> Result<TrainingReport> {
        let url = self.config.datalab_endpoint(&format!("/train/{}", session));
        let response = self.http_client.post(url).send().await?;
        let report: TrainingReport = decode(response).await?;
        report.validate()?;
        log::info!(
            "Model trained on target {}: accuracy={:.3} f1={:.3}",
            report.target,
            report.accuracy,
            report.f1_score
        );
        Ok(report)
    }

    /// Raw bytes of the trained model artifact
    pub async fn download_model(&self, session: SessionId) -> Result<Vec<u8>> {
        let url = self.config.datalab_endpoint(&format!("/download_model/{}", session));
        let response = check_status(self.http_client.get(url).send().await?).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn get_session<T: DeserializeOwned>(&self, route: &str, session: SessionId) -> Result<T> {
        let url = self.config.datalab_endpoint(&format!("/{}/{}", route, session));
        let response = self.http_client.get(url).send().await?;
        decode(response).await
    }
}

/// Non-2xx → `ClientError::Server` with the backend's `detail`, if any
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("detail").cloned())
        .map(|d| match d {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        });

    log::error!("Backend returned {}: {}", status.as_u16(), body);
    Err(ClientError::Server {
        status: status.as_u16(),
        detail,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let response = check_status(response).await?;
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}
