//! Data Lab Commands
//!
//! Each CLI invocation runs one step against an existing session id.

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

use crate::error::{ClientError, Result, UserAction};
use crate::logic::backend::PredictionClient;
use crate::logic::datalab::{
    ComparisonReport, DataLabSession, DatasetPreview, EdaReport, ImputationPlan,
    ImputationStrategy, ImputeResponse, SessionId, TrainingReport,
};
use crate::ui::ViewState;

/// Written model file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelArtifact {
    pub path: PathBuf,
    pub size: usize,
    pub sha256: String,
}

/// Parse a `column=strategy` override
pub fn parse_override(raw: &str) -> Result<(String, ImputationStrategy)> {
    let (column, strategy) = raw
        .split_once('=')
        .ok_or_else(|| ClientError::InvalidInput(format!("Expected column=strategy, got {}", raw)))?;
    Ok((column.trim().to_string(), strategy.parse()?))
}

pub async fn upload(client: &PredictionClient, path: &Path) -> ViewState<DataLabSession> {
    let result = client.upload_dataset(path).await.map(|upload| {
        let mut session = DataLabSession::new();
        let name = path.file_name().map(|n| n.to_string_lossy().to_string());
        session.start(upload.session_id, name.unwrap_or_default());
        session
    });
    ViewState::from_result(result, UserAction::Upload)
}

pub async fn use_sample(client: &PredictionClient) -> ViewState<DataLabSession> {
    let result = client.use_sample_dataset().await.map(|upload| {
        let mut session = DataLabSession::new();
        session.start(upload.session_id, "water_potability.csv");
        session
    });
    ViewState::from_result(result, UserAction::UseSample)
}

pub async fn preview(client: &PredictionClient, session: SessionId) -> ViewState<DatasetPreview> {
    let result = client
        .preview(session)
        .await
        .map(|p| (!p.rows.is_empty()).then_some(p));
    ViewState::resolve(result, UserAction::Preview)
}

pub async fn analyze(client: &PredictionClient, session: SessionId) -> ViewState<EdaReport> {
    ViewState::from_result(client.eda(session).await, UserAction::Analyze)
}

/// Median for every column with nulls, then the caller's overrides
pub async fn clean(
    client: &PredictionClient,
    session: SessionId,
    overrides: &[(String, ImputationStrategy)],
) -> ViewState<ImputeResponse> {
    ViewState::from_result(run_clean(client, session, overrides).await, UserAction::Clean)
}

async fn run_clean(
    client: &PredictionClient,
    session: SessionId,
    overrides: &[(String, ImputationStrategy)],
) -> Result<ImputeResponse> {
    let report = client.eda(session).await?;
    let mut plan = ImputationPlan::default_for(&report);
    for (column, strategy) in overrides {
        plan.set(column, *strategy)?;
    }

    if plan.is_empty() {
        log::info!("No missing values, nothing to impute");
    }
    for (column, strategy) in plan.iter() {
        log::debug!("{} -> {}", column, strategy.as_str());
    }
    client.impute(session, &plan).await
}

pub async fn compare(client: &PredictionClient, session: SessionId) -> ViewState<ComparisonReport> {
    let result = client
        .compare(session)
        .await
        .map(|r| (!r.comparisons.is_empty()).then_some(r));
    ViewState::resolve(result, UserAction::Compare)
}

pub async fn train(client: &PredictionClient, session: SessionId) -> ViewState<TrainingReport> {
    ViewState::from_result(client.train(session).await, UserAction::Train)
}

/// Download the trained model to `dest`
pub async fn download(
    client: &PredictionClient,
    session: SessionId,
    dest: &Path,
) -> ViewState<ModelArtifact> {
    let result = match client.download_model(session).await {
        Ok(bytes) => save_model(dest, &bytes).await,
        Err(e) => Err(e),
    };
    ViewState::from_result(result, UserAction::Download)
}

/// Write model bytes and checksum them
pub async fn save_model(dest: &Path, bytes: &[u8]) -> Result<ModelArtifact> {
    if bytes.is_empty() {
        return Err(ClientError::contract("model download is empty"));
    }

    tokio::fs::write(dest, bytes).await?;
    let sha256 = hex::encode(Sha256::digest(bytes));
    log::info!("Model saved to {} (sha256 {})", dest.display(), sha256);

    Ok(ModelArtifact {
        path: dest.to_path_buf(),
        size: bytes.len(),
        sha256,
    })
}
