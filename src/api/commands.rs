//! Prediction Commands
//!
//! One call per user action; no retry.

use crate::error::UserAction;
use crate::logic::backend::PredictionClient;
use crate::logic::prediction::PredictionRequest;
use crate::logic::presentation::ResultPresentation;
use crate::logic::stats::{HealthStatus, PhForecast, PhForecastRequest, StatsDashboard};
use crate::ui::ViewState;

/// Submit readings and build the result view
pub async fn predict(client: &PredictionClient, request: &PredictionRequest) -> ViewState<ResultPresentation> {
    let fallback = client.config().fallback_threshold;
    let result = client
        .predict(request)
        .await
        .map(|r| ResultPresentation::build(&r, fallback));
    ViewState::from_result(result, UserAction::Predict)
}

/// Random readings for the form; never fails
pub async fn sample(client: &PredictionClient) -> PredictionRequest {
    client.sample_or_fallback().await
}

/// Model dashboard; empty when the backend reports no model name
pub async fn stats(client: &PredictionClient) -> ViewState<StatsDashboard> {
    let dashboard = client
        .stats()
        .await
        .map(|s| (!s.model_name.is_empty()).then(|| StatsDashboard::build(&s)));
    ViewState::resolve(dashboard, UserAction::Stats)
}

pub async fn health(client: &PredictionClient) -> ViewState<HealthStatus> {
    ViewState::from_result(client.health().await, UserAction::Health)
}

pub async fn forecast(client: &PredictionClient, history: Vec<f64>) -> ViewState<PhForecast> {
    let result = match PhForecastRequest::new(history) {
        Ok(request) => client.forecast_ph(&request).await,
        Err(e) => Err(e),
    };
    ViewState::from_result(result, UserAction::Forecast)
}
