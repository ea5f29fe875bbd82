//! Model statistics, health and pH forecast payloads.

use serde::{Deserialize, Serialize};

use crate::constants::{BASELINE_RECALL_PERCENT, R2_TARGET_PERCENT, TOP_IMPORTANCES};
use crate::error::{ClientError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

/// `GET /stats`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelStats {
    pub r2_score: f64,
    #[serde(default)]
    pub rmse: Option<f64>,
    pub recall_optimized: f64,
    pub model_name: String,
    #[serde(default)]
    pub feature_importance: Vec<FeatureImportance>,
}

impl ModelStats {
    pub fn validate(&self) -> Result<()> {
        if !self.r2_score.is_finite() || self.r2_score > 1.0 {
            return Err(ClientError::contract(format!("r2_score out of range: {}", self.r2_score)));
        }
        if !(0.0..=1.0).contains(&self.recall_optimized) {
            return Err(ClientError::contract(format!(
                "recall_optimized out of range: {}",
                self.recall_optimized
            )));
        }
        if let Some(item) = self.feature_importance.iter().find(|i| !i.importance.is_finite()) {
            return Err(ClientError::contract(format!("non-finite importance for {}", item.feature)));
        }
        Ok(())
    }
}

/// One bar of a comparison chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonBar {
    pub name: &'static str,
    pub value: f64,
}

/// Dashboard view of `ModelStats`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsDashboard {
    pub model_name: String,
    pub r2_bars: [ComparisonBar; 2],
    pub recall_bars: [ComparisonBar; 2],
    pub top_importances: Vec<FeatureImportance>,
}

impl StatsDashboard {
    pub fn build(stats: &ModelStats) -> Self {
        Self {
            model_name: stats.model_name.clone(),
            r2_bars: [
                ComparisonBar { name: "R2 Score", value: stats.r2_score * 100.0 },
                ComparisonBar { name: "Target", value: R2_TARGET_PERCENT },
            ],
            recall_bars: [
                ComparisonBar { name: "Recall", value: stats.recall_optimized * 100.0 },
                ComparisonBar { name: "Baseline", value: BASELINE_RECALL_PERCENT },
            ],
            top_importances: stats
                .feature_importance
                .iter()
                .take(TOP_IMPORTANCES)
                .cloned()
                .collect(),
        }
    }

    pub fn r2_percent(&self) -> f64 {
        self.r2_bars[0].value
    }

    pub fn recall_percent(&self) -> f64 {
        self.recall_bars[0].value
    }
}

/// `GET /health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub model_loaded: bool,
    pub version: String,
}

/// Longest history `/predict-ph` accepts
pub const MAX_PH_HISTORY: usize = 30;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhForecastRequest {
    pub ph_history: Vec<f64>,
}

impl PhForecastRequest {
    pub fn new(ph_history: Vec<f64>) -> Result<Self> {
        if ph_history.is_empty() || ph_history.len() > MAX_PH_HISTORY {
            return Err(ClientError::InvalidInput(format!(
                "pH history needs 1 to {} readings, got {}",
                MAX_PH_HISTORY,
                ph_history.len()
            )));
        }
        Ok(Self { ph_history })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhTrend {
    Stable,
    Increasing,
    Decreasing,
}

/// `POST /predict-ph`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhForecast {
    pub predicted_ph: f64,
    pub trend: PhTrend,
    pub confidence: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stats() -> ModelStats {
        let importances: Vec<serde_json::Value> = (0..9)
            .map(|i| json!({"feature": format!("f{}", i), "importance": 0.1}))
            .collect();
        serde_json::from_value(json!({
            "r2_score": 0.8329,
            "rmse": 0.012,
            "recall_optimized": 0.9,
            "model_name": "Random Forest (Balanced)",
            "feature_importance": importances
        }))
        .unwrap()
    }

    #[test]
    fn test_dashboard_bars() {
        let dashboard = StatsDashboard::build(&stats());
        assert!((dashboard.r2_percent() - 83.29).abs() < 1e-9);
        assert!((dashboard.recall_percent() - 90.0).abs() < 1e-9);
        assert_eq!(dashboard.r2_bars[1].value, 80.0);
        assert_eq!(dashboard.recall_bars[1].value, 65.0);
        assert_eq!(dashboard.top_importances.len(), 7);
    }

    #[test]
    fn test_validate_rejects_bad_recall() {
        let mut bad = stats();
        bad.recall_optimized = 1.4;
        assert!(matches!(bad.validate(), Err(ClientError::Contract { .. })));
        assert!(stats().validate().is_ok());
    }

    #[test]
    fn test_ph_history_bounds() {
        assert!(PhForecastRequest::new(vec![]).is_err());
        assert!(PhForecastRequest::new(vec![7.0; 31]).is_err());
        assert!(PhForecastRequest::new(vec![7.0; 7]).is_ok());
    }

    #[test]
    fn test_forecast_trend_wire_name() {
        let forecast: PhForecast = serde_json::from_value(json!({
            "predicted_ph": 7.12, "trend": "increasing", "confidence": 0.8
        }))
        .unwrap();
        assert_eq!(forecast.trend, PhTrend::Increasing);
    }
}
