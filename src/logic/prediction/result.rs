//! Prediction result as returned by `POST /predict`.

use serde::{Deserialize, Deserializer, Serialize};

/// Signed per-feature attribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureContribution {
    pub feature: String,
    pub value: f64,
    pub contribution: f64,
}

impl FeatureContribution {
    pub fn new(feature: impl Into<String>, value: f64, contribution: f64) -> Self {
        Self {
            feature: feature.into(),
            value,
            contribution,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub is_potable: bool,
    pub potability_score: f64,

    /// `None` when the backend omitted it or sent something non-numeric
    #[serde(default, deserialize_with = "lenient_f64")]
    pub threshold_used: Option<f64>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub explanation: Vec<FeatureContribution>,
}

impl PredictionResult {
    /// Threshold to recalibrate against: the backend's, else `fallback`
    pub fn effective_threshold(&self, fallback: f64) -> f64 {
        self.threshold_used.unwrap_or(fallback)
    }

    /// `is_potable == (score >= threshold)`; informational only
    pub fn is_consistent(&self, fallback: f64) -> bool {
        self.is_potable == (self.potability_score >= self.effective_threshold(fallback))
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64().filter(|v| v.is_finite()))
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_payload() {
        let result: PredictionResult = serde_json::from_value(json!({
            "potability_score": 0.62,
            "is_potable": true,
            "status": "Potable",
            "threshold_used": 0.4,
            "explanation": [
                {"feature": "Sulfate", "value": 333.0, "contribution": 0.12},
                {"feature": "ph", "value": 5.1, "contribution": -0.08}
            ]
        }))
        .unwrap();

        assert_eq!(result.threshold_used, Some(0.4));
        assert_eq!(result.explanation.len(), 2);
        assert_eq!(result.explanation[1].feature, "ph");
        assert!(result.is_consistent(0.35));
    }

    #[test]
    fn test_missing_threshold_uses_fallback() {
        let result: PredictionResult = serde_json::from_value(json!({
            "potability_score": 0.2,
            "is_potable": false
        }))
        .unwrap();

        assert_eq!(result.threshold_used, None);
        assert_eq!(result.effective_threshold(0.35), 0.35);
        assert!(result.explanation.is_empty());
    }

    #[test]
    fn test_malformed_threshold_uses_fallback() {
        let result: PredictionResult = serde_json::from_value(json!({
            "potability_score": 0.2,
            "is_potable": false,
            "threshold_used": "0.5",
            "explanation": null
        }))
        .unwrap();

        assert_eq!(result.threshold_used, None);
        assert_eq!(result.effective_threshold(0.3), 0.3);
        assert!(result.explanation.is_empty());
    }

    #[test]
    fn test_inconsistent_result_detected() {
        let result = PredictionResult {
            is_potable: true,
            potability_score: 0.1,
            threshold_used: Some(0.35),
            status: None,
            explanation: vec![],
        };
        assert!(!result.is_consistent(0.35));
    }
}
