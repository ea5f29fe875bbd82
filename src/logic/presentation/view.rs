use serde::Serialize;

use crate::constants::TOP_FEATURES;
use crate::logic::prediction::{FeatureContribution, PredictionResult};

use super::caption::Caption;
use super::ranking::rank;
use super::recalibrate::{clamp_threshold, recalibrate};

/// Render-ready view of one prediction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultPresentation {
    pub display_score: f64,
    pub raw_score: f64,
    pub threshold: f64,
    pub top_features: Vec<FeatureContribution>,
    pub caption: Caption,
    pub is_safe: bool,
}

impl ResultPresentation {
    pub fn build(result: &PredictionResult, fallback_threshold: f64) -> Self {
        if !result.is_consistent(fallback_threshold) {
            log::debug!(
                "Verdict disagrees with score {:.3} vs threshold {:?}",
                result.potability_score,
                result.threshold_used
            );
        }

        let threshold = clamp_threshold(result.effective_threshold(fallback_threshold));
        let ranking = rank(&result.explanation, TOP_FEATURES);
        let caption = Caption::from_ranking(result.is_potable, &ranking);

        Self {
            display_score: recalibrate(result.potability_score, threshold),
            raw_score: result.potability_score,
            threshold,
            top_features: ranking.top_features,
            caption,
            is_safe: result.is_potable,
        }
    }

    pub fn headline(&self) -> &'static str {
        if self.is_safe {
            "Water is Safe"
        } else {
            "Not Potable"
        }
    }

    pub fn caption_text(&self) -> String {
        self.caption.text()
    }
}
