use serde::Serialize;

use crate::logic::prediction::FeatureContribution;

/// Leading attributions split by sign
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AttributionRanking {
    pub top_features: Vec<FeatureContribution>,
    pub positive_factors: Vec<String>,
    pub negative_factors: Vec<String>,
}

impl AttributionRanking {
    pub fn is_empty(&self) -> bool {
        self.top_features.is_empty()
    }
}

/// Take the first `limit` attributions as delivered and partition them.
///
/// The backend already orders attributions by impact; no re-sorting here.
/// Zero contributions count as neither positive nor negative.
pub fn rank(explanation: &[FeatureContribution], limit: usize) -> AttributionRanking {
    let top_features: Vec<FeatureContribution> =
        explanation.iter().take(limit).cloned().collect();

    let positive_factors = top_features
        .iter()
        .filter(|f| f.contribution > 0.0)
        .map(|f| f.feature.clone())
        .collect();

    let negative_factors = top_features
        .iter()
        .filter(|f| f.contribution < 0.0)
        .map(|f| f.feature.clone())
        .collect();

    AttributionRanking {
        top_features,
        positive_factors,
        negative_factors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contributions(values: &[(&str, f64)]) -> Vec<FeatureContribution> {
        values
            .iter()
            .map(|(name, c)| FeatureContribution::new(*name, 1.0, *c))
            .collect()
    }

    #[test]
    fn test_eight_entries_yield_five_in_order() {
        let explanation = contributions(&[
            ("Sulfate", 0.3),
            ("ph", -0.2),
            ("Hardness", 0.1),
            ("Solids", -0.05),
            ("Turbidity", 0.04),
            ("Chloramines", -0.03),
            ("Conductivity", 0.02),
            ("Organic_carbon", 0.01),
        ]);

        let ranking = rank(&explanation, 5);
        let names: Vec<&str> = ranking.top_features.iter().map(|f| f.feature.as_str()).collect();
        assert_eq!(names, vec!["Sulfate", "ph", "Hardness", "Solids", "Turbidity"]);
        assert_eq!(ranking.positive_factors, vec!["Sulfate", "Hardness", "Turbidity"]);
        assert_eq!(ranking.negative_factors, vec!["ph", "Solids"]);
    }

    #[test]
    fn test_short_input_and_no_resort() {
        // Deliberately unsorted by magnitude
        let explanation = contributions(&[("Turbidity", 0.01), ("Sulfate", -0.9)]);
        let ranking = rank(&explanation, 5);
        assert_eq!(ranking.top_features.len(), 2);
        assert_eq!(ranking.top_features[0].feature, "Turbidity");
    }

    #[test]
    fn test_zero_contribution_is_neutral() {
        let ranking = rank(&contributions(&[("ph", 0.0)]), 5);
        assert!(ranking.positive_factors.is_empty());
        assert!(ranking.negative_factors.is_empty());
        assert!(!ranking.is_empty());
    }

    #[test]
    fn test_empty() {
        assert!(rank(&[], 5).is_empty());
    }
}
