//! Caption Synthesis
//!
//! One sentence explaining a verdict from the leading factors.

use serde::Serialize;

use super::ranking::AttributionRanking;

/// Stand-in when an unsafe verdict has no negative factor to name
pub const NEUTRAL_FACTOR: &str = "other parameter";

/// Factors named per list
const MAX_NAMED: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Caption {
    Inconclusive,
    SafeDespite { negative: Vec<String> },
    SafeClean,
    UnsafeDespite { positive: Vec<String>, culprit: String },
    UnsafeMultiple,
}

impl Caption {
    /// Pick the template for a verdict.
    ///
    /// An empty explanation wins over the verdict.
    pub fn synthesize(
        is_potable: bool,
        explanation_empty: bool,
        positive: &[String],
        negative: &[String],
    ) -> Self {
        if explanation_empty {
            return Caption::Inconclusive;
        }

        match (is_potable, positive.is_empty(), negative.is_empty()) {
            (true, _, false) => Caption::SafeDespite {
                negative: leading(negative),
            },
            (true, _, true) => Caption::SafeClean,
            (false, false, _) => Caption::UnsafeDespite {
                positive: leading(positive),
                culprit: negative
                    .first()
                    .cloned()
                    .unwrap_or_else(|| NEUTRAL_FACTOR.to_string()),
            },
            (false, true, _) => Caption::UnsafeMultiple,
        }
    }

    pub fn from_ranking(is_potable: bool, ranking: &AttributionRanking) -> Self {
        Self::synthesize(
            is_potable,
            ranking.is_empty(),
            &ranking.positive_factors,
            &ranking.negative_factors,
        )
    }

    pub fn text(&self) -> String {
        match self {
            Caption::Inconclusive => "The water quality analysis is inconclusive.".to_string(),
            Caption::SafeDespite { negative } => format!(
                "Although {} negatively impacted the score, the overall quality remains within safe limits.",
                negative.join(" and ")
            ),
            Caption::SafeClean => {
                "All major quality indicators suggest this water is safe for consumption.".to_string()
            }
            Caption::UnsafeDespite { positive, culprit } => format!(
                "Despite good levels of {}, the {} levels make this unsafe.",
                positive.join(" and "),
                culprit
            ),
            Caption::UnsafeMultiple => {
                "Multiple critical quality parameters exceed safe limits.".to_string()
            }
        }
    }
}

impl std::fmt::Display for Caption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text())
    }
}

fn leading(names: &[String]) -> Vec<String> {
    names.iter().take(MAX_NAMED).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_explanation_wins() {
        let caption = Caption::synthesize(true, true, &[], &[]);
        assert_eq!(caption.text(), "The water quality analysis is inconclusive.");
        let caption = Caption::synthesize(false, true, &names(&["ph"]), &[]);
        assert_eq!(caption, Caption::Inconclusive);
    }

    #[test]
    fn test_safe_with_negatives_names_two() {
        let caption = Caption::synthesize(true, false, &[], &names(&["ph", "Sulfate", "Solids"]));
        assert_eq!(
            caption.text(),
            "Although ph and Sulfate negatively impacted the score, the overall quality remains within safe limits."
        );
    }

    #[test]
    fn test_safe_single_negative() {
        let caption = Caption::synthesize(true, false, &names(&["Hardness"]), &names(&["Turbidity"]));
        assert_eq!(
            caption.text(),
            "Although Turbidity negatively impacted the score, the overall quality remains within safe limits."
        );
    }

    #[test]
    fn test_safe_clean() {
        let caption = Caption::synthesize(true, false, &names(&["ph"]), &[]);
        assert_eq!(
            caption.text(),
            "All major quality indicators suggest this water is safe for consumption."
        );
    }

    #[test]
    fn test_unsafe_despite() {
        let caption = Caption::synthesize(
            false,
            false,
            &names(&["Hardness", "Chloramines", "ph"]),
            &names(&["Sulfate", "Solids"]),
        );
        assert_eq!(
            caption.text(),
            "Despite good levels of Hardness and Chloramines, the Sulfate levels make this unsafe."
        );
    }

    #[test]
    fn test_unsafe_positive_only_does_not_panic() {
        let caption = Caption::synthesize(false, false, &names(&["pH"]), &[]);
        assert_eq!(
            caption.text(),
            "Despite good levels of pH, the other parameter levels make this unsafe."
        );
    }

    #[test]
    fn test_unsafe_multiple() {
        let caption = Caption::synthesize(false, false, &[], &names(&["ph"]));
        assert_eq!(
            caption.text(),
            "Multiple critical quality parameters exceed safe limits."
        );
    }
}
