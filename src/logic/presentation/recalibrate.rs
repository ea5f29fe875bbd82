//! Score Recalibration
//!
//! Maps the raw model probability onto a 0-100 confidence where the
//! decision threshold always lands on 50.

use crate::constants::DEFAULT_FALLBACK_THRESHOLD;

/// Closest a threshold may get to 0 or 1
pub const THRESHOLD_EPSILON: f64 = 1e-6;

/// Force a threshold into the open interval (0, 1).
///
/// Non-finite input falls back to the default threshold.
pub fn clamp_threshold(threshold: f64) -> f64 {
    if !threshold.is_finite() {
        return DEFAULT_FALLBACK_THRESHOLD;
    }
    threshold.clamp(THRESHOLD_EPSILON, 1.0 - THRESHOLD_EPSILON)
}

/// Recalibrated display score in [0, 100] for `raw_score` in [0, 1]
pub fn recalibrate(raw_score: f64, threshold: f64) -> f64 {
    let t = clamp_threshold(threshold);

    if raw_score < t {
        (raw_score / t) * 50.0
    } else {
        50.0 + ((raw_score - t) / (1.0 - t)) * 50.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_reference_scenarios() {
        assert!(approx(recalibrate(0.35, 0.35), 50.0));
        assert!(approx(recalibrate(0.175, 0.35), 25.0));
        assert!(approx(recalibrate(0.675, 0.35), 75.0));
    }

    #[test]
    fn test_threshold_maps_to_fifty() {
        for t in [0.05, 0.2, 0.35, 0.5, 0.77, 0.99] {
            assert!(approx(recalibrate(t, t), 50.0), "t = {}", t);
        }
    }

    #[test]
    fn test_endpoints() {
        for t in [0.01, 0.35, 0.5, 0.9] {
            assert!(approx(recalibrate(0.0, t), 0.0));
            assert!(approx(recalibrate(1.0, t), 100.0));
        }
    }

    #[test]
    fn test_monotonic_on_both_branches() {
        let t = 0.35;
        let mut previous = -1.0;
        for i in 0..=100 {
            let raw = i as f64 / 100.0;
            let display = recalibrate(raw, t);
            assert!(display > previous, "not increasing at raw = {}", raw);
            if raw < t {
                assert!((0.0..50.0).contains(&display));
            } else {
                assert!((50.0..=100.0).contains(&display));
            }
            previous = display;
        }
    }

    #[test]
    fn test_degenerate_thresholds_stay_finite() {
        for t in [1.0, 0.0, -0.3, 1.7, f64::NAN, f64::INFINITY] {
            for raw in [0.0, 0.5, 1.0] {
                let display = recalibrate(raw, t);
                assert!(display.is_finite(), "t = {}, raw = {}", t, raw);
                assert!((0.0..=100.0).contains(&display));
            }
        }
    }

    #[test]
    fn test_clamp_threshold() {
        assert_eq!(clamp_threshold(0.35), 0.35);
        assert_eq!(clamp_threshold(1.0), 1.0 - THRESHOLD_EPSILON);
        assert_eq!(clamp_threshold(f64::NAN), DEFAULT_FALLBACK_THRESHOLD);
    }
}
