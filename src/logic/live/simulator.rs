//! Sensor Simulator
//!
//! Generates IoT-style readings inside each parameter's reference band,
//! with jitter and occasional spikes during "unsafe" cycles.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::logic::parameters::WaterParameter;
use crate::logic::prediction::PredictionRequest;

/// Absolute jitter added to every value
const JITTER: f64 = 0.5;

/// Chance that a value spikes during an unsafe cycle
const SPIKE_PROBABILITY: f64 = 0.3;

/// Share of cycles that are normal
const SAFE_CYCLE_PROBABILITY: f64 = 0.7;

#[derive(Debug)]
pub struct SensorSimulator {
    rng: StdRng,
}

impl Default for SensorSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorSimulator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible stream
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// One reading; spikes (×0.5 or ×1.5) only when `is_safe` is false
    pub fn reading(&mut self, is_safe: bool) -> PredictionRequest {
        let mut request = PredictionRequest::default();

        for param in WaterParameter::ALL {
            let range = param.spec().range;
            let mut value = self.rng.gen_range(range.min..=range.max);
            value += self.rng.gen_range(-JITTER..=JITTER);

            if !is_safe && self.rng.gen_bool(SPIKE_PROBABILITY) {
                value *= if self.rng.gen_bool(0.5) { 0.5 } else { 1.5 };
            }

            request.set(param, round2(value));
        }

        request
    }

    /// Next reading with a randomly drawn cycle
    pub fn next_reading(&mut self) -> PredictionRequest {
        let is_safe = self.rng.gen_bool(SAFE_CYCLE_PROBABILITY);
        self.reading(is_safe)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
