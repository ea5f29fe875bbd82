//! Reading validation against reference ranges.

use serde::Serialize;

use super::layout::{ReferenceRange, WaterParameter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeStatus {
    Normal,
    Low,
    High,
}

impl ReferenceRange {
    pub fn classify(&self, value: f64) -> RangeStatus {
        if value < self.min {
            RangeStatus::Low
        } else if value > self.max {
            RangeStatus::High
        } else {
            RangeStatus::Normal
        }
    }
}

/// One flagged reading, ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeFlag {
    pub param: WaterParameter,
    pub value: f64,
    pub status: RangeStatus,
}

impl RangeFlag {
    pub fn check(param: WaterParameter, value: f64) -> Self {
        Self {
            param,
            value,
            status: param.spec().range.classify(value),
        }
    }

    pub fn is_out_of_range(&self) -> bool {
        self.status != RangeStatus::Normal
    }

    /// Hint shown under the input: the violated bound, or the reference band
    pub fn hint(&self) -> String {
        let spec = self.param.spec();
        match self.status {
            RangeStatus::High => format!("High (> {})", with_unit(spec.range.max, spec.unit)),
            RangeStatus::Low => format!("Low (< {})", with_unit(spec.range.min, spec.unit)),
            RangeStatus::Normal => format!("Ref: {}", spec.range.label),
        }
    }
}

fn with_unit(bound: f64, unit: &str) -> String {
    if unit.is_empty() {
        bound.to_string()
    } else {
        format!("{} {}", bound, unit)
    }
}

/// Fixed two-decimal display used once an input loses focus
pub fn format_reading(value: f64) -> String {
    format!("{:.2}", value)
}

/// Reading with its unit, e.g. `7.00` or `200.00 mg/L`
pub fn format_with_unit(param: WaterParameter, value: f64) -> String {
    let unit = param.spec().unit;
    if unit.is_empty() {
        format_reading(value)
    } else {
        format!("{} {}", format_reading(value), unit)
    }
}
