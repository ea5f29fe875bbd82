//! Parameter Layout - Centralized Parameter Definition
//!
//! **This file controls the request schema sent to `/predict`.**
//!
//! ## Rules:
//! 1. Add parameter → increment PARAMETER_VERSION
//! 2. Change order → increment PARAMETER_VERSION
//! 3. Rename wire key → increment PARAMETER_VERSION

use crc32fast::Hasher;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// PARAMETER VERSION
// ============================================================================

/// Current parameter layout version
pub const PARAMETER_VERSION: u8 = 1;

/// Total number of parameters
pub const PARAMETER_COUNT: usize = 9;

// ============================================================================
// PARAMETER IDENTIFIERS
// ============================================================================

/// Water-quality parameters, in form order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WaterParameter {
    Ph,
    Hardness,
    Solids,
    Chloramines,
    Sulfate,
    Conductivity,
    OrganicCarbon,
    Trihalomethanes,
    Turbidity,
}

impl WaterParameter {
    pub const ALL: [WaterParameter; PARAMETER_COUNT] = [
        WaterParameter::Ph,
        WaterParameter::Hardness,
        WaterParameter::Solids,
        WaterParameter::Chloramines,
        WaterParameter::Sulfate,
        WaterParameter::Conductivity,
        WaterParameter::OrganicCarbon,
        WaterParameter::Trihalomethanes,
        WaterParameter::Turbidity,
    ];

    /// Position in the layout
    pub fn index(self) -> usize {
        self as usize
    }

    /// Static definition of this parameter
    pub fn spec(self) -> &'static ParameterSpec {
        &PARAMETER_TABLE[self.index()]
    }

    /// Key used on the wire (`ph`, `Organic_carbon`, ...)
    pub fn key(self) -> &'static str {
        self.spec().key
    }

    /// Resolve a wire key; unknown keys fail instead of rendering blank
    pub fn from_key(key: &str) -> Result<Self, ParameterError> {
        KEY_INDEX
            .get(key)
            .copied()
            .ok_or_else(|| ParameterError::UnknownKey(key.to_string()))
    }
}

impl std::fmt::Display for WaterParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.spec().label)
    }
}

// ============================================================================
// PARAMETER TABLE (Authoritative source)
// ============================================================================

/// Reference band a reading is compared against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceRange {
    pub min: f64,
    pub max: f64,
    pub label: &'static str,
}

/// Everything the UI knows about one parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSpec {
    pub param: WaterParameter,
    pub key: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub tooltip: &'static str,
    pub range: ReferenceRange,
}

pub static PARAMETER_TABLE: [ParameterSpec; PARAMETER_COUNT] = [
    ParameterSpec {
        param: WaterParameter::Ph,
        key: "ph",
        label: "ph",
        unit: "",
        tooltip: "Acidity or basicity (0-14). 7 is neutral.",
        range: ReferenceRange { min: 6.5, max: 8.5, label: "6.5 - 8.5" },
    },
    ParameterSpec {
        param: WaterParameter::Hardness,
        key: "Hardness",
        label: "Hardness",
        unit: "mg/L",
        tooltip: "Capacity of water to precipitate soap (mg/L).",
        range: ReferenceRange { min: 150.0, max: 250.0, label: "150 - 250 mg/L" },
    },
    ParameterSpec {
        param: WaterParameter::Solids,
        key: "Solids",
        label: "Solids",
        unit: "ppm",
        tooltip: "Total dissolved solids (ppm).",
        range: ReferenceRange { min: 10000.0, max: 25000.0, label: "10000 - 25000 ppm" },
    },
    ParameterSpec {
        param: WaterParameter::Chloramines,
        key: "Chloramines",
        label: "Chloramines",
        unit: "ppm",
        tooltip: "Amount of Chloramines (ppm).",
        range: ReferenceRange { min: 5.0, max: 9.0, label: "5 - 9 ppm" },
    },
    ParameterSpec {
        param: WaterParameter::Sulfate,
        key: "Sulfate",
        label: "Sulfate",
        unit: "mg/L",
        tooltip: "Dissolved sulfates (mg/L).",
        range: ReferenceRange { min: 250.0, max: 350.0, label: "250 - 350 mg/L" },
    },
    ParameterSpec {
        param: WaterParameter::Conductivity,
        key: "Conductivity",
        label: "Conductivity",
        unit: "μS/cm",
        tooltip: "Electrical conductivity (μS/cm).",
        range: ReferenceRange { min: 300.0, max: 500.0, label: "300 - 500 μS/cm" },
    },
    ParameterSpec {
        param: WaterParameter::OrganicCarbon,
        key: "Organic_carbon",
        label: "Organic carbon",
        unit: "ppm",
        tooltip: "Organic carbon content (ppm).",
        range: ReferenceRange { min: 10.0, max: 20.0, label: "10 - 20 ppm" },
    },
    ParameterSpec {
        param: WaterParameter::Trihalomethanes,
        key: "Trihalomethanes",
        label: "Trihalomethanes",
        unit: "μg/L",
        tooltip: "Chemicals found in water treated with chlorine (μg/L).",
        range: ReferenceRange { min: 50.0, max: 80.0, label: "50 - 80 μg/L" },
    },
    ParameterSpec {
        param: WaterParameter::Turbidity,
        key: "Turbidity",
        label: "Turbidity",
        unit: "NTU",
        tooltip: "Measure of light emitting property of water (NTU).",
        range: ReferenceRange { min: 3.0, max: 5.0, label: "3 - 5 NTU" },
    },
];

static KEY_INDEX: Lazy<HashMap<&'static str, WaterParameter>> = Lazy::new(|| {
    PARAMETER_TABLE.iter().map(|spec| (spec.key, spec.param)).collect()
});

// ============================================================================
// TABLE VALIDATION
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParameterError {
    #[error("Unknown parameter key: {0}")]
    UnknownKey(String),

    #[error("Parameter table slot {index} holds {found:?}")]
    OutOfOrder { index: usize, found: WaterParameter },

    #[error("Duplicate parameter key: {0}")]
    DuplicateKey(&'static str),

    #[error("Invalid reference range for {0}")]
    InvalidRange(&'static str),
}

/// Check a parameter table for ordering, key uniqueness and sane ranges
pub fn validate_table(table: &[ParameterSpec]) -> Result<(), ParameterError> {
    let mut seen = std::collections::HashSet::new();

    for (index, spec) in table.iter().enumerate() {
        if spec.param.index() != index {
            return Err(ParameterError::OutOfOrder { index, found: spec.param });
        }
        if !seen.insert(spec.key) {
            return Err(ParameterError::DuplicateKey(spec.key));
        }
        let range = spec.range;
        if !(range.min.is_finite() && range.max.is_finite() && range.min < range.max) {
            return Err(ParameterError::InvalidRange(spec.key));
        }
    }

    Ok(())
}

/// Validate the built-in table; call once at startup
pub fn init() -> Result<(), ParameterError> {
    validate_table(&PARAMETER_TABLE)?;
    log::debug!(
        "Parameter layout v{} loaded (hash: {:08x})",
        PARAMETER_VERSION,
        layout_hash()
    );
    Ok(())
}

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// CRC32 over the version and wire keys in order
pub fn layout_hash() -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[PARAMETER_VERSION]);

    for spec in &PARAMETER_TABLE {
        hasher.update(spec.key.as_bytes());
        hasher.update(&[0]);
    }

    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_is_valid() {
        assert!(init().is_ok());
        assert_eq!(PARAMETER_TABLE.len(), PARAMETER_COUNT);
    }

    #[test]
    fn test_every_parameter_has_a_slot() {
        for param in WaterParameter::ALL {
            assert_eq!(param.spec().param, param);
            assert_eq!(WaterParameter::from_key(param.key()), Ok(param));
        }
    }

    #[test]
    fn test_unknown_key_fails_fast() {
        assert_eq!(
            WaterParameter::from_key("Lead"),
            Err(ParameterError::UnknownKey("Lead".to_string()))
        );
        // Keys are case sensitive on the wire
        assert!(WaterParameter::from_key("pH").is_err());
    }

    #[test]
    fn test_out_of_order_table_rejected() {
        let mut table = PARAMETER_TABLE;
        table.swap(0, 1);
        assert!(matches!(
            validate_table(&table),
            Err(ParameterError::OutOfOrder { index: 0, .. })
        ));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let mut table = PARAMETER_TABLE;
        table[8].range = ReferenceRange { min: 5.0, max: 3.0, label: "bad" };
        assert_eq!(validate_table(&table), Err(ParameterError::InvalidRange("Turbidity")));
    }

    #[test]
    fn test_layout_hash_stable() {
        assert_eq!(layout_hash(), layout_hash());
        assert_ne!(layout_hash(), 0);
    }
}
