//! Parameters Module - Static parameter definitions
//!
//! Units, tooltips and reference ranges keyed by `WaterParameter`.

pub mod layout;
pub mod range;

pub use layout::{
    init, layout_hash, ParameterError, ParameterSpec, ReferenceRange, WaterParameter,
    PARAMETER_COUNT, PARAMETER_VERSION,
};
pub use range::{format_reading, format_with_unit, RangeFlag, RangeStatus};
