//! Presentation Module - Prediction → view model
//!
//! - `recalibrate` - threshold-anchored confidence
//! - `ranking` - top attributions split by sign
//! - `caption` - templated explanation sentence
//! - `view` - the composed `ResultPresentation`

pub mod caption;
pub mod ranking;
pub mod recalibrate;
pub mod view;

pub use caption::Caption;
pub use ranking::{rank, AttributionRanking};
pub use recalibrate::{clamp_threshold, recalibrate};
pub use view::ResultPresentation;
