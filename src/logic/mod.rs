//! Client-side logic for the water-quality service
//!
//! - `parameters` - the nine readings, units and reference ranges
//! - `prediction` - `/predict` payloads
//! - `presentation` - score recalibration, attribution ranking, captions
//! - `stats` - model stats, health and pH forecast
//! - `datalab` - AutoML session workflow
//! - `backend` - HTTP client
//! - `live` - periodic sensor polling

pub mod backend;
pub mod datalab;
pub mod live;
pub mod parameters;
pub mod prediction;
pub mod presentation;
pub mod stats;
