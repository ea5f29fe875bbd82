//! Prediction Module - `/predict` request and response types

pub mod request;
pub mod result;

pub use request::{coerce, PredictionRequest};
pub use result::{FeatureContribution, PredictionResult};
