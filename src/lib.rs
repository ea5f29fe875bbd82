//! Water Quality AI - Prediction Console
//!
//! Client for a remote water-potability service: submits the nine sensor
//! readings, recalibrates the returned score around the decision threshold,
//! explains it from the leading feature attributions, and drives the
//! Data Lab AutoML workflow.

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod logic;
pub mod ui;

pub use config::ClientConfig;
pub use error::{ClientError, Result, UserAction};
pub use logic::backend::PredictionClient;
pub use logic::presentation::ResultPresentation;
