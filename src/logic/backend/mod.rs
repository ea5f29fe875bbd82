//! Backend Module - HTTP access to the prediction service
//!
//! One client covers the prediction endpoints and the Data Lab routes.

pub mod client;

#[cfg(test)]
pub(crate) mod stub;

pub use client::PredictionClient;
