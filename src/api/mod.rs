//! API Module
//!
//! Command layer between the CLI and the client logic. Each command runs
//! one backend action and resolves it into a `ViewState`.
//!
//! Structure:
//! - commands.rs: prediction, sample, stats, health, pH forecast
//! - datalab.rs: Data Lab steps and model download

pub mod commands;
pub mod datalab;

pub use commands::*;
