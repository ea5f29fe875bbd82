//! Live Module - Periodic sensor polling
//!
//! - `simulator` - local reading generator
//! - `monitor` - cancellable fetch → predict loop

pub mod monitor;
pub mod simulator;


pub use monitor::{LiveMonitor, LiveUpdate, ReadingSource};
pub use simulator::SensorSimulator;
