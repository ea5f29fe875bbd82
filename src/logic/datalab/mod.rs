//! Data Lab Module - AutoML workflow client state
//!
//! The backend owns datasets and models; this side holds the session,
//! the imputation plan and the validated responses.

pub mod types;
pub mod workflow;


pub use types::{
    ComparisonBin, ComparisonReport, DatasetPreview, EdaReport, HistogramBin,
    ImputationPlan, ImputationStrategy, ImputeResponse, RocPoint, SessionId, TrainingReport,
    UploadResponse,
};
pub use workflow::{ensure_csv, DataLabSession, LabStep};
