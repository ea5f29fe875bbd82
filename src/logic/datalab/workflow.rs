//! Data Lab Workflow
//!
//! Upload → Analyze → Clean → Verify → Train. The session id is issued on
//! upload; the only backward move is Verify → Clean.

use serde::Serialize;
use std::path::Path;

use super::types::SessionId;
use crate::error::{ClientError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LabStep {
    Upload,
    Analyze,
    Clean,
    Verify,
    Train,
}

impl LabStep {
    pub const ALL: [LabStep; 5] = [
        LabStep::Upload,
        LabStep::Analyze,
        LabStep::Clean,
        LabStep::Verify,
        LabStep::Train,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LabStep::Upload => "Upload",
            LabStep::Analyze => "Analyze",
            LabStep::Clean => "Clean",
            LabStep::Verify => "Verify",
            LabStep::Train => "Train",
        }
    }

    pub fn next(self) -> Option<LabStep> {
        Self::ALL.get(self as usize + 1).copied()
    }

    /// Whether this step lies behind `current`
    pub fn is_completed(self, current: LabStep) -> bool {
        self < current
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataLabSession {
    session_id: Option<SessionId>,
    filename: Option<String>,
    step: LabStep,
}

impl Default for DataLabSession {
    fn default() -> Self {
        Self {
            session_id: None,
            filename: None,
            step: LabStep::Upload,
        }
    }
}

impl DataLabSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume an existing backend session at `step`
    pub fn resume(session_id: SessionId, step: LabStep) -> Self {
        Self {
            session_id: Some(session_id),
            filename: None,
            step,
        }
    }

    pub fn step(&self) -> LabStep {
        self.step
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn session_id(&self) -> Result<SessionId> {
        self.session_id
            .ok_or_else(|| ClientError::InvalidInput("No dataset uploaded yet".to_string()))
    }

    /// Upload confirmed: bind the session and move to Analyze
    pub fn start(&mut self, session_id: SessionId, filename: impl Into<String>) {
        log::info!("Data Lab session started: {}", session_id);
        self.session_id = Some(session_id);
        self.filename = Some(filename.into());
        self.step = LabStep::Analyze;
    }

    pub fn advance(&mut self) -> Result<LabStep> {
        self.session_id()?;
        let next = self
            .step
            .next()
            .ok_or_else(|| ClientError::InvalidInput("Already at the last step".to_string()))?;
        self.step = next;
        Ok(next)
    }

    /// Verify → Clean, to try other strategies
    pub fn back_to_clean(&mut self) -> Result<()> {
        if self.step != LabStep::Verify {
            return Err(ClientError::InvalidInput(format!(
                "Cannot go back to Clean from {}",
                self.step.label()
            )));
        }
        self.step = LabStep::Clean;
        Ok(())
    }
}

/// Uploads must be `.csv` files
pub fn ensure_csv(path: &Path) -> Result<()> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if is_csv {
        Ok(())
    } else {
        Err(ClientError::InvalidInput("Please upload a CSV file.".to_string()))
    }
}
