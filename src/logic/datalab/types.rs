//! Data Lab Types
//!
//! Wire types of the session-scoped Data Lab endpoints, each with an
//! explicit `validate()` against the response contract.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{ClientError, Result};
use crate::logic::stats::FeatureImportance;

// ============================================================================
// SESSION
// ============================================================================

/// Server-issued dataset session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl FromStr for SessionId {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s.trim())
            .map(SessionId)
            .map_err(|_| ClientError::InvalidInput(format!("Not a session id: {}", s)))
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// `POST /upload` and `POST /use_sample`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub session_id: SessionId,
    #[serde(default)]
    pub message: Option<String>,
}

// ============================================================================
// PREVIEW
// ============================================================================

/// `GET /preview/{session}`: header plus the first rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetPreview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<serde_json::Value>>,
}

impl DatasetPreview {
    pub fn validate(&self) -> Result<()> {
        for (i, row) in self.rows.iter().enumerate() {
            if row.len() != self.columns.len() {
                return Err(ClientError::contract(format!(
                    "preview row {} has {} cells for {} columns",
                    i,
                    row.len(),
                    self.columns.len()
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// EDA
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub name: String,
    pub count: u64,
}

/// `GET /eda/{session}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdaReport {
    pub total_rows: u64,
    pub total_columns: u64,
    pub columns: Vec<String>,
    pub null_counts: BTreeMap<String, u64>,
    #[serde(default)]
    pub description: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub histograms: BTreeMap<String, Vec<HistogramBin>>,
}

impl EdaReport {
    pub fn total_nulls(&self) -> u64 {
        self.null_counts.values().sum()
    }

    /// Columns with missing values, in dataset column order
    pub fn columns_with_nulls(&self) -> Vec<(&str, u64)> {
        self.columns
            .iter()
            .filter_map(|c| {
                let count = self.null_counts.get(c).copied().unwrap_or(0);
                (count > 0).then_some((c.as_str(), count))
            })
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        if self.total_columns as usize != self.columns.len() {
            return Err(ClientError::contract(format!(
                "total_columns is {} but {} columns listed",
                self.total_columns,
                self.columns.len()
            )));
        }
        for key in self.null_counts.keys().chain(self.histograms.keys()) {
            if !self.columns.contains(key) {
                return Err(ClientError::contract(format!("unknown column: {}", key)));
            }
        }
        for (column, bins) in &self.histograms {
            if bins.iter().any(|b| b.name.is_empty()) {
                return Err(ClientError::contract(format!("unnamed histogram bin in {}", column)));
            }
        }
        Ok(())
    }
}

// ============================================================================
// IMPUTATION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImputationStrategy {
    Mean,
    Median,
    Mode,
    DropRow,
}

impl ImputationStrategy {
    pub const ALL: [ImputationStrategy; 4] = [
        ImputationStrategy::Mean,
        ImputationStrategy::Median,
        ImputationStrategy::Mode,
        ImputationStrategy::DropRow,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ImputationStrategy::Mean => "mean",
            ImputationStrategy::Median => "median",
            ImputationStrategy::Mode => "mode",
            ImputationStrategy::DropRow => "drop_row",
        }
    }
}

impl FromStr for ImputationStrategy {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s.trim())
            .ok_or_else(|| ClientError::InvalidInput(format!("Unknown strategy: {}", s)))
    }
}

/// Column → strategy map sent to `POST /impute/{session}`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ImputationPlan(BTreeMap<String, ImputationStrategy>);

impl ImputationPlan {
    /// Median for every column that has missing values
    pub fn default_for(report: &EdaReport) -> Self {
        Self(
            report
                .columns_with_nulls()
                .into_iter()
                .map(|(column, _)| (column.to_string(), ImputationStrategy::Median))
                .collect(),
        )
    }

    /// Override one column; only columns already in the plan may change
    pub fn set(&mut self, column: &str, strategy: ImputationStrategy) -> Result<()> {
        match self.0.get_mut(column) {
            Some(slot) => {
                *slot = strategy;
                Ok(())
            }
            None => Err(ClientError::InvalidInput(format!(
                "Column {} has no missing values",
                column
            ))),
        }
    }

    pub fn get(&self, column: &str) -> Option<ImputationStrategy> {
        self.0.get(column).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ImputationStrategy)> {
        self.0.iter().map(|(c, s)| (c.as_str(), *s))
    }
}

/// `POST /impute/{session}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImputeResponse {
    pub message: String,
    pub remaining_nulls: BTreeMap<String, u64>,
    #[serde(default)]
    pub cleaned_file: Option<String>,
}

impl ImputeResponse {
    pub fn is_clean(&self) -> bool {
        self.remaining_nulls.values().all(|&n| n == 0)
    }
}

// ============================================================================
// COMPARISON
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonBin {
    pub name: String,
    #[serde(rename = "Raw")]
    pub raw: u64,
    #[serde(rename = "Cleaned")]
    pub cleaned: u64,
}

/// `GET /compare/{session}`: before/after histograms on shared bins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub comparisons: BTreeMap<String, Vec<ComparisonBin>>,
}

impl ComparisonReport {
    pub fn validate(&self) -> Result<()> {
        for (column, bins) in &self.comparisons {
            if bins.is_empty() {
                return Err(ClientError::contract(format!("no comparison bins for {}", column)));
            }
            if bins.iter().any(|b| b.name.is_empty()) {
                return Err(ClientError::contract(format!("unnamed comparison bin in {}", column)));
            }
        }
        Ok(())
    }
}

// ============================================================================
// TRAINING
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RocPoint {
    pub fpr: f64,
    pub tpr: f64,
}

/// `POST /train/{session}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub accuracy: f64,
    pub f1_score: f64,
    #[serde(default)]
    pub precision: Option<f64>,
    #[serde(default)]
    pub recall: Option<f64>,
    pub confusion_matrix: Vec<Vec<u64>>,
    #[serde(default)]
    pub feature_importance: Vec<FeatureImportance>,
    pub target: String,
    #[serde(default)]
    pub roc_curve: Vec<RocPoint>,
}

impl TrainingReport {
    /// Named metrics present in the report
    pub fn metrics(&self) -> Vec<(&'static str, f64)> {
        let mut metrics = vec![("Accuracy", self.accuracy), ("F1 Score", self.f1_score)];
        if let Some(p) = self.precision {
            metrics.push(("Precision", p));
        }
        if let Some(r) = self.recall {
            metrics.push(("Recall", r));
        }
        metrics
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.metrics() {
            if !(0.0..=1.0).contains(&value) {
                return Err(ClientError::contract(format!("{} out of range: {}", name, value)));
            }
        }

        let n = self.confusion_matrix.len();
        if n == 0 || self.confusion_matrix.iter().any(|row| row.len() != n) {
            return Err(ClientError::contract("confusion matrix must be square and non-empty"));
        }

        let unit = 0.0..=1.0;
        if self
            .roc_curve
            .iter()
            .any(|p| !unit.contains(&p.fpr) || !unit.contains(&p.tpr))
        {
            return Err(ClientError::contract("ROC point outside the unit square"));
        }
        Ok(())
    }
}
