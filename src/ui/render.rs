//! Text rendering of the view models.
//!
//! Each function returns the block as a `String` so the CLI decides where
//! it goes.

use std::fmt::Write;

use super::ViewState;
use crate::logic::datalab::{
    ComparisonReport, DataLabSession, DatasetPreview, EdaReport, ImputeResponse, LabStep,
    TrainingReport,
};
use crate::logic::live::LiveUpdate;
use crate::logic::parameters::format_with_unit;
use crate::logic::prediction::PredictionRequest;
use crate::logic::presentation::ResultPresentation;
use crate::logic::stats::{FeatureImportance, HealthStatus, PhForecast, StatsDashboard};

const BAR_WIDTH: usize = 24;
const FULL: char = '█';
const HALF: char = '▌';

// ============================================================================
// VIEW STATE
// ============================================================================

pub fn render_loading() -> String {
    "Loading...".to_string()
}

pub fn render_error(message: &str) -> String {
    format!("✗ {}", message)
}

pub fn render_empty() -> String {
    "Nothing to show yet.".to_string()
}

/// Dispatch on the state; `populated` renders the payload
pub fn render_state<T>(state: &ViewState<T>, populated: impl FnOnce(&T) -> String) -> String {
    match state {
        ViewState::Loading => render_loading(),
        ViewState::Error(message) => render_error(message),
        ViewState::Empty => render_empty(),
        ViewState::Populated(value) => populated(value),
    }
}

/// Horizontal bar scaled so `max` fills `width` cells
pub fn bar(value: f64, max: f64, width: usize) -> String {
    if !(max > 0.0) || !value.is_finite() {
        return String::new();
    }
    let cells = (value.abs() / max).min(1.0) * width as f64;
    let whole = cells.floor() as usize;
    let mut out: String = std::iter::repeat(FULL).take(whole).collect();
    if cells - whole as f64 >= 0.5 {
        out.push(HALF);
    }
    out
}

// ============================================================================
// PREDICTION
// ============================================================================

/// Inputs with unit and reference hint; out-of-range rows are marked
pub fn render_form(request: &PredictionRequest) -> String {
    let mut out = String::new();
    for flag in request.flags() {
        let spec = flag.param.spec();
        let marker = if flag.is_out_of_range() { "!" } else { " " };
        let _ = writeln!(
            out,
            "{} {:<16} {:>16}   {}",
            marker,
            spec.label,
            format_with_unit(flag.param, flag.value),
            flag.hint()
        );
    }
    out
}

pub fn render_presentation(view: &ResultPresentation) -> String {
    let mut out = String::new();
    let icon = if view.is_safe { "✓" } else { "✗" };

    let _ = writeln!(out, "{} {}", icon, view.headline());
    let _ = writeln!(out, "Confidence Score: {:.1}%", view.display_score);
    let _ = writeln!(
        out,
        "Raw probability {:.3} (Based on optimized threshold {:.2})",
        view.raw_score, view.threshold
    );

    if !view.top_features.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Key factors:");
        let max = view
            .top_features
            .iter()
            .map(|f| f.contribution.abs())
            .fold(0.0, f64::max);
        for f in &view.top_features {
            let sign = if f.contribution > 0.0 {
                '+'
            } else if f.contribution < 0.0 {
                '-'
            } else {
                ' '
            };
            let _ = writeln!(
                out,
                "  {} {:<16} {:>10.2}  {:+.4} {}",
                sign,
                f.feature,
                f.value,
                f.contribution,
                bar(f.contribution, max, BAR_WIDTH)
            );
        }
    }

    let _ = writeln!(out);
    let _ = write!(out, "{}", view.caption_text());
    out
}

// ============================================================================
// STATS / HEALTH / FORECAST
// ============================================================================

fn render_importances(out: &mut String, importances: &[FeatureImportance]) {
    let max = importances.iter().map(|i| i.importance).fold(0.0, f64::max);
    for item in importances {
        let _ = writeln!(
            out,
            "  {:<16} {:.4} {}",
            item.feature,
            item.importance,
            bar(item.importance, max, BAR_WIDTH)
        );
    }
}

pub fn render_stats(dashboard: &StatsDashboard) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Algorithm: {}", dashboard.model_name);

    for (title, bars) in [("Accuracy (R2)", &dashboard.r2_bars), ("Recall", &dashboard.recall_bars)] {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}:", title);
        for b in bars.iter() {
            let _ = writeln!(out, "  {:<10} {:>5.1}% {}", b.name, b.value, bar(b.value, 100.0, BAR_WIDTH));
        }
    }

    if !dashboard.top_importances.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Global feature importance:");
        render_importances(&mut out, &dashboard.top_importances);
    }
    out
}

pub fn render_health(health: &HealthStatus) -> String {
    format!(
        "Backend {} (v{}), model {}",
        health.status,
        health.version,
        if health.model_loaded { "loaded" } else { "not loaded" }
    )
}

pub fn render_forecast(forecast: &PhForecast) -> String {
    format!(
        "Next pH {:.2} ({:?}, confidence {:.0}%)",
        forecast.predicted_ph,
        forecast.trend,
        forecast.confidence * 100.0
    )
}

// ============================================================================
// LIVE
// ============================================================================

pub fn render_live_update(update: &LiveUpdate) -> String {
    let view = &update.presentation;
    let mut line = format!(
        "[{}] #{} {} {:.1}%",
        update.at.format("%H:%M:%S"),
        update.sequence,
        view.headline(),
        view.display_score
    );
    if !update.out_of_range.is_empty() {
        let flagged: Vec<String> = update
            .out_of_range
            .iter()
            .map(|f| format!("{} {}", f.param.spec().label, f.hint()))
            .collect();
        let _ = write!(line, "  ! {}", flagged.join(", "));
    }
    line
}

// ============================================================================
// DATA LAB
// ============================================================================

pub fn render_steps(session: &DataLabSession) -> String {
    LabStep::ALL
        .iter()
        .map(|step| {
            let mark = if step.is_completed(session.step()) {
                "✓"
            } else if *step == session.step() {
                "▶"
            } else {
                "·"
            };
            format!("{} {}", mark, step.label())
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Step bar plus the session id the next step needs
pub fn render_session(session: &DataLabSession) -> String {
    let mut out = render_steps(session);
    if let Ok(id) = session.session_id() {
        let _ = write!(out, "\nSession: {}", id);
        if let Some(name) = session.filename() {
            let _ = write!(out, " ({})", name);
        }
        let _ = write!(out, "\nNext: wq lab eda {}", id);
    }
    out
}

pub fn render_preview(preview: &DatasetPreview) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", preview.columns.join(" | "));
    for row in &preview.rows {
        let cells: Vec<String> = row
            .iter()
            .map(|cell| match cell {
                serde_json::Value::Null => "NaN".to_string(),
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect();
        let _ = writeln!(out, "{}", cells.join(" | "));
    }
    out
}

pub fn render_eda(report: &EdaReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} rows × {} columns, {} missing values",
        report.total_rows,
        report.total_columns,
        report.total_nulls()
    );

    let nulls = report.columns_with_nulls();
    if nulls.is_empty() {
        let _ = writeln!(out, "No missing values.");
    } else {
        let _ = writeln!(out, "Missing values:");
        for (column, count) in nulls {
            let _ = writeln!(out, "  {:<16} {}", column, count);
        }
    }

    for (column, bins) in &report.histograms {
        let max = bins.iter().map(|b| b.count).max().unwrap_or(0) as f64;
        let _ = writeln!(out);
        let _ = writeln!(out, "{}:", column);
        for b in bins {
            let _ = writeln!(out, "  {:>14} {:>6} {}", b.name, b.count, bar(b.count as f64, max, BAR_WIDTH));
        }
    }
    out
}

pub fn render_impute(response: &ImputeResponse) -> String {
    let mut out = response.message.clone();
    if response.is_clean() {
        out.push_str("\nNo missing values remain.");
    } else {
        for (column, count) in response.remaining_nulls.iter().filter(|(_, n)| **n > 0) {
            let _ = write!(out, "\n  {} still has {} missing", column, count);
        }
    }
    out
}

pub fn render_comparison(report: &ComparisonReport) -> String {
    let mut out = String::new();
    for (column, bins) in &report.comparisons {
        let max = bins.iter().map(|b| b.raw.max(b.cleaned)).max().unwrap_or(0) as f64;
        let _ = writeln!(out, "{}:", column);
        for b in bins {
            let _ = writeln!(out, "  {:>14} raw     {:>6} {}", b.name, b.raw, bar(b.raw as f64, max, BAR_WIDTH));
            let _ = writeln!(out, "  {:>14} cleaned {:>6} {}", "", b.cleaned, bar(b.cleaned as f64, max, BAR_WIDTH));
        }
    }
    out
}

pub fn render_training(report: &TrainingReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Target: {}", report.target);
    for (name, value) in report.metrics() {
        let _ = writeln!(out, "  {:<10} {:.1}%", name, value * 100.0);
    }

    let _ = writeln!(out, "Confusion matrix:");
    for row in &report.confusion_matrix {
        let cells: Vec<String> = row.iter().map(|n| format!("{:>6}", n)).collect();
        let _ = writeln!(out, "  {}", cells.join(""));
    }

    if !report.feature_importance.is_empty() {
        let _ = writeln!(out, "Feature importance:");
        render_importances(&mut out, &report.feature_importance);
    }

    if !report.roc_curve.is_empty() {
        let _ = writeln!(out, "ROC curve:");
        let _ = writeln!(out, "  {:>6} {:>6}", "FPR", "TPR");
        for point in &report.roc_curve {
            let _ = writeln!(out, "  {:>6.3} {:>6.3}", point.fpr, point.tpr);
        }
    }
    out
}
