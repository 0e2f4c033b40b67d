//! Run report models.
//!
//! A finished series returns a [`SeriesReport`] listing how each of its
//! steps ended. The CLI prints it as JSON with `--json`.

use serde::{Deserialize, Serialize};

/// Final status of a single step.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepStatus {
    /// An unconditional step ran, or a conditional step's probe was true.
    Done,

    /// A conditional step's probe was false.
    Skipped,

    /// The step's probe or one of its actions returned an error.
    Failed,
}

impl StepStatus {
    /// Word appended to the step's final status line.
    pub fn verb(self) -> &'static str {
        match self {
            StepStatus::Done => "done",
            StepStatus::Skipped => "skipped",
            StepStatus::Failed => "failed",
        }
    }

    /// Glyph shown in place of the spinner once the step has ended.
    pub fn glyph(self) -> &'static str {
        match self {
            StepStatus::Done => "✔",
            StepStatus::Skipped => "↷",
            StepStatus::Failed => "✖",
        }
    }
}

/// Outcome of one step in a finished series.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    /// 1-based position of the step in its series.
    pub index: usize,

    /// Message displayed for the step, after dynamic resolution.
    pub message: String,

    /// How the step ended.
    pub status: StepStatus,

    /// Suffix appended to the final line, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

/// Result of running a series to completion.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SeriesReport {
    /// Resolved display name of the series.
    pub name: String,

    /// Whether mutating actions were skipped.
    pub dry_run: bool,

    /// One entry per step, in execution order.
    pub steps: Vec<StepReport>,
}

impl SeriesReport {
    /// Number of steps that ended with the given status.
    pub fn count(&self, status: StepStatus) -> usize {
        self.steps.iter().filter(|s| s.status == status).count()
    }
}
