//! Error types for step registration and series execution.

use std::fmt;
use thiserror::Error;

/// A step was registered with invalid arguments.
///
/// Always raised synchronously by [`Series::task`](super::series::Series::task)
/// or [`Series::conditional_task`](super::series::Series::conditional_task),
/// never once a run has started.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A literal step message had zero length.
    #[error("Validation error: Task message must not be empty")]
    EmptyMessage,
}

/// The part of a step that was executing when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPhase {
    Probe,
    OnTrue,
    OnFalse,
    Finalize,
    Action,
}

impl fmt::Display for StepPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StepPhase::Probe => "probe",
            StepPhase::OnTrue => "on-true branch",
            StepPhase::OnFalse => "on-false branch",
            StepPhase::Finalize => "finalize",
            StepPhase::Action => "action",
        };
        f.write_str(name)
    }
}

/// Errors returned by [`Series::run`](super::series::Series::run).
#[derive(Debug, Error)]
pub enum SeriesError {
    /// A step callable returned an error; remaining steps were not run.
    #[error("Step [{index}/{total}] '{message}' failed in {phase}: {source}")]
    StepExecution {
        index: usize,
        total: usize,
        message: String,
        phase: StepPhase,
        #[source]
        source: anyhow::Error,
    },
}

impl SeriesError {
    /// 1-based index of the step that failed.
    pub fn step_index(&self) -> usize {
        match self {
            SeriesError::StepExecution { index, .. } => *index,
        }
    }

    pub fn phase(&self) -> StepPhase {
        match self {
            SeriesError::StepExecution { phase, .. } => *phase,
        }
    }
}

/// Type alias for Result with SeriesError.
pub type SeriesResult<T> = Result<T, SeriesError>;
