//! Series: an ordered list of steps run one after another under a banner.
//!
//! A series is created by the [`TaskManager`](super::TaskManager), filled
//! with [`Series::task`] and [`Series::conditional_task`], then consumed by
//! [`Series::run`]. Each step is awaited to completion (ticker stopped,
//! final line persisted) before the next one starts.

use super::error::{SeriesError, SeriesResult, StepPhase, ValidationError};
use super::sink::StatusSink;
use super::step::{Action, ConditionalTask, Message, Step, StepFuture, Task};
use super::ticker::Ticker;
use futures::stream::{self, StreamExt, TryStreamExt};
use qk_protocol::report_models::{SeriesReport, StepReport, StepStatus};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Display name of a series.
pub enum SeriesName {
    Literal(String),
    Dynamic(Box<dyn Fn() -> StepFuture<String> + Send + Sync>),
}

impl SeriesName {
    /// A name computed when the series starts running.
    pub fn dynamic<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = String> + Send + 'static,
    {
        SeriesName::Dynamic(Box::new(move || Box::pin(f())))
    }

    pub async fn resolve(&self) -> String {
        match self {
            SeriesName::Literal(name) => name.clone(),
            SeriesName::Dynamic(f) => f().await,
        }
    }
}

impl From<&str> for SeriesName {
    fn from(name: &str) -> Self {
        SeriesName::Literal(name.to_string())
    }
}

impl From<String> for SeriesName {
    fn from(name: String) -> Self {
        SeriesName::Literal(name)
    }
}

/// An ordered, exclusively owned sequence of steps.
pub struct Series {
    name: SeriesName,
    label: String,
    steps: Vec<Step>,
    dry_run: bool,
    sink: Arc<dyn StatusSink>,
    ticker: Ticker,
}

/// Where the ticker line of the step currently running is anchored.
struct Position<'a> {
    label: &'a str,
    index: usize,
    total: usize,
}

impl Position<'_> {
    fn progress(&self, message: &str) -> String {
        format!("[{}/{}] {}", self.index, self.total, message)
    }

    fn final_line(&self, status: StepStatus, message: &str, suffix: Option<&str>) -> String {
        let mut line = format!(
            "{} {}, {}.",
            status.glyph(),
            self.progress(message),
            status.verb()
        );
        if let Some(suffix) = suffix {
            line.push(' ');
            line.push_str(suffix);
        }
        labelled(self.label, &line)
    }
}

fn labelled(label: &str, text: &str) -> String {
    if label.is_empty() {
        text.to_string()
    } else {
        format!("{label} {text}")
    }
}

impl Series {
    pub(crate) fn new(
        name: SeriesName,
        label: String,
        dry_run: bool,
        sink: Arc<dyn StatusSink>,
        ticker: Ticker,
    ) -> Self {
        Self {
            name,
            label,
            steps: Vec::new(),
            dry_run,
            sink,
            ticker,
        }
    }

    /// Append an unconditional step.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyMessage`] if `message` is an empty
    /// literal. Nothing is appended in that case.
    pub fn task(
        &mut self,
        message: impl Into<Message>,
        action: Action,
    ) -> Result<&mut Self, ValidationError> {
        let task = Task::new(message, action)?;
        self.steps.push(Step::Unconditional(task));
        Ok(self)
    }

    /// Append a conditional step.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyMessage`] if the step's message is an
    /// empty literal. Nothing is appended in that case.
    pub fn conditional_task(&mut self, task: ConditionalTask) -> Result<&mut Self, ValidationError> {
        task.validate()?;
        self.steps.push(Step::Conditional(task));
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The banner, if it is known before the series runs.
    pub fn name(&self) -> Option<&str> {
        match &self.name {
            SeriesName::Literal(name) => Some(name),
            SeriesName::Dynamic(_) => None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Run every step in registration order.
    ///
    /// Conditional probes run in dry-run mode too; only `on_true`,
    /// `on_false`, `finalize` and unconditional actions are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::StepExecution`] for the first step whose probe
    /// or action fails. Its ticker is stopped and a failed line persisted
    /// before returning; later steps never start.
    pub async fn run(self) -> SeriesResult<SeriesReport> {
        let name = self.name.resolve().await;
        self.sink.write(&name);
        self.sink.persist();

        let total = self.steps.len();
        info!(series = %name, steps = total, dry_run = self.dry_run, "running series");

        let report = SeriesReport {
            name,
            dry_run: self.dry_run,
            steps: Vec::with_capacity(total),
        };

        // The fold awaits each step before pulling the next one.
        let this = &self;
        let report = stream::iter(self.steps.iter().enumerate())
            .map(Ok::<_, SeriesError>)
            .try_fold(report, |mut report, (offset, step)| async move {
                let position = Position {
                    label: &this.label,
                    index: offset + 1,
                    total,
                };
                report.steps.push(this.run_step(&position, step).await?);
                Ok(report)
            })
            .await?;

        self.sink.write(&labelled(&self.label, "Done!"));
        self.sink.persist();
        info!(series = %report.name, "series completed");

        Ok(report)
    }

    async fn run_step(&self, position: &Position<'_>, step: &Step) -> SeriesResult<StepReport> {
        match step {
            Step::Unconditional(task) => self.run_unconditional(position, task).await,
            Step::Conditional(task) => self.run_conditional(position, task).await,
        }
    }

    async fn run_unconditional(&self, position: &Position<'_>, task: &Task) -> SeriesResult<StepReport> {
        let message = task.message.resolve().await;
        debug!(index = position.index, %message, "starting step");

        let ticker = self.ticker.start(&self.label, &position.progress(&message));
        let outcome = if self.dry_run {
            Ok(())
        } else {
            (task.action)().await
        };
        ticker.stop().await;

        match outcome {
            Ok(()) => Ok(self.finish(position, StepStatus::Done, message, None)),
            Err(source) => Err(self.fail(position, message, StepPhase::Action, source)),
        }
    }

    async fn run_conditional(
        &self,
        position: &Position<'_>,
        task: &ConditionalTask,
    ) -> SeriesResult<StepReport> {
        let exists = match (task.probe)().await {
            Ok(exists) => exists,
            Err(source) => {
                let message = task
                    .message
                    .literal()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("step {}", position.index));
                return Err(self.fail(position, message, StepPhase::Probe, source));
            }
        };

        let message = task.message.resolve(exists).await;
        debug!(index = position.index, %message, probe = exists, "starting step");

        let ticker = self.ticker.start(&self.label, &position.progress(&message));
        let outcome = if self.dry_run {
            Ok(())
        } else {
            Self::run_branches(task, exists).await
        };
        ticker.stop().await;

        match outcome {
            Ok(()) => {
                let status = if exists {
                    StepStatus::Done
                } else {
                    StepStatus::Skipped
                };
                let suffix = task.suffix(exists).map(str::to_string);
                Ok(self.finish(position, status, message, suffix))
            }
            Err((phase, source)) => Err(self.fail(position, message, phase, source)),
        }
    }

    async fn run_branches(
        task: &ConditionalTask,
        exists: bool,
    ) -> Result<(), (StepPhase, anyhow::Error)> {
        if exists {
            (task.on_true)().await.map_err(|e| (StepPhase::OnTrue, e))?;
        } else {
            (task.on_false)().await.map_err(|e| (StepPhase::OnFalse, e))?;
        }
        (task.finalize)().await.map_err(|e| (StepPhase::Finalize, e))
    }

    fn finish(
        &self,
        position: &Position<'_>,
        status: StepStatus,
        message: String,
        suffix: Option<String>,
    ) -> StepReport {
        self.sink
            .write(&position.final_line(status, &message, suffix.as_deref()));
        self.sink.persist();
        debug!(index = position.index, status = status.verb(), "step finished");

        StepReport {
            index: position.index,
            message,
            status,
            suffix,
        }
    }

    fn fail(
        &self,
        position: &Position<'_>,
        message: String,
        phase: StepPhase,
        source: anyhow::Error,
    ) -> SeriesError {
        self.sink
            .write(&position.final_line(StepStatus::Failed, &message, None));
        self.sink.persist();
        warn!(index = position.index, %phase, error = %source, "step failed");

        SeriesError::StepExecution {
            index: position.index,
            total: position.total,
            message,
            phase,
            source,
        }
    }
}

impl std::fmt::Debug for Series {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Series")
            .field("label", &self.label)
            .field("steps", &self.steps)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}
