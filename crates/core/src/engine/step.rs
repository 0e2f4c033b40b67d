//! Step model: the unit of work executed by a [`Series`](super::series::Series).
//!
//! A step is either unconditional (always runs its action) or conditional
//! (runs a probe first and picks a branch from its result). Callables are
//! boxed async closures so step bodies can capture whatever project handles
//! they need.

use super::error::ValidationError;
use anyhow::Result;
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by every step callable.
pub type StepFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// A mutating step body.
pub type Action = Box<dyn Fn() -> StepFuture<Result<()>> + Send + Sync>;

/// A read-only check of project state.
pub type Probe = Box<dyn Fn() -> StepFuture<Result<bool>> + Send + Sync>;

/// Wrap an async closure into an [`Action`].
pub fn action<F, Fut>(f: F) -> Action
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    Box::new(move || Box::pin(f()))
}

/// Wrap an async closure into a [`Probe`].
pub fn probe<F, Fut>(f: F) -> Probe
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<bool>> + Send + 'static,
{
    Box::new(move || Box::pin(f()))
}

/// An action that does nothing.
pub fn noop() -> Action {
    action(|| async { Ok(()) })
}

/// Display message of an unconditional step.
pub enum Message {
    Literal(String),
    Dynamic(Box<dyn Fn() -> StepFuture<String> + Send + Sync>),
}

impl Message {
    /// A message computed when the step starts.
    pub fn dynamic<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = String> + Send + 'static,
    {
        Message::Dynamic(Box::new(move || Box::pin(f())))
    }

    pub async fn resolve(&self) -> String {
        match self {
            Message::Literal(text) => text.clone(),
            Message::Dynamic(f) => f().await,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Message::Literal(text) => validate_literal(text),
            Message::Dynamic(_) => Ok(()),
        }
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Message::Literal(text.to_string())
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message::Literal(text)
    }
}

/// Display message of a conditional step, optionally derived from the
/// probe result.
pub enum ProbeMessage {
    Literal(String),
    Dynamic(Box<dyn Fn(bool) -> StepFuture<String> + Send + Sync>),
}

impl ProbeMessage {
    /// A message computed asynchronously from the probe result.
    pub fn dynamic<F, Fut>(f: F) -> Self
    where
        F: Fn(bool) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = String> + Send + 'static,
    {
        ProbeMessage::Dynamic(Box::new(move |result| Box::pin(f(result))))
    }

    /// A message picked synchronously from the probe result.
    ///
    /// ```
    /// use qk_core::engine::step::ProbeMessage;
    ///
    /// let message = ProbeMessage::choose(|exists| {
    ///     if exists { "Updating X" } else { "Creating X" }
    /// });
    /// # let _ = message;
    /// ```
    pub fn choose<F, S>(f: F) -> Self
    where
        F: Fn(bool) -> S + Send + Sync + 'static,
        S: Into<String>,
    {
        ProbeMessage::Dynamic(Box::new(move |result| {
            let text = f(result).into();
            Box::pin(async move { text })
        }))
    }

    pub async fn resolve(&self, probe_result: bool) -> String {
        match self {
            ProbeMessage::Literal(text) => text.clone(),
            ProbeMessage::Dynamic(f) => f(probe_result).await,
        }
    }

    /// Text usable before the probe has answered, if there is one.
    pub fn literal(&self) -> Option<&str> {
        match self {
            ProbeMessage::Literal(text) => Some(text),
            ProbeMessage::Dynamic(_) => None,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        match self {
            ProbeMessage::Literal(text) => validate_literal(text),
            ProbeMessage::Dynamic(_) => Ok(()),
        }
    }
}

impl From<&str> for ProbeMessage {
    fn from(text: &str) -> Self {
        ProbeMessage::Literal(text.to_string())
    }
}

impl From<String> for ProbeMessage {
    fn from(text: String) -> Self {
        ProbeMessage::Literal(text)
    }
}

fn validate_literal(text: &str) -> Result<(), ValidationError> {
    if text.is_empty() {
        return Err(ValidationError::EmptyMessage);
    }
    Ok(())
}

/// A step that always runs its action.
pub struct Task {
    pub(crate) message: Message,
    pub(crate) action: Action,
}

impl Task {
    /// Build a task, rejecting an empty literal message.
    pub fn new(message: impl Into<Message>, action: Action) -> Result<Self, ValidationError> {
        let message = message.into();
        message.validate()?;
        Ok(Self { message, action })
    }
}

/// A step whose branch is chosen by a probe.
///
/// Built with [`ConditionalTask::new`] and the chained setters; omitted
/// branches default to no-ops.
pub struct ConditionalTask {
    pub(crate) message: ProbeMessage,
    pub(crate) probe: Probe,
    pub(crate) on_true: Action,
    pub(crate) on_false: Action,
    pub(crate) finalize: Action,
    pub(crate) suffix_when_true: Option<String>,
    pub(crate) suffix_when_false: Option<String>,
}

impl ConditionalTask {
    pub fn new(message: impl Into<ProbeMessage>, probe: Probe) -> Self {
        Self {
            message: message.into(),
            probe,
            on_true: noop(),
            on_false: noop(),
            finalize: noop(),
            suffix_when_true: None,
            suffix_when_false: None,
        }
    }

    /// Action awaited when the probe returns `true`.
    pub fn on_true(mut self, action: Action) -> Self {
        self.on_true = action;
        self
    }

    /// Action awaited when the probe returns `false`.
    pub fn on_false(mut self, action: Action) -> Self {
        self.on_false = action;
        self
    }

    /// Action awaited after either branch.
    pub fn finalize(mut self, action: Action) -> Self {
        self.finalize = action;
        self
    }

    /// Suffix appended to the final line when the probe returns `true`.
    pub fn message_when_true(mut self, suffix: impl Into<String>) -> Self {
        self.suffix_when_true = non_empty(suffix.into());
        self
    }

    /// Suffix appended to the final line when the probe returns `false`.
    pub fn message_when_false(mut self, suffix: impl Into<String>) -> Self {
        self.suffix_when_false = non_empty(suffix.into());
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        self.message.validate()
    }

    pub(crate) fn suffix(&self, probe_result: bool) -> Option<&str> {
        if probe_result {
            self.suffix_when_true.as_deref()
        } else {
            self.suffix_when_false.as_deref()
        }
    }
}

fn non_empty(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// One unit of orchestrated work.
pub enum Step {
    Unconditional(Task),
    Conditional(ConditionalTask),
}

impl Step {
    pub fn is_conditional(&self) -> bool {
        matches!(self, Step::Conditional(_))
    }
}

impl std::fmt::Debug for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (kind, message) = match self {
            Step::Unconditional(task) => ("Unconditional", message_label(&task.message)),
            Step::Conditional(task) => ("Conditional", task.message.literal().unwrap_or("<dynamic>")),
        };
        f.debug_struct("Step")
            .field("kind", &kind)
            .field("message", &message)
            .finish()
    }
}

fn message_label(message: &Message) -> &str {
    match message {
        Message::Literal(text) => text,
        Message::Dynamic(_) => "<dynamic>",
    }
}
