//! Task orchestration engine.
//!
//! The [`TaskManager`] holds the run configuration of one invocation
//! (dry-run flag, spinner, status sink) and stamps it onto every
//! [`Series`] it creates. A series executes its steps sequentially,
//! animating one status line per step.
//!
//! # Example
//!
//! ```no_run
//! use qk_core::engine::step::action;
//! use qk_core::engine::{RunOptions, TaskManager};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = TaskManager::new(RunOptions::default());
//! let mut series = manager.create_series("Setting up", "[demo]");
//! series.task("Say hello", action(|| async {
//!     println!("hello");
//!     Ok(())
//! }))?;
//!
//! series.run().await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod series;
pub mod sink;
pub mod step;
pub mod ticker;

pub use error::{SeriesError, SeriesResult, StepPhase, ValidationError};
pub use series::{Series, SeriesName};
pub use sink::{RecordingSink, StatusSink, TerminalSink};
pub use step::{ConditionalTask, Message, ProbeMessage, Step};
pub use ticker::{Ticker, TickerCounters};

use qk_protocol::config_models::SpinnerConfig;
use std::sync::Arc;

/// Configuration shared by every series of one invocation.
#[derive(Clone)]
pub struct RunOptions {
    /// Probe project state but skip every mutating action.
    pub dry_run: bool,

    /// Status line animation.
    pub spinner: SpinnerConfig,

    /// Where status lines are written.
    pub sink: Arc<dyn StatusSink>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            spinner: SpinnerConfig::default(),
            sink: Arc::new(TerminalSink::stdout()),
        }
    }
}

/// Process-wide factory of [`Series`].
///
/// Read-only after construction; series never write back into it.
pub struct TaskManager {
    options: RunOptions,
    ticker: Ticker,
}

impl TaskManager {
    pub fn new(options: RunOptions) -> Self {
        let ticker = Ticker::new(&options.spinner, Arc::clone(&options.sink));
        Self { options, ticker }
    }

    /// Create an empty series stamped with this manager's configuration.
    ///
    /// # Arguments
    ///
    /// * `name` - Banner printed once when the series starts
    /// * `label` - Prefix of every step line (e.g. `[prettier]`)
    pub fn create_series(&self, name: impl Into<SeriesName>, label: impl Into<String>) -> Series {
        Series::new(
            name.into(),
            label.into(),
            self.options.dry_run,
            Arc::clone(&self.options.sink),
            self.ticker.clone(),
        )
    }

    pub fn is_dry_run(&self) -> bool {
        self.options.dry_run
    }

    /// Start/stop counts of every ticker started by this manager's series.
    pub fn ticker_counters(&self) -> Arc<TickerCounters> {
        self.ticker.counters()
    }
}
