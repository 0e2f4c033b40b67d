//! Live status renderer.
//!
//! While a step's probe or action is awaited, a background tokio task
//! rewrites the status line with the next spinner frame at a fixed cadence.
//! The task only touches the sink; it never affects program state.
//!
//! Every [`Ticker::start`] hands out a [`TickerHandle`] which must be
//! released with [`TickerHandle::stop`]. Stopping waits for the task to
//! exit, so no stale frame can overwrite a line persisted afterwards. A
//! handle dropped without `stop` (panic, cancelled future) aborts the task
//! instead.

use super::sink::StatusSink;
use qk_protocol::config_models::SpinnerConfig;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Start/stop bookkeeping shared by all handles of a ticker.
#[derive(Debug, Default)]
pub struct TickerCounters {
    started: AtomicUsize,
    stopped: AtomicUsize,
}

impl TickerCounters {
    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    pub fn stopped(&self) -> usize {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Handles started but not yet stopped.
    pub fn active(&self) -> usize {
        self.started().saturating_sub(self.stopped())
    }
}

/// Spawns spinner tasks that animate a [`StatusSink`].
#[derive(Clone)]
pub struct Ticker {
    frames: Arc<[String]>,
    interval: Duration,
    sink: Arc<dyn StatusSink>,
    counters: Arc<TickerCounters>,
}

impl Ticker {
    pub fn new(spinner: &SpinnerConfig, sink: Arc<dyn StatusSink>) -> Self {
        Self {
            frames: spinner.frames.clone().into(),
            interval: Duration::from_millis(spinner.interval_ms),
            sink,
            counters: Arc::new(TickerCounters::default()),
        }
    }

    pub fn counters(&self) -> Arc<TickerCounters> {
        Arc::clone(&self.counters)
    }

    /// Start animating `<prefix> <frame> <message>`.
    ///
    /// With no frames or a zero interval nothing is drawn, but the handle
    /// still has to be stopped.
    pub fn start(&self, prefix: &str, message: &str) -> TickerHandle {
        self.counters.started.fetch_add(1, Ordering::SeqCst);

        if self.frames.is_empty() || self.interval.is_zero() {
            return TickerHandle {
                task: None,
                stop_tx: None,
                counters: Arc::clone(&self.counters),
                released: false,
            };
        }

        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let frames = Arc::clone(&self.frames);
        let sink = Arc::clone(&self.sink);
        let interval = self.interval;
        let prefix = prefix.to_string();
        let message = message.to_string();

        let task = tokio::spawn(async move {
            let mut ticks = tokio::time::interval(interval);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut frame = 0usize;

            loop {
                tokio::select! {
                    biased;
                    _ = &mut stop_rx => break,
                    _ = ticks.tick() => {
                        let glyph = &frames[frame % frames.len()];
                        sink.write(&render_frame(&prefix, glyph, &message));
                        frame = frame.wrapping_add(1);
                    }
                }
            }
        });

        TickerHandle {
            task: Some(task),
            stop_tx: Some(stop_tx),
            counters: Arc::clone(&self.counters),
            released: false,
        }
    }
}

fn render_frame(prefix: &str, glyph: &str, message: &str) -> String {
    if prefix.is_empty() {
        format!("{glyph} {message}")
    } else {
        format!("{prefix} {glyph} {message}")
    }
}

/// A running spinner. Release with [`stop`](TickerHandle::stop).
#[must_use = "a ticker keeps drawing until it is stopped"]
pub struct TickerHandle {
    task: Option<JoinHandle<()>>,
    stop_tx: Option<oneshot::Sender<()>>,
    counters: Arc<TickerCounters>,
    released: bool,
}

impl TickerHandle {
    /// Stop the spinner and wait until its task has exited.
    pub async fn stop(mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::debug!("ticker task ended abnormally: {}", e);
            }
        }
        self.release();
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.counters.stopped.fetch_add(1, Ordering::SeqCst);
        }
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.release();
    }
}
