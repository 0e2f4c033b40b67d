//! Fixtures for building task managers and temporary projects.

use super::sinks::{EventLog, LoggingSink};
use qk_core::engine::{RunOptions, TaskManager};
use qk_protocol::config_models::SpinnerConfig;
use std::sync::Arc;
use tempfile::TempDir;

/// Spinner with two frames ticking every 10ms.
#[allow(dead_code)]
pub fn fast_spinner() -> SpinnerConfig {
    SpinnerConfig {
        frames: vec!["-".to_string(), "+".to_string()],
        interval_ms: 10,
    }
}

/// A manager whose sink writes into a fresh [`EventLog`].
#[allow(dead_code)]
pub fn logging_manager(dry_run: bool, spinner: SpinnerConfig) -> (TaskManager, EventLog) {
    let log = EventLog::new();
    let manager = TaskManager::new(RunOptions {
        dry_run,
        spinner,
        sink: Arc::new(LoggingSink::new(log.clone())),
    });
    (manager, log)
}

/// A temporary npm project containing `package_json`.
#[allow(dead_code)]
pub fn npm_project(package_json: &str) -> std::io::Result<TempDir> {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("package.json"), package_json)?;
    Ok(dir)
}
