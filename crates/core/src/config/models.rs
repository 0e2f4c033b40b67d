//! Configuration models that aggregate all settings.
//!
//! This module provides the unified `AppConfig` structure combining the
//! parsed global settings with where they were loaded from.

use qk_protocol::config_models::GlobalConfig;
use std::path::PathBuf;

/// Unified application configuration for one project.
///
/// # Example
///
/// ```rust,no_run
/// use qk_core::config::loader::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// println!("Spinner has {} frames", config.global.spinner.frames.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Global settings from `quality-kit.toml`.
    pub global: GlobalConfig,

    /// The file the settings were read from, `None` when defaults are used.
    pub source: Option<PathBuf>,
}

impl AppConfig {
    /// Whether steps should commit their changes.
    pub fn commits_enabled(&self) -> bool {
        self.global.git.commit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_commit_without_source() {
        let config = AppConfig::default();
        assert!(config.commits_enabled());
        assert!(config.global.prefix.is_none());
        assert!(config.source.is_none());
    }

    #[test]
    fn test_commits_follow_git_setting() {
        let mut config = AppConfig::default();
        config.global.git.commit = false;
        assert!(!config.commits_enabled());
    }
}
