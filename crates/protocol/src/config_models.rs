//! Global configuration models for `quality-kit.toml`.
//!
//! This module defines the structure of the optional project-level
//! configuration file that tunes how quality-kit renders progress and
//! whether it records its changes in git.

use serde::Deserialize;
use serde::Serialize;

/// Frames of the cli-spinners "dots" animation.
pub const DEFAULT_SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Cadence of the cli-spinners "dots" animation, in milliseconds.
pub const DEFAULT_SPINNER_INTERVAL_MS: u64 = 80;

/// Represents global settings from `quality-kit.toml`.
///
/// Every field is optional in the file; missing fields fall back to
/// [`GlobalConfig::default`].
///
/// # Example
///
/// ```toml
/// # quality-kit.toml
/// prefix = "[acme]"
///
/// [spinner]
/// frames = ["-", "\\", "|", "/"]
/// interval-ms = 120
///
/// [git]
/// commit = false
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct GlobalConfig {
    /// Label printed in front of every status line.
    ///
    /// When unset, each command uses its own label (e.g. `[prettier]`).
    #[serde(default)]
    pub prefix: Option<String>,

    /// Status line animation.
    #[serde(default)]
    pub spinner: SpinnerConfig,

    /// Git integration.
    #[serde(default)]
    pub git: GitConfig,
}

/// Animation parameters for the live status line.
///
/// An empty frame set or a zero interval disables the animation; steps
/// still print their final lines.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct SpinnerConfig {
    /// Glyphs cycled through while a step is running.
    #[serde(default = "default_frames")]
    pub frames: Vec<String>,

    /// Milliseconds between two frames.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl SpinnerConfig {
    /// A spinner that never draws a frame.
    pub fn disabled() -> Self {
        Self {
            frames: Vec::new(),
            interval_ms: 0,
        }
    }

    /// Whether this configuration produces any visible animation.
    pub fn is_animated(&self) -> bool {
        !self.frames.is_empty() && self.interval_ms > 0
    }
}

impl Default for SpinnerConfig {
    fn default() -> Self {
        Self {
            frames: default_frames(),
            interval_ms: default_interval_ms(),
        }
    }
}

fn default_frames() -> Vec<String> {
    DEFAULT_SPINNER_FRAMES.iter().map(|f| f.to_string()).collect()
}

fn default_interval_ms() -> u64 {
    DEFAULT_SPINNER_INTERVAL_MS
}

/// Git settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GitConfig {
    /// Commit after every step that changes the project.
    ///
    /// Defaults to `true`.
    #[serde(default = "default_commit")]
    pub commit: bool,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            commit: default_commit(),
        }
    }
}

fn default_commit() -> bool {
    true
}
