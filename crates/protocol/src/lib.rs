//! # qk-protocol
//!
//! Shared data models for quality-kit.
//!
//! This crate defines the structures that cross crate boundaries:
//! - Global settings parsed from `quality-kit.toml`
//! - Per-step status and the report returned by a finished series
//!
//! ## Modules
//!
//! - [`config_models`]: Global configuration from `quality-kit.toml`
//! - [`report_models`]: Step status and series run reports
//!
//! ## Design Principles
//!
//! - Minimal dependencies: Only serde
//! - Independent compilation: No dependencies on other quality-kit crates

pub mod config_models;
pub mod report_models;

// Re-export all public types for convenience
pub use config_models::*;
pub use report_models::*;
