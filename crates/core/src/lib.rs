//! # qk-core
//!
//! Task orchestration engine and scaffolding recipes for quality-kit.
//!
//! This crate provides:
//! - A sequential task engine with a live status line and dry-run mode
//! - Configuration loading from `quality-kit.toml`
//! - Project file access (`package.json`, config files)
//! - npm/git command execution
//! - Recipes provisioning EditorConfig, Prettier and TSLint
//!
//! ## Modules
//!
//! - [`engine`]: TaskManager, Series, steps and the status ticker
//! - [`config`]: Configuration loading and management
//! - [`project`]: Reading and editing the target project
//! - [`shell`]: External command execution
//! - [`init`]: Scaffolding recipes and embedded templates

pub mod config;
pub mod engine;
pub mod init;
pub mod project;
pub mod shell;
