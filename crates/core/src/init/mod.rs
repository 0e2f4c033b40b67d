//! Scaffolding recipes.
//!
//! Each recipe builds a [`Series`](crate::engine::Series) that provisions
//! one tool into a JavaScript/TypeScript project:
//! - EditorConfig (`.editorconfig`)
//! - Prettier (config, ignore file, scripts, husky + lint-staged hook)
//! - TSLint (`tslint.json`, `lint` script)
//!
//! # Example
//!
//! ```no_run
//! use qk_core::config::AppConfig;
//! use qk_core::engine::{RunOptions, TaskManager};
//! use qk_core::init::{init_editorconfig, InitContext};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = TaskManager::new(RunOptions::default());
//! let context = InitContext::new(".", &AppConfig::default());
//!
//! let report = init_editorconfig(&manager, &context).await?;
//! println!("{} steps", report.steps.len());
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod editorconfig;
pub mod error;
pub mod prettier;
pub mod setup;
pub mod templates;
pub mod tslint;

pub use context::InitContext;
pub use editorconfig::{editorconfig_series, init_editorconfig};
pub use error::{InitError, InitResult};
pub use prettier::{init_prettier, prettier_series};
pub use setup::{run_setup, Recipe, SetupSelection};
pub use templates::{get_template, Template};
pub use tslint::{init_tslint, tslint_series};
