//! Configuration loading and management.
//!
//! This module loads the optional `quality-kit.toml` file from the root of
//! the project being provisioned.

pub mod error;
pub mod loader;
pub mod models;

pub use error::{ConfigError, ConfigResult};
pub use loader::{load_config, CONFIG_FILE_NAME};
pub use models::AppConfig;
