//! Configuration file loader for `quality-kit.toml`.
//!
//! The file is optional: a project without one runs with the defaults
//! (animated "dots" spinner, commits after each change).

use crate::config::error::ConfigError;
use crate::config::error::ConfigResult;
use crate::config::models::AppConfig;
use qk_protocol::config_models::GlobalConfig;
use std::path::Path;

/// Name of the configuration file looked up at the project root.
pub const CONFIG_FILE_NAME: &str = "quality-kit.toml";

/// Loads configuration from `<root>/quality-kit.toml`.
///
/// # Arguments
///
/// * `root` - Root directory of the project being provisioned
///
/// # Returns
///
/// An `AppConfig` with the parsed settings, or the defaults if the file
/// does not exist.
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - The file exists but cannot be read
/// - The file is not valid TOML or has fields of the wrong type
/// - The spinner contains an empty frame
///
/// # Example
///
/// ```rust,no_run
/// use qk_core::config::loader::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// println!("Commits enabled: {}", config.commits_enabled());
/// # Ok(())
/// # }
/// ```
pub async fn load_config(root: &Path) -> ConfigResult<AppConfig> {
    let config_path = root.join(CONFIG_FILE_NAME);

    // If quality-kit.toml doesn't exist, return default config
    if !config_path.exists() {
        tracing::debug!("no {} in {}, using defaults", CONFIG_FILE_NAME, root.display());
        return Ok(AppConfig::default());
    }

    let content =
        std::fs::read_to_string(&config_path).map_err(|source| ConfigError::FileRead {
            path: config_path.clone(),
            source,
        })?;

    let global: GlobalConfig =
        toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
            path: config_path.clone(),
            source,
        })?;

    if global.spinner.frames.iter().any(|frame| frame.is_empty()) {
        return Err(ConfigError::InvalidConfig {
            path: config_path,
            reason: "spinner frames must not be empty strings".to_string(),
        });
    }

    tracing::debug!("loaded configuration from {}", config_path.display());

    Ok(AppConfig {
        global,
        source: Some(config_path),
    })
}
