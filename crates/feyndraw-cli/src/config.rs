//! Configuration file loading for the CLI
//!
//! This module finds and loads the TOML configuration from the usual
//! locations (explicit path, local directory, platform directory) and checks
//! that the values make sense before the editor uses them.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use feyndraw::config::AppConfig;

use crate::error::CliError;

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (feyndraw/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be read or parsed
/// - Config values are out of range
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, CliError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("feyndraw/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "feyndraw", "feyndraw") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load and validate configuration from a TOML file
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, CliError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    Ok(config)
}

/// Parse configuration text and check its ranges
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate(&config)?;
    Ok(config)
}

// NaN fails both checks
fn non_negative(value: f32) -> bool {
    value >= 0.0
}

fn positive(value: f32) -> bool {
    value > 0.0
}

fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    if !non_negative(config.grid().size()) {
        return Err(ConfigError::Validation(format!(
            "grid.size must be zero or positive, got {}",
            config.grid().size()
        )));
    }

    let view = config.view();
    if !(positive(view.min_zoom()) && view.min_zoom() <= view.max_zoom()) {
        return Err(ConfigError::Validation(format!(
            "view zoom range {}..{} is empty or not positive",
            view.min_zoom(),
            view.max_zoom()
        )));
    }
    if !positive(view.zoom_step()) {
        return Err(ConfigError::Validation(format!(
            "view.zoom_step must be positive, got {}",
            view.zoom_step()
        )));
    }

    if !non_negative(config.edit().merge_tolerance()) {
        return Err(ConfigError::Validation(format!(
            "edit.merge_tolerance must be zero or positive, got {}",
            config.edit().merge_tolerance()
        )));
    }
    Ok(())
}
