//! XDG Base Directory utilities for config and data locations.

use crate::error::ApiError;
use std::path::PathBuf;

const APP_DIR: &str = "flattree";

/// Get XDG data home directory
///
/// Returns `$XDG_DATA_HOME` if set, otherwise defaults to `$HOME/.local/share`
/// Follows XDG Base Directory Specification
pub fn data_home() -> Option<PathBuf> {
    if let Ok(xdg_data_home) = std::env::var("XDG_DATA_HOME") {
        if !xdg_data_home.is_empty() {
            return Some(PathBuf::from(xdg_data_home));
        }
    }

    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".local").join("share"))
}

/// Get XDG config home directory
///
/// Returns `$XDG_CONFIG_HOME` if set, otherwise defaults to `$HOME/.config`
pub fn config_home() -> Option<PathBuf> {
    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg_config_home.is_empty() {
            return Some(PathBuf::from(xdg_config_home));
        }
    }

    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config"))
}

/// `$XDG_CONFIG_HOME/flattree/config.toml`
pub fn global_config_path() -> Option<PathBuf> {
    config_home().map(|home| home.join(APP_DIR).join("config.toml"))
}

/// Get the data directory for the application
///
/// Uses `$XDG_DATA_HOME/flattree/`, falling back to the platform data
/// directory from `ProjectDirs` when no XDG variables are available.
pub fn app_data_dir() -> Result<PathBuf, ApiError> {
    if let Some(home) = data_home() {
        return Ok(home.join(APP_DIR));
    }
    let project_dirs = directories::ProjectDirs::from("", APP_DIR, APP_DIR).ok_or_else(|| {
        ApiError::ConfigError("Could not determine platform data directory".to_string())
    })?;
    Ok(project_dirs.data_dir().to_path_buf())
}
