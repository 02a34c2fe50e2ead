//! StorageConfig and store path resolution.

use crate::config::paths::xdg_root;
use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path to the record store; None means `<data dir>/flattree/store`
    #[serde(default)]
    pub store_path: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolve the store path, with an optional CLI override taking precedence.
    pub fn resolve_store_path(&self, cli_store: Option<PathBuf>) -> Result<PathBuf, ApiError> {
        if let Some(path) = cli_store.filter(|p| !p.as_os_str().is_empty()) {
            return Ok(path);
        }
        if let Some(path) = self.store_path.clone().filter(|p| !p.as_os_str().is_empty()) {
            return Ok(path);
        }
        Ok(xdg_root::app_data_dir()?.join("store"))
    }
}
