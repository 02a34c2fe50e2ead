//! Configuration
//!
//! Layered with the `config` crate. Precedence, lowest first: built-in
//! defaults, the global file, an explicit `--config` file, `FLATTREE__*`
//! environment variables.

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;
pub mod storage;

use crate::logging::LoggingConfig;
use crate::query::DepthLimit;
use crate::tree::FlattenOptions;
use serde::{Deserialize, Serialize};

pub use facade::ConfigLoader;
pub use storage::StorageConfig;

/// Query defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Levels returned by a flat subtree query when the caller gives none
    #[serde(default = "default_flat_depth")]
    pub default_flat_depth: i64,
}

fn default_flat_depth() -> i64 {
    1
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_flat_depth: default_flat_depth(),
        }
    }
}

impl QueryConfig {
    pub fn flat_depth(&self) -> Result<DepthLimit, crate::error::QueryError> {
        DepthLimit::levels(self.default_flat_depth)
    }
}

/// Build limits; 0 disables a bound
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    #[serde(default = "default_max_name_len")]
    pub max_name_len: usize,
    #[serde(default = "default_max_title_len")]
    pub max_title_len: usize,
}

fn default_max_name_len() -> usize {
    512
}

fn default_max_title_len() -> usize {
    192
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            max_name_len: default_max_name_len(),
            max_title_len: default_max_title_len(),
        }
    }
}

impl BuildConfig {
    pub fn flatten_options(&self) -> FlattenOptions {
        FlattenOptions {
            max_name_len: (self.max_name_len > 0).then_some(self.max_name_len),
            max_title_len: (self.max_title_len > 0).then_some(self.max_title_len),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlattreeConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub build: BuildConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}
