//! Environment variable source: FLATTREE_* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// Uses FLATTREE_ prefix and __ as separator for nested keys,
/// e.g. `FLATTREE__QUERY__DEFAULT_FLAT_DEPTH=2`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("FLATTREE")
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
