mod settings;

use std::path::Path;

use config::{Config, ConfigError, Environment, File};

use settings::PartialSettings;

pub use settings::{LogSettings, RegistrySettings, Settings};

/// Default configuration file, resolved relative to the working directory.
/// It is optional; a missing file leaves the defaults in place.
pub const DEFAULT_CONFIG_FILE: &str = "config/default";

/// Prefix of environment overrides, e.g. `POLLSUB__LOG__LEVEL=debug`.
pub const ENV_PREFIX: &str = "POLLSUB";

/// Loads the configuration from the default file and environment variables
/// and merges it over `Settings::default()`.
pub fn load_config() -> Result<Settings, ConfigError> {
    load_config_from(None)
}

/// Same as [`load_config`], but reads `path` instead of the default file.
/// An explicitly named file must exist.
pub fn load_config_from(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let config = Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let partial: PartialSettings = config.try_deserialize()?;
    Ok(partial.merge(Settings::default()))
}
