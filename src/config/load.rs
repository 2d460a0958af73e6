//! Configuration loading from files.

use std::path::Path;

use super::{Config, ConfigError, format_config_error};

impl Config {
    /// Load the config from the command line argument, defaulting to
    /// `notegarden.yaml` in the current directory.
    pub async fn load_from_arg(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config_file = config_file.unwrap_or(Path::new("notegarden.yaml"));
        let config_file = if config_file.is_relative() {
            std::env::current_dir()
                .map_err(ConfigError::CwdFailure)?
                .join(config_file)
        } else {
            config_file.to_path_buf()
        };

        Self::load_from_file(&config_file).await
    }

    /// Load the config from a file path.
    pub(crate) async fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::Validation(format!(
                "config file not found: {}\n\nRun 'notegarden init <path>' to create one",
                path.display()
            )));
        }

        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .build()?;

        settings
            .try_deserialize::<Config>()
            .map_err(|e| ConfigError::Validation(format_config_error(&e.to_string())))
    }
}
