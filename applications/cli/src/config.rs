/// CLI configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use wavedit_effects::{CrunchSettings, GlitchSettings};

/// Config file read when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "wavedit.toml";

/// Environment variable prefix (`WAVEDIT_GLITCH__SMOOTHING_RADIUS=3`)
pub const ENV_PREFIX: &str = "WAVEDIT";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct WaveditConfig {
    #[serde(default)]
    pub glitch: GlitchSettings,

    #[serde(default)]
    pub crunch: CrunchSettings,

    #[serde(default)]
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutputSettings {
    /// Replace existing output files without `--force`
    #[serde(default)]
    pub overwrite: bool,
}

impl WaveditConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// [`load`](Self::load) with the environment replaced by `env`
    pub fn load_with_env(path: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()).required(true));
            }
            None => {
                let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        // Override with environment variables (prefixed with WAVEDIT_)
        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.glitch
            .validate()
            .map_err(|e| CliError::Config(format!("glitch: {}", e)))?;
        self.crunch
            .validate()
            .map_err(|e| CliError::Config(format!("crunch: {}", e)))?;
        Ok(())
    }
}
