/// CLI error types
use std::path::PathBuf;
use thiserror::Error;
use wavedit_effects::EffectError;
use wavedit_wave::WaveError;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid region '{0}': expected start:end:beat in seconds")]
    InvalidRegion(String),

    #[error("Output file {0:?} already exists (use --force to overwrite)")]
    OutputExists(PathBuf),

    #[error("Wave error: {0}")]
    Wave(#[from] WaveError),

    #[error("Effect error: {0}")]
    Effect(#[from] EffectError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}
