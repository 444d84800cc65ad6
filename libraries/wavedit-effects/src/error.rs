/// Effect errors
use thiserror::Error;
use wavedit_wave::WaveError;

/// Result type alias using `EffectError`
pub type Result<T> = std::result::Result<T, EffectError>;

/// Effect error types
#[derive(Error, Debug)]
pub enum EffectError {
    /// A region time is negative, NaN or infinite
    #[error("Invalid time: {0} seconds")]
    InvalidTime(f64),

    /// The beat is empty or two beats do not fit the region
    #[error("Invalid beat of {beat} frames for a {width}-frame region")]
    InvalidBeat { beat: u32, width: u32 },

    /// Effect settings out of range
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// Sample access failure
    #[error(transparent)]
    Wave(#[from] WaveError),
}
