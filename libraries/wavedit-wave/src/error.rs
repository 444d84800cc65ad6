/// WAVE-specific errors
use thiserror::Error;
use wavedit_riff::RiffError;

/// Result type alias using `WaveError`
pub type Result<T> = std::result::Result<T, WaveError>;

/// WAVE error types
#[derive(Error, Debug)]
pub enum WaveError {
    /// The `fmt ` chunk names an encoding outside the six supported ones
    #[error("Unsupported format: format tag {format_tag}, {bits_per_sample} bits per sample")]
    UnsupportedFormat { format_tag: u16, bits_per_sample: u16 },

    /// No `fmt ` chunk in the file
    #[error("Wave file is missing its format chunk")]
    MissingFormatChunk,

    /// No `data` chunk in the file
    #[error("Wave file is missing its data chunk")]
    MissingDataChunk,

    /// Range end lies past the last frame
    #[error("Sample range ends at frame {end} but the file has {frames} frames")]
    SampleOutOfRange { end: u64, frames: u32 },

    /// Range end lies before its start
    #[error("Invalid sample range: end {end} < start {start}")]
    InvalidRange { start: u32, end: u32 },

    /// Channel index past the last channel
    #[error("Channel {channel} does not exist (file has {channels} channels)")]
    InvalidChannel { channel: u16, channels: u16 },

    /// Channel count is zero or the frame size does not fit the header
    #[error("Invalid channel count: {0}")]
    InvalidChannelCount(u16),

    /// The sample payload ends partway through a frame
    #[error("Data chunk of {payload_len} bytes is not a whole number of {block_size}-byte frames")]
    PartialFrame { payload_len: usize, block_size: u32 },

    /// The `fact` chunk claims more frames than the payload holds
    #[error("Fact chunk declares {declared} frames but the data chunk holds {available}")]
    SampleCountMismatch { declared: u32, available: u32 },

    /// Container-level failure
    #[error(transparent)]
    Riff(#[from] RiffError),
}

impl From<std::io::Error> for WaveError {
    fn from(err: std::io::Error) -> Self {
        Self::Riff(err.into())
    }
}
