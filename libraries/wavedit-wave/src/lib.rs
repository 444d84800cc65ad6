//! WAVE support for Wavedit
//!
//! This crate provides:
//! - The `fmt `, `fact` and `data` chunks
//! - Six sample encodings (8/16/24/32-bit PCM, 32/64-bit float) converted to
//!   and from normalized `f64`
//! - [`WaveFile`], the decoded file with channel/frame sample access
//!
//! # Example
//!
//! ```
//! use wavedit_wave::{SampleFormat, WaveFile};
//!
//! let mut wave = WaveFile::new(SampleFormat::Pcm16, 2, 44_100)?;
//! wave.resize(4)?;
//! wave.set_samples(1, 0, &[0.5, -0.5, 0.25, 0.0])?;
//!
//! let bytes = wave.to_bytes()?;
//! let decoded = WaveFile::from_bytes(&bytes)?;
//! assert_eq!(decoded.get_samples(1, 0, 3)?, vec![0.5, -0.5, 0.25]);
//! # Ok::<(), wavedit_wave::WaveError>(())
//! ```

#![deny(unsafe_code)]

mod chunks;
mod error;
mod file;
mod format;
mod samples;

pub use chunks::{DataChunk, FactChunk, FmtChunk, FMT_PAYLOAD_SIZE};
pub use error::{Result, WaveError};
pub use file::{form_registry, WaveFile};
pub use format::{
    SampleDecoder, SampleEncoder, SampleFormat, IEEE_FLOAT_FORMAT_TAG, PCM_FORMAT_TAG,
};
