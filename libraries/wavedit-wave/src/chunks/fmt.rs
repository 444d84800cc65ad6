//! `fmt ` chunk: sample encoding, channel layout and rate
//!
//! Only the format, channel count and sample rate are kept. Block alignment
//! and byte rate are derived on encode, never carried over from input.

use crate::error::{Result, WaveError};
use crate::format::SampleFormat;
use std::io::Write;
use tracing::{debug, warn};
use wavedit_riff::primitive::{read_u16, read_u32, write_u16, write_u32};
use wavedit_riff::{encode_chunk_header, Chunk, ChunkBody, ChunkHeader, RiffError, Tag, HEADER_SIZE};

/// Size of the fixed `fmt ` payload
pub const FMT_PAYLOAD_SIZE: u32 = 16;

/// Format descriptor chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FmtChunk {
    pub format: SampleFormat,
    pub channels: u16,
    pub sample_rate: u32,
}

impl FmtChunk {
    pub const TAG: Tag = Tag::new(*b"fmt ");

    /// Create a descriptor, checking that the frame size fits the header
    pub fn new(format: SampleFormat, channels: u16, sample_rate: u32) -> Result<Self> {
        let chunk = Self {
            format,
            channels,
            sample_rate,
        };
        chunk.validate()?;
        Ok(chunk)
    }

    /// Channel count must be non-zero and `channels * byte_depth` must fit
    /// the 16-bit block-align field
    pub fn validate(&self) -> Result<()> {
        if self.channels == 0 || u16::try_from(self.block_size()).is_err() {
            return Err(WaveError::InvalidChannelCount(self.channels));
        }
        Ok(())
    }

    /// Bytes per frame
    pub fn block_size(&self) -> u32 {
        u32::from(self.channels) * u32::from(self.format.byte_depth())
    }

    /// Bytes per second
    pub fn byte_rate(&self) -> u32 {
        self.block_size().saturating_mul(self.sample_rate)
    }

    /// Decode a `fmt ` payload
    ///
    /// Payloads longer than 16 bytes (`cbSize` and extensible tails) are
    /// accepted; the extra bytes are skipped.
    pub fn decode(header: ChunkHeader, body: &mut ChunkBody<'_>) -> Result<Self> {
        header.expect_tag(Self::TAG)?;
        if header.size < FMT_PAYLOAD_SIZE {
            return Err(RiffError::Overread {
                tag: header.tag,
                limit: u64::from(header.size),
                requested: u64::from(FMT_PAYLOAD_SIZE),
            }
            .into());
        }

        let format_tag = read_u16(body)?;
        let channels = read_u16(body)?;
        let sample_rate = read_u32(body)?;
        let byte_rate = read_u32(body)?;
        let block_align = read_u16(body)?;
        let bits_per_sample = read_u16(body)?;

        let format = SampleFormat::from_format_tag(format_tag, bits_per_sample).ok_or(
            WaveError::UnsupportedFormat {
                format_tag,
                bits_per_sample,
            },
        )?;
        let chunk = Self::new(format, channels, sample_rate)?;

        if u32::from(block_align) != chunk.block_size() || byte_rate != chunk.byte_rate() {
            warn!(
                "fmt chunk declares block align {} / byte rate {}, expected {} / {}",
                block_align,
                byte_rate,
                chunk.block_size(),
                chunk.byte_rate()
            );
        }
        if header.size > FMT_PAYLOAD_SIZE {
            debug!(
                "Skipping {} fmt extension bytes",
                header.size - FMT_PAYLOAD_SIZE
            );
        }

        Ok(chunk)
    }
}

impl Chunk for FmtChunk {
    fn serialize<W: Write + ?Sized>(&self, writer: &mut W) -> wavedit_riff::Result<()> {
        encode_chunk_header(writer, Self::TAG, self.total_size())?;
        write_u16(writer, self.format.format_tag())?;
        write_u16(writer, self.channels)?;
        write_u32(writer, self.sample_rate)?;
        write_u32(writer, self.byte_rate())?;
        write_u16(writer, self.block_size() as u16)?;
        write_u16(writer, self.format.bits_per_sample())
    }

    fn total_size(&self) -> u64 {
        u64::from(HEADER_SIZE + FMT_PAYLOAD_SIZE)
    }
}
