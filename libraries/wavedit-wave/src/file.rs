//! The `WAVE` file aggregate and its registration with the RIFF dispatcher

use crate::chunks::{DataChunk, FactChunk, FmtChunk};
use crate::error::{Result, WaveError};
use crate::format::SampleFormat;
use std::io::{Read, Write};
use std::sync::OnceLock;
use tracing::debug;
use wavedit_riff::{
    decode_child, encode_riff_header, pad_size, Chunk, ChunkBody, FormRegistry, IgnoreChunk,
    RiffError, Tag, HEADER_SIZE,
};

/// RIFF header plus form tag
const RIFF_PREFIX_SIZE: u32 = 12;

/// A decoded (or freshly created) wave file
///
/// Always holds exactly one format descriptor, one sample-count descriptor
/// and one sample payload whose length is a whole number of frames.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveFile {
    pub(crate) fmt: FmtChunk,
    pub(crate) fact: FactChunk,
    pub(crate) data: DataChunk,
}

/// Process-wide RIFF form registry with `WAVE` registered
pub fn form_registry() -> &'static FormRegistry<WaveFile, WaveError> {
    static REGISTRY: OnceLock<FormRegistry<WaveFile, WaveError>> = OnceLock::new();
    REGISTRY.get_or_init(|| FormRegistry::new().with_form(Tag::WAVE, WaveFile::decode_form))
}

impl WaveFile {
    /// Create an empty file (no frames)
    pub fn new(format: SampleFormat, channels: u16, sample_rate: u32) -> Result<Self> {
        Ok(Self {
            fmt: FmtChunk::new(format, channels, sample_rate)?,
            fact: FactChunk::new(0),
            data: DataChunk::default(),
        })
    }

    /// Decode a complete RIFF/WAVE stream
    pub fn from_reader(reader: &mut dyn Read) -> Result<Self> {
        form_registry().decode(reader)
    }

    /// Decode a complete RIFF/WAVE byte buffer
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(&mut &bytes[..])
    }

    /// Encode the whole file
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        Ok(self.serialize(writer)?)
    }

    /// Encode the whole file into a new buffer
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(self.total_size() as usize);
        self.write_to(&mut bytes)?;
        Ok(bytes)
    }

    /// Decode the sibling chunks of a `WAVE` form
    ///
    /// Unknown chunks are skipped whole. The last `fmt `, `fact` and `data`
    /// chunk seen wins.
    fn decode_form(body: &mut ChunkBody<'_>) -> Result<Self> {
        let mut fmt = None;
        let mut fact = None;
        let mut data = None;

        while body.remaining() > 0 {
            decode_child(body, |header, chunk_body| -> Result<()> {
                match header.tag {
                    FmtChunk::TAG => fmt = Some(FmtChunk::decode(header, chunk_body)?),
                    FactChunk::TAG => fact = Some(FactChunk::decode(header, chunk_body)?),
                    DataChunk::TAG => data = Some(DataChunk::decode(header, chunk_body)?),
                    _ => {
                        let skipped = IgnoreChunk::decode(header, chunk_body)?;
                        debug!("Skipping chunk {} ({} bytes)", skipped.tag, skipped.size);
                    }
                }
                Ok(())
            })?;
        }

        let fmt: FmtChunk = fmt.ok_or(WaveError::MissingFormatChunk)?;
        let data: DataChunk = data.ok_or(WaveError::MissingDataChunk)?;

        let block_size = fmt.block_size();
        if data.len() % block_size as usize != 0 {
            return Err(WaveError::PartialFrame {
                payload_len: data.len(),
                block_size,
            });
        }
        let available = (data.len() / block_size as usize) as u32;

        let fact = match fact {
            Some(FactChunk { sample_count }) if sample_count > available => {
                return Err(WaveError::SampleCountMismatch {
                    declared: sample_count,
                    available,
                });
            }
            Some(fact) => fact,
            None => FactChunk::new(available),
        };

        debug!(
            "Decoded {:?} wave: {} channels, {} Hz, {} frames",
            fmt.format, fmt.channels, fmt.sample_rate, fact.sample_count
        );
        Ok(Self { fmt, fact, data })
    }

    /// Sample encoding
    pub fn format(&self) -> SampleFormat {
        self.fmt.format
    }

    /// Channel count
    pub fn channels(&self) -> u16 {
        self.fmt.channels
    }

    /// Frames per second
    pub fn sample_rate(&self) -> u32 {
        self.fmt.sample_rate
    }

    /// Bytes per frame
    pub fn block_size(&self) -> u32 {
        self.fmt.block_size()
    }

    /// Addressable frames per channel
    pub fn frame_count(&self) -> u32 {
        self.fact.sample_count
    }

    /// Length in seconds
    pub fn duration_secs(&self) -> f64 {
        f64::from(self.frame_count()) / f64::from(self.sample_rate())
    }

    pub fn fmt_chunk(&self) -> &FmtChunk {
        &self.fmt
    }

    pub fn fact_chunk(&self) -> &FactChunk {
        &self.fact
    }

    /// Raw interleaved sample bytes
    pub fn data(&self) -> &[u8] {
        self.data.as_slice()
    }

    /// Grow or shrink to `frames` frames
    ///
    /// New frames are silent; the sample-count descriptor follows. Fails with
    /// [`RiffError::ChunkTooLarge`], leaving the file unchanged, when the
    /// encoded file would not fit the RIFF size field.
    pub fn resize(&mut self, frames: u32) -> Result<()> {
        let len = u64::from(frames) * u64::from(self.block_size());
        let riff_size = u64::from(RIFF_PREFIX_SIZE - HEADER_SIZE)
            + self.fmt.total_size()
            + self.fact.total_size()
            + u64::from(HEADER_SIZE)
            + len
            + pad_size(len);
        if riff_size > u64::from(u32::MAX) {
            return Err(RiffError::ChunkTooLarge {
                tag: Tag::RIFF,
                size: riff_size,
            }
            .into());
        }

        self.data.resize(len as usize, self.format().silence_byte());
        self.fact = FactChunk::new(frames);
        Ok(())
    }
}

impl Chunk for WaveFile {
    fn serialize<W: Write + ?Sized>(&self, writer: &mut W) -> wavedit_riff::Result<()> {
        encode_riff_header(writer, self.total_size(), Tag::WAVE)?;
        self.fmt.serialize(writer)?;
        self.fact.serialize(writer)?;
        self.data.serialize(writer)
    }

    fn total_size(&self) -> u64 {
        u64::from(RIFF_PREFIX_SIZE)
            + self.fmt.total_size()
            + self.fact.total_size()
            + self.data.total_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_file_is_empty() {
        let wave = WaveFile::new(SampleFormat::Pcm16, 2, 44_100).unwrap();
        assert_eq!(wave.frame_count(), 0);
        assert_eq!(wave.block_size(), 4);
        assert!(wave.data().is_empty());
        assert_eq!(wave.total_size(), 12 + 24 + 12 + 8);
    }

    #[test]
    fn new_rejects_zero_channels() {
        assert!(matches!(
            WaveFile::new(SampleFormat::Pcm16, 0, 44_100),
            Err(WaveError::InvalidChannelCount(0))
        ));
    }

    #[test]
    fn resize_fills_with_silence() {
        let mut wave = WaveFile::new(SampleFormat::Pcm8, 2, 8_000).unwrap();
        wave.resize(3).unwrap();
        assert_eq!(wave.data(), &[0x80; 6]);
        assert_eq!(wave.frame_count(), 3);

        wave.resize(1).unwrap();
        assert_eq!(wave.data().len(), 2);
        assert_eq!(wave.fact_chunk().sample_count, 1);
    }

    #[test]
    fn encoded_length_matches_total_size() {
        let mut wave = WaveFile::new(SampleFormat::Float32, 3, 22_050).unwrap();
        wave.resize(10).unwrap();
        let bytes = wave.to_bytes().unwrap();
        assert_eq!(bytes.len(), wave.total_size() as usize);
        assert_eq!(
            u64::from(u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]])),
            wave.total_size() - 8
        );
    }

    #[test]
    fn odd_payload_is_padded() {
        let mut wave = WaveFile::new(SampleFormat::Pcm8, 1, 8_000).unwrap();
        wave.resize(3).unwrap();
        let bytes = wave.to_bytes().unwrap();

        assert_eq!(bytes.len() as u64, wave.total_size());
        assert_eq!(bytes.len(), 12 + 24 + 12 + 8 + 3 + 1);
        assert_eq!(&bytes[bytes.len() - 4..], &[0x80, 0x80, 0x80, 0x00]);
        assert_eq!(WaveFile::from_bytes(&bytes).unwrap(), wave);
    }

    #[test]
    fn resize_stops_at_the_riff_size_limit() {
        // Header chunks take 48 bytes of the RIFF size; an odd payload adds a pad
        let mut wave = WaveFile::new(SampleFormat::Pcm8, 1, 8_000).unwrap();
        wave.resize(3).unwrap();
        for frames in [u32::MAX - 20, u32::MAX - 48, u32::MAX] {
            assert!(matches!(
                wave.resize(frames),
                Err(WaveError::Riff(RiffError::ChunkTooLarge { tag, size }))
                    if tag == Tag::RIFF && size > u64::from(u32::MAX)
            ));
        }
        assert_eq!(wave.frame_count(), 3);
        assert_eq!(wave.data().len(), 3);

        let mut wide = WaveFile::new(SampleFormat::Float64, 2, 8_000).unwrap();
        assert!(wide.resize(u32::MAX / 16).is_err());
        assert_eq!(wide.frame_count(), 0);
    }

    #[test]
    fn duration_follows_rate() {
        let mut wave = WaveFile::new(SampleFormat::Pcm16, 1, 8_000).unwrap();
        wave.resize(4_000).unwrap();
        assert!((wave.duration_secs() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn registry_knows_wave() {
        assert!(form_registry().contains(Tag::WAVE));
    }
}
