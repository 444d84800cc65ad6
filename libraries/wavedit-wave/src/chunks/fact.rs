use crate::error::Result;
use std::io::Write;
use wavedit_riff::primitive::{read_u32, write_u32};
use wavedit_riff::{encode_chunk_header, Chunk, ChunkBody, ChunkHeader, Tag, HEADER_SIZE};

/// `fact` chunk: per-channel frame count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactChunk {
    pub sample_count: u32,
}

impl FactChunk {
    pub const TAG: Tag = Tag::new(*b"fact");

    pub fn new(sample_count: u32) -> Self {
        Self { sample_count }
    }

    pub fn decode(header: ChunkHeader, body: &mut ChunkBody<'_>) -> Result<Self> {
        header.expect_tag(Self::TAG)?;
        Ok(Self::new(read_u32(body)?))
    }
}

impl Chunk for FactChunk {
    fn serialize<W: Write + ?Sized>(&self, writer: &mut W) -> wavedit_riff::Result<()> {
        encode_chunk_header(writer, Self::TAG, self.total_size())?;
        write_u32(writer, self.sample_count)
    }

    fn total_size(&self) -> u64 {
        u64::from(HEADER_SIZE) + 4
    }
}
