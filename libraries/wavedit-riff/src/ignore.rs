use crate::chunk::{Chunk, ChunkBody, ChunkHeader, HEADER_SIZE};
use crate::error::Result;
use crate::Tag;
use std::io::Write;

/// A chunk whose payload was skipped
///
/// Keeps its size so parents can account for it, but writes nothing: skipped
/// chunks are dropped on re-encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IgnoreChunk {
    pub tag: Tag,
    pub size: u32,
}

impl IgnoreChunk {
    /// Discard the payload of any chunk
    pub fn decode(header: ChunkHeader, body: &mut ChunkBody<'_>) -> Result<Self> {
        body.skip_remaining()?;
        Ok(Self {
            tag: header.tag,
            size: header.size,
        })
    }
}

impl Chunk for IgnoreChunk {
    fn serialize<W: Write + ?Sized>(&self, _writer: &mut W) -> Result<()> {
        Ok(())
    }

    fn total_size(&self) -> u64 {
        u64::from(self.size) + u64::from(HEADER_SIZE)
    }
}
