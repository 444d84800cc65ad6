//! LIST container chunks

use crate::chunk::{decode_child, encode_chunk_header, Chunk, ChunkBody, ChunkHeader, HEADER_SIZE};
use crate::error::{Result, RiffError};
use crate::primitive::{read_tag, write_tag};
use crate::Tag;
use std::io::Write;
use tracing::debug;

/// Header plus list-type tag
const LIST_PREFIX_SIZE: u32 = HEADER_SIZE + 4;

/// A `LIST` chunk: a list-type tag followed by child chunks of one variant
#[derive(Debug, Clone, PartialEq)]
pub struct ListChunk<T> {
    pub list_type: Tag,
    pub chunks: Vec<T>,
}

impl<T: Chunk> ListChunk<T> {
    /// Create an empty list of the given type
    pub fn new(list_type: Tag) -> Self {
        Self {
            list_type,
            chunks: Vec::new(),
        }
    }

    /// Decode a LIST payload
    ///
    /// `decode_element` is invoked once per child chunk, in stream order,
    /// until the declared payload is used up.
    pub fn decode<E, F>(
        header: ChunkHeader,
        body: &mut ChunkBody<'_>,
        expected_type: Tag,
        mut decode_element: F,
    ) -> std::result::Result<Self, E>
    where
        E: From<RiffError>,
        F: FnMut(ChunkHeader, &mut ChunkBody<'_>) -> std::result::Result<T, E>,
    {
        header.expect_tag(Tag::LIST)?;

        let list_type = read_tag(body)?;
        if list_type != expected_type {
            return Err(RiffError::UnexpectedListType {
                expected: expected_type,
                found: list_type,
            }
            .into());
        }

        let mut chunks = Vec::new();
        while body.remaining() > 0 {
            let element = decode_child(body, |element_header, element_body| {
                decode_element(element_header, element_body)
            })?;
            chunks.push(element);
        }

        debug!("Decoded LIST {} with {} chunks", list_type, chunks.len());
        Ok(Self { list_type, chunks })
    }
}

impl<T: Chunk> Chunk for ListChunk<T> {
    fn serialize<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        encode_chunk_header(writer, Tag::LIST, self.total_size())?;
        write_tag(writer, self.list_type)?;
        for chunk in &self.chunks {
            chunk.serialize(writer)?;
        }
        Ok(())
    }

    fn total_size(&self) -> u64 {
        u64::from(LIST_PREFIX_SIZE) + self.chunks.iter().map(Chunk::total_size).sum::<u64>()
    }
}
