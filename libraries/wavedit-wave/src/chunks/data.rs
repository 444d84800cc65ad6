use crate::error::Result;
use std::io::{Read, Write};
use wavedit_riff::{
    encode_chunk_header, encode_pad, pad_size, Chunk, ChunkBody, ChunkHeader, RiffError, Tag,
    HEADER_SIZE,
};

/// `data` chunk: interleaved sample bytes, kept exactly as read
///
/// An odd-sized payload is written with a trailing pad byte.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataChunk {
    bytes: Vec<u8>,
}

impl DataChunk {
    pub const TAG: Tag = Tag::new(*b"data");

    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn decode(header: ChunkHeader, body: &mut ChunkBody<'_>) -> Result<Self> {
        header.expect_tag(Self::TAG)?;

        // Grow with the stream instead of trusting the declared size up front
        let mut bytes = Vec::new();
        body.by_ref()
            .take(u64::from(header.size))
            .read_to_end(&mut bytes)?;
        if bytes.len() < header.size as usize {
            return Err(RiffError::TruncatedInput.into());
        }
        Ok(Self { bytes })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    pub fn resize(&mut self, len: usize, fill: u8) {
        self.bytes.resize(len, fill);
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.bytes
    }
}

impl Chunk for DataChunk {
    fn serialize<W: Write + ?Sized>(&self, writer: &mut W) -> wavedit_riff::Result<()> {
        let len = self.bytes.len() as u64;
        encode_chunk_header(writer, Self::TAG, u64::from(HEADER_SIZE) + len)?;
        writer.write_all(&self.bytes)?;
        encode_pad(writer, len)
    }

    fn total_size(&self) -> u64 {
        let len = self.bytes.len() as u64;
        u64::from(HEADER_SIZE) + len + pad_size(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WaveError;
    use wavedit_riff::decode_chunk;

    #[test]
    fn payload_is_opaque() {
        let data = DataChunk::new(vec![0xDE, 0xAD, 0xBE, 0xEF, 0x00]);
        let mut out = Vec::new();
        data.serialize(&mut out).unwrap();
        assert_eq!(&out[..8], b"data\x05\x00\x00\x00");
        assert_eq!(out.len(), 14);
        assert_eq!(out[13], 0);
        assert_eq!(data.total_size(), 14);

        let decoded: DataChunk = decode_chunk(&mut &out[..], DataChunk::decode).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn short_payload_is_truncated() {
        let bytes = b"data\x10\x00\x00\x00\x01\x02";
        let result: Result<DataChunk> = decode_chunk(&mut &bytes[..], DataChunk::decode);
        assert!(matches!(result, Err(WaveError::Riff(RiffError::TruncatedInput))));
    }
}
