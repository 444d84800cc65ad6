//! Length-prefixed chunk framework
//!
//! A chunk is an 8-byte header (tag + declared payload size) followed by the
//! payload. Decoders receive a [`ChunkBody`] that counts what they consume;
//! reading past the declared size is reported as [`RiffError::Overread`] and
//! any bytes left unread are drained so the next sibling starts aligned.
//!
//! Payloads of odd size are followed by one pad byte that the declared size
//! does not count.

use crate::error::{Result, RiffError};
use crate::primitive::{read_tag, read_u32, write_tag, write_u32};
use crate::Tag;
use byteorder::ReadBytesExt;
use std::io::{self, Read, Write};

/// Size of a chunk header in bytes
pub const HEADER_SIZE: u32 = 8;

/// Capability shared by every chunk variant
pub trait Chunk {
    /// Write the chunk, header included
    fn serialize<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()>;

    /// Size of the chunk in bytes, header and pad byte included
    fn total_size(&self) -> u64;
}

/// Chunk tag and declared payload size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    pub tag: Tag,
    /// Payload size, excluding the 8-byte header
    pub size: u32,
}

impl ChunkHeader {
    /// Read a header from the stream
    pub fn read<R: Read + ?Sized>(reader: &mut R) -> Result<Self> {
        let tag = read_tag(reader)?;
        let size = read_u32(reader)?;
        Ok(Self { tag, size })
    }

    /// Header-inclusive size of the chunk
    pub fn total_size(&self) -> u64 {
        u64::from(self.size) + u64::from(HEADER_SIZE)
    }

    /// Fail unless this header carries `expected`
    pub fn expect_tag(&self, expected: Tag) -> Result<()> {
        if self.tag == expected {
            Ok(())
        } else {
            Err(RiffError::UnexpectedChunkId {
                expected,
                found: self.tag,
            })
        }
    }
}

/// Pad bytes owed by a payload of `size` bytes
pub const fn pad_size(size: u64) -> u64 {
    size & 1
}

/// Write a chunk header; `total_size` includes the header but not the pad
///
/// Fails with [`RiffError::ChunkTooLarge`], writing nothing, when the payload
/// does not fit the 32-bit size field.
pub fn encode_chunk_header<W: Write + ?Sized>(writer: &mut W, tag: Tag, total_size: u64) -> Result<()> {
    debug_assert!(total_size >= u64::from(HEADER_SIZE));
    let size = total_size.saturating_sub(u64::from(HEADER_SIZE));
    let size = u32::try_from(size).map_err(|_| RiffError::ChunkTooLarge { tag, size })?;
    write_tag(writer, tag)?;
    write_u32(writer, size)
}

/// Write the pad byte that follows an odd-sized payload
pub fn encode_pad<W: Write + ?Sized>(writer: &mut W, payload_size: u64) -> Result<()> {
    if pad_size(payload_size) > 0 {
        writer.write_all(&[0])?;
    }
    Ok(())
}

/// Payload reader handed to chunk decoders
///
/// Reads pass straight through to the parent stream; the body only keeps
/// count so the framework can enforce the declared size afterwards.
pub struct ChunkBody<'a> {
    inner: &'a mut dyn Read,
    tag: Tag,
    declared: u32,
    consumed: u64,
}

impl<'a> ChunkBody<'a> {
    fn new(inner: &'a mut dyn Read, header: ChunkHeader) -> Self {
        Self {
            inner,
            tag: header.tag,
            declared: header.size,
            consumed: 0,
        }
    }

    /// Tag of the chunk being decoded
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Declared payload size
    pub fn declared(&self) -> u32 {
        self.declared
    }

    /// Bytes read from the payload so far
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Bytes of the declared payload not yet read
    pub fn remaining(&self) -> u64 {
        u64::from(self.declared).saturating_sub(self.consumed)
    }

    /// Discard the rest of the declared payload
    pub fn skip_remaining(&mut self) -> Result<()> {
        let remaining = self.remaining();
        if remaining == 0 {
            return Ok(());
        }
        let skipped = io::copy(&mut (&mut *self.inner).take(remaining), &mut io::sink())?;
        self.consumed += skipped;
        if skipped < remaining {
            return Err(RiffError::TruncatedInput);
        }
        Ok(())
    }
}

impl Read for ChunkBody<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.inner.read(buf)?;
        self.consumed += read as u64;
        Ok(read)
    }
}

/// Decode one chunk from `reader`
///
/// Reads the header, hands the payload to `handler`, then fails with
/// [`RiffError::Overread`] if the handler read past the declared size.
/// Unread payload bytes are skipped.
pub fn decode_chunk<T, E, F>(reader: &mut dyn Read, handler: F) -> std::result::Result<T, E>
where
    E: From<RiffError>,
    F: FnOnce(ChunkHeader, &mut ChunkBody<'_>) -> std::result::Result<T, E>,
{
    let header = ChunkHeader::read(reader)?;
    let mut body = ChunkBody::new(reader, header);
    let value = handler(header, &mut body)?;

    if body.consumed() > u64::from(header.size) {
        return Err(RiffError::Overread {
            tag: header.tag,
            limit: u64::from(header.size),
            requested: body.consumed(),
        }
        .into());
    }
    body.skip_remaining()?;
    Ok(value)
}

/// Decode one child chunk from inside `parent`
///
/// Fails with [`RiffError::Overread`] before the child payload is read when
/// the child's header-inclusive size exceeds what is left of the parent.
/// The pad byte after an odd-sized child is consumed from the parent; a
/// missing pad at the very end of the parent is tolerated.
pub fn decode_child<T, E, F>(parent: &mut ChunkBody<'_>, handler: F) -> std::result::Result<T, E>
where
    E: From<RiffError>,
    F: FnOnce(ChunkHeader, &mut ChunkBody<'_>) -> std::result::Result<T, E>,
{
    let remaining = parent.remaining();
    if remaining < u64::from(HEADER_SIZE) {
        return Err(RiffError::Overread {
            tag: parent.tag(),
            limit: remaining,
            requested: u64::from(HEADER_SIZE),
        }
        .into());
    }

    let mut padded = false;
    let value = decode_chunk(parent, |header, body| {
        if header.total_size() > remaining {
            return Err(RiffError::Overread {
                tag: header.tag,
                limit: remaining,
                requested: header.total_size(),
            }
            .into());
        }
        padded = pad_size(u64::from(header.size)) > 0;
        handler(header, body)
    })?;

    if padded && parent.remaining() > 0 {
        parent.read_u8().map_err(RiffError::from)?;
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::read_u16;

    fn chunk_bytes(tag: &[u8; 4], payload: &[u8]) -> Vec<u8> {
        let mut bytes = tag.to_vec();
        bytes.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        bytes.extend_from_slice(payload);
        bytes
    }

    #[test]
    fn header_size_excludes_header() {
        let mut out = Vec::new();
        encode_chunk_header(&mut out, Tag::new(*b"abcd"), 20).unwrap();
        assert_eq!(out, [b'a', b'b', b'c', b'd', 12, 0, 0, 0]);
    }

    #[test]
    fn header_size_must_fit_32_bits() {
        let mut out = Vec::new();
        let largest = u64::from(u32::MAX) + u64::from(HEADER_SIZE);
        encode_chunk_header(&mut out, Tag::new(*b"big "), largest).unwrap();
        assert_eq!(&out[4..], &[0xFF; 4]);

        out.clear();
        assert!(matches!(
            encode_chunk_header(&mut out, Tag::new(*b"big "), largest + 1),
            Err(RiffError::ChunkTooLarge { size, .. }) if size == u64::from(u32::MAX) + 1
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn odd_payloads_are_padded() {
        let mut out = Vec::new();
        encode_pad(&mut out, 4).unwrap();
        assert!(out.is_empty());
        encode_pad(&mut out, 3).unwrap();
        assert_eq!(out, [0]);
        assert_eq!(pad_size(7), 1);
        assert_eq!(pad_size(0), 0);
    }

    #[test]
    fn handler_sees_tag_and_size() {
        let bytes = chunk_bytes(b"test", &[1, 2, 3, 4]);
        let (tag, size) = decode_chunk::<_, RiffError, _>(&mut &bytes[..], |header, body| {
            assert_eq!(body.declared(), 4);
            Ok((header.tag, header.size))
        })
        .unwrap();
        assert_eq!(tag, Tag::new(*b"test"));
        assert_eq!(size, 4);
    }

    #[test]
    fn unread_payload_is_skipped() {
        let mut bytes = chunk_bytes(b"one ", &[1, 2, 3, 4, 5, 6]);
        bytes.extend(chunk_bytes(b"two ", &[9, 0]));
        let mut reader = &bytes[..];

        let first: u16 = decode_chunk::<_, RiffError, _>(&mut reader, |_, body| read_u16(body)).unwrap();
        let second: u16 = decode_chunk::<_, RiffError, _>(&mut reader, |_, body| read_u16(body)).unwrap();

        assert_eq!(first, 0x0201);
        assert_eq!(second, 0x0009);
        assert!(reader.is_empty());
    }

    #[test]
    fn reading_past_declared_size_is_overread() {
        let mut bytes = chunk_bytes(b"tiny", &[1, 2]);
        bytes.extend_from_slice(&[3, 4]);
        let result = decode_chunk::<u32, RiffError, _>(&mut &bytes[..], |_, body| read_u32(body));
        assert!(matches!(
            result,
            Err(RiffError::Overread { limit: 2, requested: 4, .. })
        ));
    }

    #[test]
    fn truncated_payload_is_reported() {
        let mut bytes = chunk_bytes(b"long", &[0; 10]);
        bytes.truncate(12);
        let result = decode_chunk::<(), RiffError, _>(&mut &bytes[..], |_, _| Ok(()));
        assert!(matches!(result, Err(RiffError::TruncatedInput)));
    }

    #[test]
    fn truncated_header_is_reported() {
        let result = decode_chunk::<(), RiffError, _>(&mut &b"dat"[..], |_, _| Ok(()));
        assert!(matches!(result, Err(RiffError::TruncatedInput)));
    }

    #[test]
    fn child_larger_than_parent_fails_before_reading() {
        let child = chunk_bytes(b"kid ", &[0; 8]);
        let parent = chunk_bytes(b"prnt", &child[..12]);
        let mut padded = parent.clone();
        padded.extend_from_slice(&[0; 8]);

        let result = decode_chunk::<(), RiffError, _>(&mut &padded[..], |_, body| {
            decode_child(body, |_, _| -> Result<()> { panic!("child handler must not run") })
        });
        assert!(matches!(
            result,
            Err(RiffError::Overread { limit: 12, requested: 16, .. })
        ));
    }

    fn read_children(parent: &[u8]) -> Vec<(Tag, Vec<u8>)> {
        decode_chunk::<_, RiffError, _>(&mut &parent[..], |_, body| {
            let mut children = Vec::new();
            while body.remaining() > 0 {
                children.push(decode_child(body, |header, child| -> Result<(Tag, Vec<u8>)> {
                    let mut payload = Vec::new();
                    child.read_to_end(&mut payload)?;
                    Ok((header.tag, payload))
                })?);
            }
            Ok(children)
        })
        .unwrap()
    }

    #[test]
    fn pad_after_odd_child_is_consumed() {
        let mut children = chunk_bytes(b"odd ", &[1, 2, 3]);
        children.push(0);
        children.extend(chunk_bytes(b"next", &[9, 8]));
        let parent = chunk_bytes(b"prnt", &children);

        assert_eq!(
            read_children(&parent),
            vec![(Tag::new(*b"odd "), vec![1, 2, 3]), (Tag::new(*b"next"), vec![9, 8])]
        );
    }

    #[test]
    fn unpadded_last_child_is_accepted() {
        let parent = chunk_bytes(b"prnt", &chunk_bytes(b"odd ", &[1, 2, 3]));
        assert_eq!(read_children(&parent), vec![(Tag::new(*b"odd "), vec![1, 2, 3])]);
    }

    #[test]
    fn child_without_room_for_header_is_overread() {
        let parent = chunk_bytes(b"prnt", &[1, 2, 3]);
        let result = decode_chunk::<(), RiffError, _>(&mut &parent[..], |_, body| {
            decode_child(body, |_, _| -> Result<()> { Ok(()) })
        });
        assert!(matches!(
            result,
            Err(RiffError::Overread { limit: 3, requested: 8, .. })
        ));
    }
}
