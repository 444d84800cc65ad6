//! Little-endian integer and tag read/write
//!
//! Every reader fails with [`RiffError::TruncatedInput`] when the stream ends
//! before the full width is available.

use crate::error::{Result, RiffError};
use crate::Tag;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

/// Read a 16-bit little-endian word
pub fn read_u16<R: Read + ?Sized>(reader: &mut R) -> Result<u16> {
    Ok(reader.read_u16::<LittleEndian>()?)
}

/// Read a 32-bit little-endian double word
pub fn read_u32<R: Read + ?Sized>(reader: &mut R) -> Result<u32> {
    Ok(reader.read_u32::<LittleEndian>()?)
}

/// Read a four-byte tag
pub fn read_tag<R: Read + ?Sized>(reader: &mut R) -> Result<Tag> {
    let mut bytes = [0u8; 4];
    reader.read_exact(&mut bytes)?;
    Ok(Tag::new(bytes))
}

/// Write a 16-bit little-endian word
pub fn write_u16<W: Write + ?Sized>(writer: &mut W, value: u16) -> Result<()> {
    Ok(writer.write_u16::<LittleEndian>(value)?)
}

/// Write a 32-bit little-endian double word
pub fn write_u32<W: Write + ?Sized>(writer: &mut W, value: u32) -> Result<()> {
    Ok(writer.write_u32::<LittleEndian>(value)?)
}

/// Write a tag, which must be exactly four bytes
pub fn write_tag<W: Write + ?Sized>(writer: &mut W, tag: impl AsRef<[u8]>) -> Result<()> {
    let bytes = tag.as_ref();
    if bytes.len() != 4 {
        return Err(RiffError::InvalidTag(bytes.len()));
    }
    writer.write_all(bytes)?;
    Ok(())
}
