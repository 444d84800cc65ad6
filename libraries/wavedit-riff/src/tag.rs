//! Four-character chunk identifiers

use crate::error::RiffError;
use std::fmt;

/// Four-byte identifier naming a chunk, a RIFF form or a LIST type
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag([u8; 4]);

impl Tag {
    /// Outermost container chunk
    pub const RIFF: Self = Self(*b"RIFF");

    /// Nested chunk list
    pub const LIST: Self = Self(*b"LIST");

    /// RIFF form type for wave audio
    pub const WAVE: Self = Self(*b"WAVE");

    /// Create a tag from raw bytes
    ///
    /// The bytes are taken as-is, as are tags read from a stream, so chunks
    /// with non-ASCII ids can still be skipped. [`TryFrom`] checks them.
    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Raw tag bytes
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Tag {
    type Error = RiffError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let bytes = <[u8; 4]>::try_from(bytes).map_err(|_| RiffError::InvalidTag(bytes.len()))?;
        if !bytes.is_ascii() {
            return Err(RiffError::NonAsciiTag(bytes));
        }
        Ok(Self(bytes))
    }
}

impl TryFrom<&str> for Tag {
    type Error = RiffError;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        Self::try_from(text.as_bytes())
    }
}

impl From<[u8; 4]> for Tag {
    fn from(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Tag {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_four_byte_strings() {
        let tag = Tag::try_from("fmt ").unwrap();
        assert_eq!(tag.as_bytes(), b"fmt ");
    }

    #[test]
    fn rejects_wrong_lengths() {
        assert!(matches!(Tag::try_from("fmt"), Err(RiffError::InvalidTag(3))));
        assert!(matches!(Tag::try_from("data!"), Err(RiffError::InvalidTag(5))));
        assert!(matches!(Tag::try_from(""), Err(RiffError::InvalidTag(0))));
    }

    #[test]
    fn rejects_non_ascii_bytes() {
        let bytes = [b'd', b'a', b't', 0xE9];
        assert!(matches!(
            Tag::try_from(&bytes[..]),
            Err(RiffError::NonAsciiTag(b)) if b == bytes
        ));
        assert!(matches!(Tag::try_from("d\u{e9}t"), Err(RiffError::NonAsciiTag(_))));
        assert_eq!(Tag::new(bytes).as_bytes(), &bytes);
    }

    #[test]
    fn display_quotes_the_text() {
        assert_eq!(Tag::WAVE.to_string(), "\"WAVE\"");
        assert_eq!(format!("{:?}", Tag::LIST), "Tag(\"LIST\")");
    }
}
