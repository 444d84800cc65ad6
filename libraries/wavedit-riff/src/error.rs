//! Error types for the RIFF chunk codec

use crate::Tag;
use thiserror::Error;

/// Result type for RIFF operations
pub type Result<T> = std::result::Result<T, RiffError>;

/// Errors that can occur while decoding or encoding RIFF chunks
#[derive(Error, Debug)]
pub enum RiffError {
    /// The stream ended before a complete value could be read
    #[error("Unexpected end of input")]
    TruncatedInput,

    /// A tag was not exactly four bytes long
    #[error("Invalid tag: expected 4 bytes, got {0}")]
    InvalidTag(usize),

    /// A tag held a byte outside ASCII
    #[error("Invalid tag: {0:?} is not ASCII")]
    NonAsciiTag([u8; 4]),

    /// A chunk payload does not fit the 32-bit size field
    #[error("Chunk {tag} payload of {size} bytes exceeds the 32-bit size limit")]
    ChunkTooLarge { tag: Tag, size: u64 },

    /// A chunk consumed (or would consume) more bytes than its parent allows
    #[error("Chunk {tag} needs {requested} bytes but only {limit} are available")]
    Overread { tag: Tag, limit: u64, requested: u64 },

    /// A LIST chunk carried a different list type than the caller expected
    #[error("Unexpected list type: expected {expected}, found {found}")]
    UnexpectedListType { expected: Tag, found: Tag },

    /// A chunk decoder was handed a chunk with the wrong tag
    #[error("Unexpected chunk id: expected {expected}, found {found}")]
    UnexpectedChunkId { expected: Tag, found: Tag },

    /// The outermost chunk was not a RIFF chunk
    #[error("Not a RIFF stream (outer chunk is {0})")]
    NotRiff(Tag),

    /// No decoder is registered for the RIFF form type
    #[error("No decoder registered for RIFF form {0}")]
    UnknownForm(Tag),

    /// Underlying I/O failure
    #[error("IO error: {0}")]
    Io(std::io::Error),
}

impl From<std::io::Error> for RiffError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            Self::TruncatedInput
        } else {
            Self::Io(err)
        }
    }
}
