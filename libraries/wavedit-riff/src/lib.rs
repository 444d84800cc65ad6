//! RIFF container codec for Wavedit
//!
//! This crate provides:
//! - Little-endian primitive and tag read/write
//! - A length-prefixed chunk framework with declared-size accounting
//! - Generic `LIST` containers
//! - Dispatch of the outer `RIFF` chunk to per-form decoders
//!
//! It knows nothing about audio; `wavedit-wave` registers the `WAVE` form.
//!
//! # Example
//!
//! ```
//! use wavedit_riff::{primitive::read_u32, FormRegistry, Tag};
//!
//! fn decode_counter(body: &mut wavedit_riff::ChunkBody<'_>) -> wavedit_riff::Result<u32> {
//!     read_u32(body)
//! }
//!
//! let registry = FormRegistry::new().with_form(Tag::new(*b"CNTR"), decode_counter);
//!
//! let mut bytes = b"RIFF".to_vec();
//! bytes.extend_from_slice(&8u32.to_le_bytes());
//! bytes.extend_from_slice(b"CNTR");
//! bytes.extend_from_slice(&42u32.to_le_bytes());
//!
//! assert_eq!(registry.decode(&mut &bytes[..]).unwrap(), 42);
//! ```

#![deny(unsafe_code)]

mod chunk;
mod error;
mod form;
mod ignore;
mod list;
pub mod primitive;
mod tag;

pub use chunk::{
    decode_child, decode_chunk, encode_chunk_header, encode_pad, pad_size, Chunk, ChunkBody,
    ChunkHeader, HEADER_SIZE,
};
pub use error::{Result, RiffError};
pub use form::{encode_riff_header, FormDecoder, FormRegistry};
pub use ignore::IgnoreChunk;
pub use list::ListChunk;
pub use tag::Tag;
