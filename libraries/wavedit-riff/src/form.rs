//! Top-level RIFF dispatch by form type
//!
//! A [`FormRegistry`] maps form tags (`WAVE`, `AVI `, ...) to decoders. It is
//! built once, before the first decode, and only read afterwards; crates that
//! want a process-wide instance keep it in a `OnceLock`.

use crate::chunk::{decode_chunk, encode_chunk_header, ChunkBody};
use crate::error::{Result, RiffError};
use crate::primitive::{read_tag, write_tag};
use crate::Tag;
use std::collections::HashMap;
use std::fmt;
use std::io::{Read, Write};
use tracing::debug;

/// Decoder for the payload of a RIFF form, positioned after the form tag
pub type FormDecoder<T, E> = fn(&mut ChunkBody<'_>) -> std::result::Result<T, E>;

/// Registry of RIFF form decoders
pub struct FormRegistry<T, E = RiffError> {
    decoders: HashMap<Tag, FormDecoder<T, E>>,
}

impl<T, E: From<RiffError>> FormRegistry<T, E> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            decoders: HashMap::new(),
        }
    }

    /// Register a decoder, replacing any previous decoder for `form`
    pub fn register(&mut self, form: Tag, decoder: FormDecoder<T, E>) -> &mut Self {
        self.decoders.insert(form, decoder);
        self
    }

    /// Builder-style [`register`](Self::register)
    #[must_use]
    pub fn with_form(mut self, form: Tag, decoder: FormDecoder<T, E>) -> Self {
        self.register(form, decoder);
        self
    }

    /// Check whether `form` has a decoder
    pub fn contains(&self, form: Tag) -> bool {
        self.decoders.contains_key(&form)
    }

    /// Decode a complete RIFF stream
    ///
    /// Fails with [`RiffError::NotRiff`] when the outer tag is not `RIFF` and
    /// with [`RiffError::UnknownForm`] when the form has no decoder.
    pub fn decode(&self, reader: &mut dyn Read) -> std::result::Result<T, E> {
        decode_chunk(reader, |header, body| {
            if header.tag != Tag::RIFF {
                return Err(RiffError::NotRiff(header.tag).into());
            }

            let form = read_tag(body)?;
            let decoder = self
                .decoders
                .get(&form)
                .ok_or(RiffError::UnknownForm(form))?;

            debug!("Decoding RIFF form {} ({} byte payload)", form, header.size);
            decoder(body)
        })
    }
}

impl<T, E: From<RiffError>> Default for FormRegistry<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> fmt::Debug for FormRegistry<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormRegistry")
            .field("forms", &self.decoders.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Write the outer `RIFF` header and form tag
///
/// `total_size` is the size of the whole stream, header included. Fails
/// with [`RiffError::ChunkTooLarge`] before writing when it does not fit.
pub fn encode_riff_header<W: Write + ?Sized>(writer: &mut W, total_size: u64, form: Tag) -> Result<()> {
    encode_chunk_header(writer, Tag::RIFF, total_size)?;
    write_tag(writer, form)
}
