//! Chunks of the `WAVE` form

mod data;
mod fact;
mod fmt;

pub use data::DataChunk;
pub use fact::FactChunk;
pub use fmt::{FmtChunk, FMT_PAYLOAD_SIZE};
