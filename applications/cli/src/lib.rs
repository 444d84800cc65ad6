//! Wavedit CLI Library
//!
//! Reads wave files from disk, runs the crunch and glitch effects over them
//! and writes the result back out.
//!
//! This library exposes the command implementations for testing purposes.

pub mod commands;
pub mod config;
pub mod error;

// Re-export commonly used types for convenience
pub use commands::{build_chain, info, parse_region, read_wave, run, write_wave, WaveSummary};
pub use config::{OutputSettings, WaveditConfig};
pub use error::{CliError, Result};
