/// File handling and effect pipelines behind the CLI subcommands
use crate::config::WaveditConfig;
use crate::error::{CliError, Result};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};
use wavedit_effects::{CrunchEffect, EffectChain, GlitchEffect, GlitchRegion};
use wavedit_wave::{SampleFormat, WaveFile};

/// Decode a wave file from disk
pub fn read_wave(path: &Path) -> Result<WaveFile> {
    let mut reader = BufReader::new(File::open(path)?);
    let wave = WaveFile::from_reader(&mut reader)?;
    debug!("Read {:?}: {} frames", path, wave.frame_count());
    Ok(wave)
}

/// Encode a wave file to disk
///
/// Refuses to replace an existing file unless `overwrite` is set.
pub fn write_wave(wave: &WaveFile, path: &Path, overwrite: bool) -> Result<()> {
    if !overwrite && path.exists() {
        return Err(CliError::OutputExists(path.to_path_buf()));
    }

    let mut writer = BufWriter::new(File::create(path)?);
    wave.write_to(&mut writer)?;
    writer.flush()?;
    debug!("Wrote {:?}: {} frames", path, wave.frame_count());
    Ok(())
}

/// Parse a `start:end:beat` region, all in seconds
pub fn parse_region(text: &str) -> Result<GlitchRegion> {
    let invalid = || CliError::InvalidRegion(text.to_string());

    let parts = text
        .split(':')
        .map(|part| part.trim().parse::<f64>().map_err(|_| invalid()))
        .collect::<Result<Vec<_>>>()?;

    match parts[..] {
        [start, end, beat] => Ok(GlitchRegion::new(start, end, beat)),
        _ => Err(invalid()),
    }
}

/// Format summary printed by `info`
#[derive(Debug, Clone, PartialEq)]
pub struct WaveSummary {
    pub format: SampleFormat,
    pub channels: u16,
    pub sample_rate: u32,
    pub frames: u32,
    pub duration_secs: f64,
    pub data_bytes: usize,
}

impl WaveSummary {
    pub fn new(wave: &WaveFile) -> Self {
        Self {
            format: wave.format(),
            channels: wave.channels(),
            sample_rate: wave.sample_rate(),
            frames: wave.frame_count(),
            duration_secs: wave.duration_secs(),
            data_bytes: wave.data().len(),
        }
    }
}

impl fmt::Display for WaveSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoding = if self.format.is_float() {
            "float"
        } else {
            "PCM"
        };
        writeln!(
            f,
            "Format:      {}-bit {}",
            self.format.bits_per_sample(),
            encoding
        )?;
        writeln!(f, "Channels:    {}", self.channels)?;
        writeln!(f, "Sample rate: {} Hz", self.sample_rate)?;
        writeln!(f, "Frames:      {}", self.frames)?;
        writeln!(f, "Duration:    {:.3} s", self.duration_secs)?;
        write!(f, "Data:        {} bytes", self.data_bytes)
    }
}

/// Summarize the file at `path`
pub fn info(path: &Path) -> Result<WaveSummary> {
    Ok(WaveSummary::new(&read_wave(path)?))
}

/// Build the effect chain for a run: crunch first, then the glitch regions
pub fn build_chain(
    config: &WaveditConfig,
    crunch: bool,
    regions: Vec<GlitchRegion>,
) -> Result<EffectChain> {
    let mut chain = EffectChain::new();
    if crunch {
        chain.add_effect(Box::new(CrunchEffect::with_settings(config.crunch)?));
    }
    if !regions.is_empty() {
        chain.add_effect(Box::new(GlitchEffect::with_settings(
            regions,
            config.glitch,
        )?));
    }
    Ok(chain)
}

/// Decode `input`, run `chain` over it and encode the result to `output`
///
/// Nothing is written when decoding or any effect fails.
pub fn run(
    chain: &mut EffectChain,
    input: &Path,
    output: &Path,
    overwrite: bool,
) -> Result<WaveSummary> {
    if !overwrite && output.exists() {
        return Err(CliError::OutputExists(output.to_path_buf()));
    }

    let mut wave = read_wave(input)?;
    info!(
        "Processing {:?} ({} effects, {} frames)",
        input,
        chain.len(),
        wave.frame_count()
    );
    chain.apply(&mut wave)?;
    write_wave(&wave, output, overwrite)?;
    info!("Wrote {:?}", output);

    Ok(WaveSummary::new(&wave))
}
