//! Region glitch effect
//!
//! Each region is split at its midpoint. The first half plays the region
//! back at a rising speed, the second half loops the region's last two
//! beats. Sharp jumps left behind are then softened with a moving average.

use crate::chain::WaveEffect;
use crate::error::{EffectError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use wavedit_wave::WaveFile;

/// Positions at the end of a region that keep their original value
///
/// The speed-up curve can address past the region as its position nears the
/// end.
pub const UNTOUCHED_TAIL: usize = 2;

/// Glitch settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlitchSettings {
    /// Jump between samples `2 * smoothing_radius` apart that triggers
    /// smoothing
    pub discontinuity_threshold: f64,
    /// Half-width of the moving average
    pub smoothing_radius: usize,
}

impl GlitchSettings {
    /// Validate settings
    pub fn validate(&self) -> Result<()> {
        if !self.discontinuity_threshold.is_finite() || self.discontinuity_threshold < 0.0 {
            return Err(EffectError::InvalidSettings(format!(
                "Discontinuity threshold must be a non-negative number, got {}",
                self.discontinuity_threshold
            )));
        }
        if self.smoothing_radius == 0 {
            return Err(EffectError::InvalidSettings(
                "Smoothing radius must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for GlitchSettings {
    fn default() -> Self {
        Self {
            discontinuity_threshold: 0.3,
            smoothing_radius: 2,
        }
    }
}

/// Region to glitch, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlitchRegion {
    pub start_secs: f64,
    pub end_secs: f64,
    pub beat_secs: f64,
}

/// Region to glitch, in frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRegion {
    pub start: u32,
    pub end: u32,
    pub beat: u32,
}

impl FrameRegion {
    pub fn width(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }
}

impl GlitchRegion {
    pub fn new(start_secs: f64, end_secs: f64, beat_secs: f64) -> Self {
        Self {
            start_secs,
            end_secs,
            beat_secs,
        }
    }

    /// Convert to frame indices with `round(time * sample_rate)`
    pub fn to_frames(&self, sample_rate: u32) -> Result<FrameRegion> {
        Ok(FrameRegion {
            start: seconds_to_frames(self.start_secs, sample_rate)?,
            end: seconds_to_frames(self.end_secs, sample_rate)?,
            beat: seconds_to_frames(self.beat_secs, sample_rate)?,
        })
    }
}

fn seconds_to_frames(secs: f64, sample_rate: u32) -> Result<u32> {
    if !secs.is_finite() || secs < 0.0 {
        return Err(EffectError::InvalidTime(secs));
    }
    // Saturates; anything past u32::MAX is out of range for the file anyway
    Ok((secs * f64::from(sample_rate)).round() as u32)
}

/// Speed-up half: cross-fade around index `(2x^2 + x) * W`, `x = p / W`
///
/// Valid for `location < source.len() - 2`.
pub fn speed_up(source: &[f64], location: usize) -> f64 {
    let width = source.len() as f64;
    let x = location as f64 / width;
    let y = (2.0 * x * x + x) * width;

    let index = y.floor();
    let fade = y - index;
    let index = index as usize;
    source[index] * (1.0 - fade) + source[index + 1] * fade
}

/// Repeat half: index into the region's last two beats
///
/// Requires `2 * beat <= width` and `beat > 0`; the result is always below
/// `width`.
pub fn repeat_index(location: usize, width: usize, beat: usize) -> usize {
    let two_beats = 2 * beat;
    width - two_beats + location % two_beats
}

/// Whether a region of `width` samples has positions in the repeat half
///
/// Positions `[width / 2, width - 2)` repeat; regions of up to 4 samples have
/// none, so their beat is never read.
pub fn uses_repeat_half(width: usize) -> bool {
    width / 2 + UNTOUCHED_TAIL < width
}

/// Apply the speed-up and repeat halves to one channel's region
///
/// The last [`UNTOUCHED_TAIL`] samples are copied through. Every other
/// output sample reads only from `source`.
pub fn glitch_samples(source: &[f64], beat: usize) -> Vec<f64> {
    let width = source.len();
    let half = width / 2;

    source
        .iter()
        .enumerate()
        .map(|(location, &sample)| {
            if location + UNTOUCHED_TAIL >= width {
                sample
            } else if location < half {
                speed_up(source, location)
            } else {
                source[repeat_index(location, width, beat)]
            }
        })
        .collect()
}

/// Replace samples that sit on a jump with the mean of their neighbourhood
///
/// Position `n` is smoothed when `|s[n - r] - s[n + r]| > threshold`; only
/// positions with a full neighbourhood (`r <= n < len - r`) are considered.
/// Detection and averaging both read the unsmoothed input.
pub fn smooth_discontinuities(samples: &[f64], threshold: f64, radius: usize) -> Vec<f64> {
    let mut smoothed = samples.to_vec();
    let taps = (2 * radius + 1) as f64;

    for n in radius..samples.len().saturating_sub(radius) {
        if (samples[n - radius] - samples[n + radius]).abs() > threshold {
            smoothed[n] = samples[n - radius..=n + radius].iter().sum::<f64>() / taps;
        }
    }
    smoothed
}

/// Glitch effect over one or more regions, applied in order to every channel
pub struct GlitchEffect {
    regions: Vec<GlitchRegion>,
    settings: GlitchSettings,
    enabled: bool,
}

impl GlitchEffect {
    /// Create a glitch effect with default settings
    pub fn new(regions: Vec<GlitchRegion>) -> Self {
        Self {
            regions,
            settings: GlitchSettings::default(),
            enabled: true,
        }
    }

    /// Create a glitch effect with specific settings
    pub fn with_settings(regions: Vec<GlitchRegion>, settings: GlitchSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            regions,
            settings,
            enabled: true,
        })
    }

    pub fn regions(&self) -> &[GlitchRegion] {
        &self.regions
    }

    /// Get current settings
    pub fn settings(&self) -> GlitchSettings {
        self.settings
    }

    /// Convert and check every region against `wave`
    ///
    /// Nothing is written unless all regions pass.
    pub fn resolve(&self, wave: &WaveFile) -> Result<Vec<FrameRegion>> {
        self.regions
            .iter()
            .map(|region| -> Result<FrameRegion> {
                let frames = region.to_frames(wave.sample_rate())?;
                wave.validate_range(0, frames.start, u64::from(frames.end))?;

                let width = frames.width();
                let beat_fits = frames.beat > 0 && u64::from(frames.beat) * 2 <= u64::from(width);
                if uses_repeat_half(width as usize) && !beat_fits {
                    return Err(EffectError::InvalidBeat {
                        beat: frames.beat,
                        width,
                    });
                }
                Ok(frames)
            })
            .collect()
    }

    /// Glitch one resolved region on every channel
    pub fn apply_region(&self, wave: &mut WaveFile, region: FrameRegion) -> Result<()> {
        if region.width() < 2 {
            debug!("Region {}..{} too short to glitch", region.start, region.end);
            return Ok(());
        }

        for channel in 0..wave.channels() {
            let source = wave.get_samples(channel, region.start, region.end)?;
            let glitched = glitch_samples(&source, region.beat as usize);
            let mut smoothed = smooth_discontinuities(
                &glitched,
                self.settings.discontinuity_threshold,
                self.settings.smoothing_radius,
            );
            // A radius below the tail length reaches into it
            let tail = source.len() - UNTOUCHED_TAIL;
            smoothed[tail..].copy_from_slice(&source[tail..]);
            wave.set_samples(channel, region.start, &smoothed)?;
        }

        trace!(
            "Glitched frames {}..{} with a {}-frame beat",
            region.start,
            region.end,
            region.beat
        );
        Ok(())
    }
}

impl WaveEffect for GlitchEffect {
    fn apply(&mut self, wave: &mut WaveFile) -> Result<()> {
        let regions = self.resolve(wave)?;
        for region in regions {
            self.apply_region(wave, region)?;
        }
        Ok(())
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn name(&self) -> &str {
        "Glitch"
    }
}
