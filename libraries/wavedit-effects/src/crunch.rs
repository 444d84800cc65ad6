//! Whole-file crunch effect
//!
//! A cosine waveshaper blended in through a smoothstep envelope, so the
//! start and end of the file fade into and out of the distortion.

use crate::chain::WaveEffect;
use crate::error::{EffectError, Result};
use serde::{Deserialize, Serialize};
use wavedit_wave::WaveFile;

/// Crunch settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrunchSettings {
    /// Positions over which the effect fades in and out
    pub edge_width: f64,
    /// Gain applied after the offset
    pub drive: f64,
    /// Subtracted from `cos(sample)`
    pub offset: f64,
}

impl CrunchSettings {
    /// Validate settings
    pub fn validate(&self) -> Result<()> {
        if !self.edge_width.is_finite() || self.edge_width <= 0.0 {
            return Err(EffectError::InvalidSettings(format!(
                "Edge width must be positive, got {}",
                self.edge_width
            )));
        }
        if !self.drive.is_finite() || !self.offset.is_finite() {
            return Err(EffectError::InvalidSettings(
                "Drive and offset must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CrunchSettings {
    fn default() -> Self {
        Self {
            edge_width: 100.0,
            drive: 4.3,
            offset: 0.77,
        }
    }
}

/// `clamp(3t^2 - 2t^3, 0, 1)` over `t` clamped to `[0, 1]`
pub fn smoothstep(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    3.0 * t * t - 2.0 * t * t * t
}

/// Blend amount at `location`, keyed to the distance from the nearer edge
pub fn envelope(location: u32, width: u32, edge_width: f64) -> f64 {
    let distance = location.min(width.saturating_sub(location));
    smoothstep(f64::from(distance) / edge_width)
}

/// Waveshaper: `(cos(sample) - offset) * drive`
pub fn shape(sample: f64, settings: &CrunchSettings) -> f64 {
    (sample.cos() - settings.offset) * settings.drive
}

/// One output sample: the original faded toward the shaped value
pub fn crunch_sample(sample: f64, location: u32, width: u32, settings: &CrunchSettings) -> f64 {
    let mix = envelope(location, width, settings.edge_width);
    sample * (1.0 - mix) + shape(sample, settings) * mix
}

/// Crunch effect over every sample of every channel
pub struct CrunchEffect {
    settings: CrunchSettings,
    enabled: bool,
}

impl CrunchEffect {
    /// Create a crunch effect with default settings
    pub fn new() -> Self {
        Self {
            settings: CrunchSettings::default(),
            enabled: true,
        }
    }

    /// Create a crunch effect with specific settings
    pub fn with_settings(settings: CrunchSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            enabled: true,
        })
    }

    /// Get current settings
    pub fn settings(&self) -> CrunchSettings {
        self.settings
    }
}

impl Default for CrunchEffect {
    fn default() -> Self {
        Self::new()
    }
}

impl WaveEffect for CrunchEffect {
    fn apply(&mut self, wave: &mut WaveFile) -> Result<()> {
        let settings = self.settings;
        wave.map_all_samples(|sample, location, width| {
            crunch_sample(sample, location, width, &settings)
        })?;
        Ok(())
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn name(&self) -> &str {
        "Crunch"
    }
}
