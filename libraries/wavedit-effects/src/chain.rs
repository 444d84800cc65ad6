//! Effect chain for processing wave files
//!
//! Effects run in order over a whole decoded file, each reading and writing
//! samples through the file's access layer.

use crate::error::Result;
use tracing::debug;
use wavedit_wave::WaveFile;

/// Trait for effects that can be chained together
pub trait WaveEffect: Send {
    /// Process the file in place
    ///
    /// A failing effect leaves earlier regions or channels it already wrote
    /// in place; validation happens before the first write.
    fn apply(&mut self, wave: &mut WaveFile) -> Result<()>;

    /// Enable/disable the effect
    fn set_enabled(&mut self, enabled: bool);

    /// Check if effect is enabled
    fn is_enabled(&self) -> bool;

    /// Get effect name (for logging)
    fn name(&self) -> &str;
}

/// Chain of effects processed in order
pub struct EffectChain {
    effects: Vec<Box<dyn WaveEffect>>,
}

impl EffectChain {
    /// Create a new empty effect chain
    pub fn new() -> Self {
        Self {
            effects: Vec::new(),
        }
    }

    /// Add an effect to the end of the chain
    pub fn add_effect(&mut self, effect: Box<dyn WaveEffect>) {
        self.effects.push(effect);
    }

    /// Builder-style [`add_effect`](Self::add_effect)
    #[must_use]
    pub fn with_effect(mut self, effect: Box<dyn WaveEffect>) -> Self {
        self.add_effect(effect);
        self
    }

    /// Run every enabled effect over `wave`, stopping at the first failure
    pub fn apply(&mut self, wave: &mut WaveFile) -> Result<()> {
        for effect in &mut self.effects {
            if effect.is_enabled() {
                debug!("Applying {} effect", effect.name());
                effect.apply(wave)?;
            } else {
                debug!("Skipping disabled {} effect", effect.name());
            }
        }
        Ok(())
    }

    /// Clear all effects from the chain
    pub fn clear(&mut self) {
        self.effects.clear();
    }

    /// Get number of effects in chain
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Check if chain is empty
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Get effect at index
    pub fn get_effect(&self, index: usize) -> Option<&dyn WaveEffect> {
        self.effects.get(index).map(|e| e.as_ref())
    }

    /// Get mutable effect at index
    pub fn get_effect_mut(&mut self, index: usize) -> Option<&mut (dyn WaveEffect + 'static)> {
        self.effects.get_mut(index).map(|e| e.as_mut())
    }

    /// Enable/disable all effects
    pub fn set_enabled(&mut self, enabled: bool) {
        for effect in &mut self.effects {
            effect.set_enabled(enabled);
        }
    }
}

impl Default for EffectChain {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EffectError;
    use wavedit_wave::{SampleFormat, WaveError};

    // Mock effect for testing
    struct GainEffect {
        gain: f64,
        enabled: bool,
    }

    impl WaveEffect for GainEffect {
        fn apply(&mut self, wave: &mut WaveFile) -> Result<()> {
            let gain = self.gain;
            wave.map_all_samples(|sample, _, _| sample * gain)?;
            Ok(())
        }

        fn set_enabled(&mut self, enabled: bool) {
            self.enabled = enabled;
        }

        fn is_enabled(&self) -> bool {
            self.enabled
        }

        fn name(&self) -> &str {
            "Gain"
        }
    }

    // Always fails with an access error
    struct BrokenEffect;

    impl WaveEffect for BrokenEffect {
        fn apply(&mut self, wave: &mut WaveFile) -> Result<()> {
            wave.get_samples(wave.channels(), 0, 0)?;
            Ok(())
        }

        fn set_enabled(&mut self, _enabled: bool) {}

        fn is_enabled(&self) -> bool {
            true
        }

        fn name(&self) -> &str {
            "Broken"
        }
    }

    fn gain(gain: f64, enabled: bool) -> Box<dyn WaveEffect> {
        Box::new(GainEffect { gain, enabled })
    }

    fn ones(frames: u32) -> WaveFile {
        let mut wave = WaveFile::new(SampleFormat::Float64, 2, 44_100).unwrap();
        wave.resize(frames).unwrap();
        wave.map_all_samples(|_, _, _| 1.0).unwrap();
        wave
    }

    #[test]
    fn empty_chain() {
        let chain = EffectChain::new();
        assert_eq!(chain.len(), 0);
        assert!(chain.is_empty());
    }

    #[test]
    fn process_chain() {
        let mut chain = EffectChain::new().with_effect(gain(0.5, true)).with_effect(gain(4.0, true));
        assert_eq!(chain.len(), 2);

        let mut wave = ones(50);
        chain.apply(&mut wave).unwrap();

        for channel in 0..2 {
            assert!(wave.get_samples(channel, 0, 50).unwrap().iter().all(|&s| s == 2.0));
        }
    }

    #[test]
    fn disabled_effect_bypassed() {
        let mut chain = EffectChain::new();
        chain.add_effect(gain(0.0, false));

        let mut wave = ones(10);
        chain.apply(&mut wave).unwrap();
        assert_eq!(wave.get_samples(0, 0, 10).unwrap(), vec![1.0; 10]);
    }

    #[test]
    fn enable_disable_all() {
        let mut chain = EffectChain::new().with_effect(gain(0.5, true)).with_effect(gain(0.5, true));
        chain.set_enabled(false);

        let mut wave = ones(10);
        chain.apply(&mut wave).unwrap();
        assert_eq!(wave.get_samples(1, 0, 10).unwrap(), vec![1.0; 10]);
    }

    #[test]
    fn failure_stops_the_chain() {
        let mut chain = EffectChain::new()
            .with_effect(Box::new(BrokenEffect))
            .with_effect(gain(0.0, true));

        let mut wave = ones(4);
        assert!(matches!(
            chain.apply(&mut wave),
            Err(EffectError::Wave(WaveError::InvalidChannel { channel: 2, .. }))
        ));
        assert_eq!(wave.get_samples(0, 0, 4).unwrap(), vec![1.0; 4]);
    }

    #[test]
    fn get_effect() {
        let mut chain = EffectChain::new().with_effect(gain(0.5, true));

        assert_eq!(chain.get_effect(0).unwrap().name(), "Gain");
        assert!(chain.get_effect(1).is_none());

        chain.get_effect_mut(0).unwrap().set_enabled(false);
        assert!(!chain.get_effect(0).unwrap().is_enabled());
    }

    #[test]
    fn clear_chain() {
        let mut chain = EffectChain::new().with_effect(gain(0.5, true));
        chain.clear();
        assert!(chain.is_empty());
    }
}
