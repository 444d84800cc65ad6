//! Effects for Wavedit
//!
//! Two effects operate on decoded [`WaveFile`](wavedit_wave::WaveFile)s
//! through their sample access layer:
//! - **Glitch**: per region, a speeding-up first half followed by a loop of
//!   the region's last two beats, then discontinuity smoothing
//! - **Crunch**: a cosine waveshaper faded in and out at the file's edges
//!
//! Both implement [`WaveEffect`] and can be combined in an [`EffectChain`].

#![deny(unsafe_code)]

mod chain;
mod crunch;
mod error;
mod glitch;

pub use chain::{EffectChain, WaveEffect};
pub use crunch::{crunch_sample, envelope, shape, smoothstep, CrunchEffect, CrunchSettings};
pub use error::{EffectError, Result};
pub use glitch::{
    glitch_samples, repeat_index, smooth_discontinuities, speed_up, FrameRegion, GlitchEffect,
    GlitchRegion, GlitchSettings, uses_repeat_half, UNTOUCHED_TAIL,
};
