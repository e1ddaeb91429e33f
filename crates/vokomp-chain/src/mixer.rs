//! Dry/wet crossfade with a pre-sized dry tap.
//!
//! The mixer owns two scratch buffers sized once at prepare time. The
//! chain copies the untouched input into them before any processing, then
//! blends the processed signal against that copy at the end. The mix
//! proportion is ramped so a moving Mix knob crossfades instead of
//! stepping.

use vokomp_core::{LinearSmoothedParam, wet_dry_mix};

/// Crossfades a processed stereo pair against its captured dry input.
///
/// `capture_dry` and `blend` must be called once each per block, in that
/// order, with slices no longer than the prepared maximum.
#[derive(Debug, Clone)]
pub struct DryWetMixer {
    dry_left: Vec<f32>,
    dry_right: Vec<f32>,
    /// Wet proportion, 0.1–1.0.
    mix: LinearSmoothedParam,
}

impl DryWetMixer {
    /// Create an unprepared mixer with the given crossfade ramp time.
    pub fn new(sample_rate: f32, ramp_ms: f32, initial_mix: f32) -> Self {
        Self {
            dry_left: Vec::new(),
            dry_right: Vec::new(),
            mix: LinearSmoothedParam::with_config(
                initial_mix.clamp(0.1, 1.0),
                sample_rate,
                ramp_ms,
            ),
        }
    }

    /// Allocate the dry buffers for up to `max_block_size` samples.
    ///
    /// Non-real-time. Must run before the first `capture_dry`.
    pub fn prepare(&mut self, sample_rate: f32, max_block_size: usize) {
        self.dry_left.resize(max_block_size, 0.0);
        self.dry_right.resize(max_block_size, 0.0);
        self.mix.set_sample_rate(sample_rate);
        self.mix.snap_to_target();
    }

    /// Set the wet proportion target (clamped to 0.1–1.0).
    pub fn set_mix(&mut self, mix: f32) {
        self.mix.set_target(mix.clamp(0.1, 1.0));
    }

    /// Current wet-proportion target.
    pub fn mix(&self) -> f32 {
        self.mix.target()
    }

    /// Copy the untouched input into the dry tap.
    pub fn capture_dry(&mut self, left: &[f32], right: &[f32]) {
        debug_assert!(left.len() <= self.dry_left.len());
        self.dry_left[..left.len()].copy_from_slice(left);
        self.dry_right[..right.len()].copy_from_slice(right);
    }

    /// Blend the processed signal against the captured dry copy in place.
    pub fn blend(&mut self, left: &mut [f32], right: &mut [f32]) {
        debug_assert_eq!(left.len(), right.len());
        for (i, (l, r)) in left.iter_mut().zip(right.iter_mut()).enumerate() {
            let mix = self.mix.advance();
            *l = wet_dry_mix(self.dry_left[i], *l, mix);
            *r = wet_dry_mix(self.dry_right[i], *r, mix);
        }
    }

    /// Finish any crossfade in flight.
    pub fn reset(&mut self) {
        self.mix.snap_to_target();
    }
}
