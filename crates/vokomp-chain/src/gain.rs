//! Smoothly-ramped gain stage.

use vokomp_core::{LinearSmoothedParam, db_to_linear, linear_to_db};

/// Applies a dB-controlled linear gain to a stereo pair, ramping over a
/// fixed transition time so a level change never steps.
///
/// The largest possible sample-to-sample gain delta is the ramp's
/// per-sample increment, `(target − current) / ramp_samples`.
#[derive(Debug, Clone)]
pub struct GainStage {
    gain: LinearSmoothedParam,
}

impl GainStage {
    /// Create a unity-gain stage with the given ramp duration.
    pub fn new(sample_rate: f32, ramp_ms: f32) -> Self {
        Self {
            gain: LinearSmoothedParam::with_config(1.0, sample_rate, ramp_ms),
        }
    }

    /// Set the gain target in dB, starting a ramp from the current gain.
    pub fn set_gain_db(&mut self, db: f32) {
        self.gain.set_target(db_to_linear(db));
    }

    /// Gain target in dB.
    pub fn gain_db(&self) -> f32 {
        linear_to_db(self.gain.target())
    }

    /// Per-sample linear-gain increment of the ramp in flight (0 if settled).
    pub fn ramp_increment(&self) -> f32 {
        self.gain.increment()
    }

    /// Apply the ramped gain to both channels in place.
    pub fn process(&mut self, left: &mut [f32], right: &mut [f32]) {
        debug_assert_eq!(left.len(), right.len());
        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            let g = self.gain.advance();
            *l *= g;
            *r *= g;
        }
    }

    /// Update the sample rate. Takes effect on the next gain change.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.gain.set_sample_rate(sample_rate);
    }

    /// Finish any ramp in flight.
    pub fn reset(&mut self) {
        self.gain.snap_to_target();
    }
}
