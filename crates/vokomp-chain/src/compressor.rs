//! Envelope-follower dynamics compressor.
//!
//! A feed-forward compressor whose smoothed state is the *gain reduction
//! in dB* rather than the input level:
//!
//! ```text
//! level_db  = 20·log10(max(|L|, |R|))
//! target_gr = max(0, level_db − threshold) · (1 − 1/ratio)
//! gr        → target_gr  (attack coeff when rising, release when falling)
//! out       = in · 10^(−gr/20)
//! ```
//!
//! The smoother is first-order exponential with two time constants; the
//! per-sample coefficient is `exp(-1/(time_ms · 0.001 · sample_rate))`.
//! Detection is linked across the pair (one envelope, same gain on both
//! channels) so the stereo image cannot shift under compression.
//!
//! The envelope is the compressor's memory: it persists across blocks and
//! is only cleared by [`reset`](Compressor::reset) at stream
//! (re)initialization.

use libm::expf;
use vokomp_core::{fast_db_to_linear, fast_linear_to_db, flush_denormal};

/// Fixed compression ratio.
pub const RATIO: f32 = 4.0;

/// Fixed release time in milliseconds.
pub const RELEASE_MS: f32 = 50.0;

/// Feed-forward compressor with linked stereo detection.
#[derive(Debug, Clone)]
pub struct Compressor {
    threshold_db: f32,
    ratio: f32,
    attack_ms: f32,
    release_ms: f32,
    attack_coeff: f32,
    release_coeff: f32,
    sample_rate: f32,
    /// Smoothed gain reduction in dB (≥ 0; 0 = no compression).
    envelope_db: f32,
}

impl Compressor {
    /// Create a compressor at the given sample rate with the fixed 4:1
    /// ratio and 50 ms release.
    pub fn new(sample_rate: f32) -> Self {
        let mut comp = Self {
            threshold_db: -15.0,
            ratio: RATIO,
            attack_ms: 30.0,
            release_ms: RELEASE_MS,
            attack_coeff: 0.0,
            release_coeff: 0.0,
            sample_rate,
            envelope_db: 0.0,
        };
        comp.recalculate_coefficients();
        comp
    }

    /// Set threshold in dB (clamped to −60..0).
    pub fn set_threshold_db(&mut self, threshold_db: f32) {
        self.threshold_db = threshold_db.clamp(-60.0, 0.0);
    }

    /// Threshold in dB.
    pub fn threshold_db(&self) -> f32 {
        self.threshold_db
    }

    /// Set attack time in ms (clamped to 1–100).
    pub fn set_attack_ms(&mut self, attack_ms: f32) {
        let clamped = attack_ms.clamp(1.0, 100.0);
        if (clamped - self.attack_ms).abs() > 1e-6 {
            self.attack_ms = clamped;
            self.recalculate_coefficients();
        }
    }

    /// Attack time in ms.
    pub fn attack_ms(&self) -> f32 {
        self.attack_ms
    }

    /// Current gain reduction in dB (≥ 0). This is the compressor's true
    /// internal envelope, exposed as an alternative to the block-peak
    /// meter.
    pub fn gain_reduction_db(&self) -> f32 {
        self.envelope_db
    }

    /// Update sample rate and recalculate the smoothing coefficients.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate_coefficients();
    }

    /// Clear the envelope. Stream (re)initialization only.
    pub fn reset(&mut self) {
        self.envelope_db = 0.0;
    }

    /// Compress both channels in place with a shared envelope.
    pub fn process_block(&mut self, left: &mut [f32], right: &mut [f32]) {
        debug_assert_eq!(left.len(), right.len());

        // Hoist per-block constants out of the loop
        let threshold_db = self.threshold_db;
        let slope = 1.0 - 1.0 / self.ratio;
        let attack_coeff = self.attack_coeff;
        let release_coeff = self.release_coeff;
        let mut envelope_db = self.envelope_db;

        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            // Linked detection: instantaneous level of the louder channel
            let level = l.abs().max(r.abs());
            let level_db = fast_linear_to_db(level);

            let overshoot = level_db - threshold_db;
            let target_db = if overshoot > 0.0 {
                overshoot * slope
            } else {
                0.0
            };

            // Attack when reduction is increasing, release when falling
            let coeff = if target_db > envelope_db {
                attack_coeff
            } else {
                release_coeff
            };
            envelope_db = flush_denormal(target_db + coeff * (envelope_db - target_db));

            let gain = fast_db_to_linear(-envelope_db);
            *l *= gain;
            *r *= gain;
        }

        self.envelope_db = envelope_db;
    }

    fn recalculate_coefficients(&mut self) {
        // coeff = exp(-1 / (time_ms * 0.001 * sample_rate))
        self.attack_coeff = expf(-1.0 / (self.attack_ms * 0.001 * self.sample_rate));
        self.release_coeff = expf(-1.0 / (self.release_ms * 0.001 * self.sample_rate));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(n: usize, freq: f32, sr: f32, amp: f32) -> Vec<f32> {
        (0..n)
            .map(|i| amp * libm::sinf(core::f32::consts::TAU * freq * i as f32 / sr))
            .collect()
    }

    #[test]
    fn below_threshold_is_transparent() {
        let sr = 48000.0;
        let mut comp = Compressor::new(sr);
        comp.set_threshold_db(-10.0);
        comp.set_attack_ms(1.0);

        // -20 dBFS sine, well below threshold
        let mut left = sine(48000, 440.0, sr, 0.1);
        let mut right = left.clone();
        comp.process_block(&mut left, &mut right);

        assert!(comp.gain_reduction_db() < 0.1);
        // Steady-state output peak matches input peak
        let peak = left[24000..].iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!((peak - 0.1).abs() < 0.005, "Expected ~0.1, got {peak}");
    }

    #[test]
    fn above_threshold_converges_to_slope_times_overshoot() {
        let sr = 48000.0;
        let mut comp = Compressor::new(sr);
        comp.set_threshold_db(-20.0);
        comp.set_attack_ms(5.0);

        // 0 dBFS square-ish drive: constant full-scale level, 20 dB over
        let mut left = vec![1.0f32; 48000];
        let mut right = left.clone();
        comp.process_block(&mut left, &mut right);

        // Expected steady-state reduction: 20 * (1 - 1/4) = 15 dB
        let expected = 20.0 * (1.0 - 1.0 / RATIO);
        let got = comp.gain_reduction_db();
        assert!(
            (got - expected).abs() < 0.5,
            "Expected ~{expected} dB reduction, got {got}"
        );
    }

    #[test]
    fn attack_slower_than_release_settling() {
        let sr = 48000.0;
        let mut comp = Compressor::new(sr);
        comp.set_threshold_db(-20.0);
        comp.set_attack_ms(100.0);

        // After only 5 ms of loud signal, a 100 ms attack has barely moved
        let mut left = vec![1.0f32; 240];
        let mut right = left.clone();
        comp.process_block(&mut left, &mut right);
        let early = comp.gain_reduction_db();
        assert!(early < 5.0, "100 ms attack should still be rising, got {early}");
    }

    #[test]
    fn envelope_releases_after_signal_drops() {
        let sr = 48000.0;
        let mut comp = Compressor::new(sr);
        comp.set_threshold_db(-20.0);
        comp.set_attack_ms(1.0);

        let mut left = vec![1.0f32; 9600];
        let mut right = left.clone();
        comp.process_block(&mut left, &mut right);
        assert!(comp.gain_reduction_db() > 10.0);

        // 500 ms of silence = 10 release time constants
        let mut left = vec![0.0f32; 24000];
        let mut right = left.clone();
        comp.process_block(&mut left, &mut right);
        assert!(
            comp.gain_reduction_db() < 0.01,
            "Envelope should release, got {}",
            comp.gain_reduction_db()
        );
    }

    #[test]
    fn both_channels_get_identical_gain() {
        let sr = 48000.0;
        let mut comp = Compressor::new(sr);
        comp.set_threshold_db(-20.0);
        comp.set_attack_ms(1.0);

        // Loud left, quiet right: linked detection keys off the left
        let mut left = vec![0.9f32; 4800];
        let mut right = vec![0.1f32; 4800];
        comp.process_block(&mut left, &mut right);

        let ratio_l = left[4799] / 0.9;
        let ratio_r = right[4799] / 0.1;
        assert!(
            (ratio_l - ratio_r).abs() < 1e-4,
            "Channels must share gain: {ratio_l} vs {ratio_r}"
        );
        assert!(ratio_l < 1.0, "Gain should be reducing");
    }

    #[test]
    fn envelope_persists_across_blocks() {
        let sr = 48000.0;
        let mut comp = Compressor::new(sr);
        comp.set_threshold_db(-20.0);
        comp.set_attack_ms(1.0);

        let mut one_block = Compressor::new(sr);
        one_block.set_threshold_db(-20.0);
        one_block.set_attack_ms(1.0);

        // Same samples, split into 10 blocks vs processed at once
        let mut l1 = vec![0.8f32; 4800];
        let mut r1 = l1.clone();
        one_block.process_block(&mut l1, &mut r1);

        for _ in 0..10 {
            let mut l = vec![0.8f32; 480];
            let mut r = l.clone();
            comp.process_block(&mut l, &mut r);
        }

        assert!(
            (comp.gain_reduction_db() - one_block.gain_reduction_db()).abs() < 1e-3,
            "Block splitting must not change the envelope"
        );
    }

    #[test]
    fn silence_yields_silence_and_reset_clears() {
        let mut comp = Compressor::new(48000.0);
        let mut left = vec![1.0f32; 1000];
        let mut right = left.clone();
        comp.process_block(&mut left, &mut right);

        comp.reset();
        assert_eq!(comp.gain_reduction_db(), 0.0);

        let mut left = vec![0.0f32; 256];
        let mut right = left.clone();
        comp.process_block(&mut left, &mut right);
        assert!(left.iter().all(|&s| s == 0.0));
        assert!(right.iter().all(|&s| s == 0.0));
    }
}
