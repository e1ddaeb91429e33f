//! Biquad (bi-quadratic) filter section.
//!
//! A second-order IIR filter plus the RBJ Audio EQ Cookbook coefficient
//! formulas the voice equalizer needs: peaking bell and high-pass.

use core::f32::consts::PI;
use libm::{cosf, powf, sinf};

use crate::math::flush_denormal;

/// Second-order IIR filter, Direct Form I.
///
/// ```text
/// y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2]
///                - a1*y[n-1] - a2*y[n-2]
/// ```
///
/// Coefficients are normalized by `a0` on assignment. Delay registers can
/// be cleared independently of the coefficients, which is what lets a
/// voice switch swap coefficients without a state reset.
#[derive(Debug, Clone)]
pub struct Biquad {
    b0: f32,
    b1: f32,
    b2: f32,
    a1: f32,
    a2: f32,

    /// Input delay line: x[n-1], x[n-2]
    x1: f32,
    x2: f32,

    /// Output delay line: y[n-1], y[n-2]
    y1: f32,
    y2: f32,
}

impl Biquad {
    /// Creates a new biquad with passthrough coefficients (`y[n] = x[n]`).
    pub fn new() -> Self {
        Self {
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Sets the coefficients, normalizing by `a0` internally.
    ///
    /// Delay registers are left untouched.
    pub fn set_coefficients(&mut self, b0: f32, b1: f32, b2: f32, a0: f32, a1: f32, a2: f32) {
        let a0_inv = 1.0 / a0;
        self.b0 = b0 * a0_inv;
        self.b1 = b1 * a0_inv;
        self.b2 = b2 * a0_inv;
        self.a1 = a1 * a0_inv;
        self.a2 = a2 * a0_inv;
    }

    /// Processes a single sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let output = self.b0 * input + self.b1 * self.x1 + self.b2 * self.x2
            - self.a1 * self.y1
            - self.a2 * self.y2;
        let output = flush_denormal(output);

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    /// Clears the delay registers without touching the coefficients.
    pub fn clear(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }
}

impl Default for Biquad {
    fn default() -> Self {
        Self::new()
    }
}

/// Peaking EQ coefficients (RBJ cookbook).
///
/// Boosts or cuts around `frequency` with bandwidth `frequency / q`.
///
/// # Arguments
///
/// * `frequency` - Center frequency in Hz
/// * `q` - Q factor
/// * `gain_db` - Gain in decibels (positive = boost, negative = cut)
/// * `sample_rate` - Sample rate in Hz
///
/// # Returns
///
/// `(b0, b1, b2, a0, a1, a2)` coefficients
pub fn peaking_coefficients(
    frequency: f32,
    q: f32,
    gain_db: f32,
    sample_rate: f32,
) -> (f32, f32, f32, f32, f32, f32) {
    let a = powf(10.0, gain_db / 40.0); // sqrt(10^(dB/20))
    let omega = 2.0 * PI * frequency / sample_rate;
    let cos_omega = cosf(omega);
    let sin_omega = sinf(omega);
    let alpha = sin_omega / (2.0 * q);

    let b0 = 1.0 + alpha * a;
    let b1 = -2.0 * cos_omega;
    let b2 = 1.0 - alpha * a;
    let a0 = 1.0 + alpha / a;
    let a1 = -2.0 * cos_omega;
    let a2 = 1.0 - alpha / a;

    (b0, b1, b2, a0, a1, a2)
}

/// High-pass coefficients (RBJ cookbook).
///
/// # Arguments
///
/// * `frequency` - Cutoff frequency in Hz
/// * `q` - Q factor (0.707 for Butterworth response)
/// * `sample_rate` - Sample rate in Hz
///
/// # Returns
///
/// `(b0, b1, b2, a0, a1, a2)` coefficients
pub fn highpass_coefficients(
    frequency: f32,
    q: f32,
    sample_rate: f32,
) -> (f32, f32, f32, f32, f32, f32) {
    let omega = 2.0 * PI * frequency / sample_rate;
    let cos_omega = cosf(omega);
    let sin_omega = sinf(omega);
    let alpha = sin_omega / (2.0 * q);

    let b0 = (1.0 + cos_omega) / 2.0;
    let b1 = -(1.0 + cos_omega);
    let b2 = (1.0 + cos_omega) / 2.0;
    let a0 = 1.0 + alpha;
    let a1 = -2.0 * cos_omega;
    let a2 = 1.0 - alpha;

    (b0, b1, b2, a0, a1, a2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passthrough_by_default() {
        let mut biquad = Biquad::new();
        for i in 0..10 {
            let input = i as f32 * 0.1;
            let output = biquad.process(input);
            assert!((output - input).abs() < 0.0001);
        }
    }

    #[test]
    fn clear_zeroes_state() {
        let mut biquad = Biquad::new();
        for _ in 0..10 {
            biquad.process(1.0);
        }
        biquad.clear();
        assert_eq!(biquad.x1, 0.0);
        assert_eq!(biquad.x2, 0.0);
        assert_eq!(biquad.y1, 0.0);
        assert_eq!(biquad.y2, 0.0);
    }

    #[test]
    fn peaking_unity_at_zero_gain() {
        let mut biquad = Biquad::new();
        let (b0, b1, b2, a0, a1, a2) = peaking_coefficients(1000.0, 1.0, 0.0, 44100.0);
        biquad.set_coefficients(b0, b1, b2, a0, a1, a2);

        let mut output = 0.0;
        for _ in 0..1000 {
            output = biquad.process(1.0);
        }
        assert!(
            (output - 1.0).abs() < 0.05,
            "DC should pass at 0 dB gain, got {output}"
        );
    }

    #[test]
    fn peaking_coefficients_finite_boost_and_cut() {
        for gain_db in [-6.0, 6.0, 8.0] {
            let (b0, b1, b2, a0, a1, a2) = peaking_coefficients(2430.0, 0.5, gain_db, 48000.0);
            for c in [b0, b1, b2, a0, a1, a2] {
                assert!(c.is_finite());
            }
            assert!(a0 > 0.0);
        }
    }

    #[test]
    fn highpass_blocks_dc() {
        let mut biquad = Biquad::new();
        let (b0, b1, b2, a0, a1, a2) =
            highpass_coefficients(10.0, core::f32::consts::FRAC_1_SQRT_2, 48000.0);
        biquad.set_coefficients(b0, b1, b2, a0, a1, a2);

        let mut output = 1.0;
        for _ in 0..96000 {
            output = biquad.process(1.0);
        }
        assert!(output.abs() < 0.05, "DC should be rejected, got {output}");
    }

    #[test]
    fn stable_across_sample_rates() {
        for sr in [44100.0, 48000.0, 96000.0] {
            let mut biquad = Biquad::new();
            let (b0, b1, b2, a0, a1, a2) = peaking_coefficients(2000.0, 0.35, 7.96, sr);
            biquad.set_coefficients(b0, b1, b2, a0, a1, a2);

            let mut peak = 0.0f32;
            for i in 0..48000 {
                let x = libm::sinf(i as f32 * 0.1);
                peak = peak.max(biquad.process(x).abs());
            }
            assert!(peak.is_finite());
            assert!(peak < 10.0, "Filter diverging at {sr} Hz: peak {peak}");
        }
    }
}
