//! Math utilities shared across the signal chain.
//!
//! Level conversions, time conversions, the dry/wet crossfade, and the
//! flush-to-zero guard. Everything here is allocation-free and `no_std`.

use libm::{expf, logf};

/// Convert decibels to linear gain.
///
/// 0 dB → 1.0, -6 dB → ~0.5, +6 dB → ~2.0.
///
/// # Example
/// ```rust
/// use vokomp_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels.
///
/// Inputs at or below 1e-10 are clamped so silence maps to a large
/// negative number instead of -inf.
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    // 20 * log10(x) = 20 * ln(x) / ln(10)
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Convert milliseconds to a sample count at the given rate.
#[inline]
pub fn ms_to_samples(ms: f32, sample_rate: f32) -> f32 {
    ms * sample_rate / 1000.0
}

/// Flush subnormal (denormalized) floats to zero.
///
/// Subnormal floats cause severe CPU slowdowns on most architectures.
/// Values below 1e-20 are replaced with zero, leaving margin before the
/// IEEE 754 subnormal range begins. Use on any state that decays toward
/// zero (filter delay lines, gain-reduction envelopes).
///
/// Reference: IEEE 754-2008, Section 3.4 (Subnormal numbers)
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

/// Linearly remap a value from one range onto another.
///
/// `x` at `in_min` maps to `out_min`, `x` at `in_max` maps to `out_max`.
/// The output range may be inverted (`out_min > out_max`); no clamping
/// is applied.
#[inline]
pub fn remap(x: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    out_min + (x - in_min) / (in_max - in_min) * (out_max - out_min)
}

/// Crossfade between dry and wet signals.
///
/// Equivalent to `dry * (1 - mix) + wet * mix` but uses one fewer multiply.
///
/// # Arguments
///
/// * `dry` - Unprocessed signal
/// * `wet` - Processed signal
/// * `mix` - Blend factor in \[0.0, 1.0\]: 0.0 = all dry, 1.0 = all wet
#[inline]
pub fn wet_dry_mix(dry: f32, wet: f32, mix: f32) -> f32 {
    dry + (wet - dry) * mix
}
