//! Vokomp Core - DSP primitives for the vokomp signal chain.
//!
//! Foundational building blocks for real-time audio processing with zero
//! allocation in the audio path:
//!
//! - [`LinearSmoothedParam`] - Linear ramps with a fixed transition time
//! - [`Biquad`] - Second-order IIR filter with RBJ cookbook coefficients
//! - Level conversions: [`db_to_linear`], [`linear_to_db`] plus the fast
//!   approximations [`fast_db_to_linear`] / [`fast_linear_to_db`] for the
//!   per-sample dynamics path
//! - [`flush_denormal`] - flush-to-zero guard for decaying state
//!
//! # no_std Support
//!
//! The crate is `no_std` compatible; disable the default `std` feature.
//! All math goes through `libm`.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod biquad;
pub mod fast_math;
pub mod math;
pub mod param;

pub use biquad::{Biquad, highpass_coefficients, peaking_coefficients};
pub use fast_math::{fast_db_to_linear, fast_exp2, fast_linear_to_db, fast_log2};
pub use math::{db_to_linear, flush_denormal, linear_to_db, ms_to_samples, remap, wet_dry_mix};
pub use param::LinearSmoothedParam;
