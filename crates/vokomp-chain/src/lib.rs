//! Vokomp signal chain - a voice-coloring dynamics processor.
//!
//! The chain processes one stereo pair per audio callback through a fixed
//! stage order:
//!
//! ```text
//! Input L/R
//!   → dry capture
//!   → input gain (derived from the compression knob)
//!   → compressor (4:1, envelope-follower)
//!   → block-peak gain-reduction metering
//!   → voice EQ (2 biquad sections, 3 presets)
//!   → dry/wet crossfade (10–100% wet)
//!   → output gain
//!   → Output L/R
//! ```
//!
//! # Real-time contract
//!
//! [`SignalChain::process`] never allocates, locks, or fails: parameter
//! values outside their declared ranges are clamped, numeric edge cases
//! are flushed, and the function is total. Configuration problems are
//! only reported from the non-real-time [`SignalChain::prepare`] call.
//!
//! # Threads
//!
//! One audio thread calls `process`; a control thread owns the knobs.
//! [`ParamStore`] hands values across lock-free, and the chain reads one
//! [`ParameterSnapshot`] per block so a knob can never tear mid-block.
//!
//! # Example
//!
//! ```rust
//! use vokomp_chain::{ParameterSnapshot, SignalChain};
//!
//! let mut chain = SignalChain::new();
//! chain.prepare(48000.0, 512).unwrap();
//!
//! let mut left = vec![0.0f32; 512];
//! let mut right = vec![0.0f32; 512];
//! let params = ParameterSnapshot::default();
//! chain.process(&mut left, &mut right, &params);
//!
//! let reduction = chain.meter_db();
//! assert_eq!(reduction, 0.0);
//! ```

pub mod chain;
pub mod compressor;
pub mod error;
pub mod gain;
pub mod meter;
pub mod mixer;
pub mod params;
pub mod voice;

pub use chain::SignalChain;
pub use compressor::Compressor;
pub use error::PrepareError;
pub use gain::GainStage;
pub use meter::GainReductionMeter;
pub use mixer::DryWetMixer;
pub use params::{KNOBS, KnobDescriptor, ParamStore, ParameterSnapshot};
pub use voice::{Voice, VoiceEq};
