//! Error types for chain configuration.
//!
//! Only [`SignalChain::prepare`](crate::SignalChain::prepare) can fail;
//! the audio path itself has no error concept.

use thiserror::Error;

/// Errors reported by [`SignalChain::prepare`](crate::SignalChain::prepare).
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum PrepareError {
    /// Sample rate was zero, negative, or not finite.
    #[error("invalid sample rate: {0} Hz")]
    BadSampleRate(f32),

    /// Maximum block size was zero.
    #[error("invalid maximum block size: {0}")]
    BadBlockSize(usize),
}
