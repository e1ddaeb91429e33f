//! Parameter smoothing for zipper-free control changes.
//!
//! Audio parameters need smooth transitions to avoid audible "zipper
//! noise" when a control moves. [`LinearSmoothedParam`] ramps at a
//! constant rate over a fixed transition time, which makes the worst-case
//! sample-to-sample step exactly `(target - current) / ramp_samples`,
//! a bound the signal-chain tests rely on.

/// A parameter with linear smoothing (constant rate of change).
///
/// Retargeting while a ramp is still in flight restarts the ramp from the
/// *current* interpolated value, never from the original start value, so
/// the output cannot jump backward.
///
/// # Example
///
/// ```rust
/// use vokomp_core::LinearSmoothedParam;
///
/// let mut gain = LinearSmoothedParam::with_config(1.0, 48000.0, 100.0);
/// gain.set_target(0.5);
/// for _ in 0..4800 {
///     let g = gain.advance();
///     // multiply samples by g ...
/// }
/// assert!(gain.is_settled());
/// ```
#[derive(Debug, Clone)]
pub struct LinearSmoothedParam {
    /// Current value
    current: f32,
    /// Target value
    target: f32,
    /// Increment per sample (can be positive or negative)
    increment: f32,
    /// Samples remaining until target reached
    samples_remaining: u32,
    /// Sample rate in Hz
    sample_rate: f32,
    /// Transition time in milliseconds
    transition_time_ms: f32,
}

impl LinearSmoothedParam {
    /// Create a new linear smoothed parameter at 44.1 kHz with a 10 ms ramp.
    pub fn new(initial: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            increment: 0.0,
            samples_remaining: 0,
            sample_rate: 44100.0,
            transition_time_ms: 10.0,
        }
    }

    /// Create with full configuration.
    pub fn with_config(initial: f32, sample_rate: f32, transition_time_ms: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            increment: 0.0,
            samples_remaining: 0,
            sample_rate,
            transition_time_ms,
        }
    }

    /// Set the target value, starting a ramp from the current value.
    pub fn set_target(&mut self, target: f32) {
        if (target - self.target).abs() < 1e-9 {
            return; // Same target, keep the ramp in flight
        }

        self.target = target;

        let samples = (self.transition_time_ms / 1000.0 * self.sample_rate) as u32;
        if samples == 0 {
            self.current = target;
            self.increment = 0.0;
            self.samples_remaining = 0;
        } else {
            self.increment = (target - self.current) / samples as f32;
            self.samples_remaining = samples;
        }
    }

    /// Set current and target immediately, cancelling any ramp.
    pub fn set_immediate(&mut self, value: f32) {
        self.current = value;
        self.target = value;
        self.increment = 0.0;
        self.samples_remaining = 0;
    }

    /// Update sample rate. Takes effect on the next [`set_target`](Self::set_target).
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
    }

    /// Set transition time in milliseconds.
    pub fn set_transition_time_ms(&mut self, time_ms: f32) {
        self.transition_time_ms = time_ms;
    }

    /// Advance one sample and return the interpolated value.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        if self.samples_remaining > 0 {
            self.current += self.increment;
            self.samples_remaining -= 1;
            if self.samples_remaining == 0 {
                self.current = self.target; // Snap to exact target
            }
        }
        self.current
    }

    /// Advance the ramp by `n` samples without producing per-sample values.
    ///
    /// For block-rate consumers (metering) that only need the value once
    /// per block.
    pub fn advance_by(&mut self, n: u32) {
        if self.samples_remaining > n {
            self.current += self.increment * n as f32;
            self.samples_remaining -= n;
        } else if self.samples_remaining > 0 {
            self.current = self.target;
            self.samples_remaining = 0;
        }
    }

    /// Get current value without advancing.
    #[inline]
    pub fn get(&self) -> f32 {
        self.current
    }

    /// Get target value.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Check if the ramp is complete.
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.samples_remaining == 0
    }

    /// Per-sample increment of the ramp currently in flight (0 if settled).
    #[inline]
    pub fn increment(&self) -> f32 {
        if self.samples_remaining > 0 {
            self.increment
        } else {
            0.0
        }
    }

    /// Snap to target immediately, cancelling any ramp.
    pub fn snap_to_target(&mut self) {
        self.current = self.target;
        self.increment = 0.0;
        self.samples_remaining = 0;
    }
}

impl Default for LinearSmoothedParam {
    fn default() -> Self {
        Self::new(0.0)
    }
}
