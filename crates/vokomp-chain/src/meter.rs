//! Block-rate gain-reduction meter with ballistic decay.
//!
//! The meter tracks one positive dB figure per block: how much the
//! compressor pulled the block's peak down. Ballistics are asymmetric:
//! a bigger reduction registers instantly, a smaller one decays along a
//! 500 ms ramp so the needle falls back readably instead of flickering.

use vokomp_core::LinearSmoothedParam;

/// Default decay ramp in milliseconds.
pub const DECAY_MS: f32 = 500.0;

/// Smoothed gain-reduction readout, in positive dB.
#[derive(Debug, Clone)]
pub struct GainReductionMeter {
    value: LinearSmoothedParam,
}

impl GainReductionMeter {
    /// Create a meter at rest (0 dB reduction).
    pub fn new(sample_rate: f32) -> Self {
        Self {
            value: LinearSmoothedParam::with_config(0.0, sample_rate, DECAY_MS),
        }
    }

    /// Update the sample rate so the decay ramp keeps its wall-clock time.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.value.set_sample_rate(sample_rate);
    }

    /// Feed one block's reduction figure and advance the decay by the
    /// block length.
    ///
    /// The ramp is advanced first so decay tracks audio time, then the
    /// new figure either retargets the ramp (falling) or replaces the
    /// value outright (rising).
    pub fn update_block(&mut self, reduction_db: f32, block_len: usize) {
        self.value.advance_by(block_len as u32);
        if reduction_db < self.value.get() {
            self.value.set_target(reduction_db);
        } else {
            self.value.set_immediate(reduction_db);
        }
    }

    /// Snap the readout to zero. Used on bypass and stream restart.
    pub fn force_zero(&mut self) {
        self.value.set_immediate(0.0);
    }

    /// Current reduction readout in dB (≥ 0).
    pub fn value_db(&self) -> f32 {
        self.value.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let meter = GainReductionMeter::new(48000.0);
        assert_eq!(meter.value_db(), 0.0);
    }

    #[test]
    fn rising_reduction_registers_instantly() {
        let mut meter = GainReductionMeter::new(48000.0);
        meter.update_block(12.0, 512);
        assert_eq!(meter.value_db(), 12.0);
    }

    #[test]
    fn falling_reduction_decays_over_ramp() {
        let sr = 48000.0;
        let mut meter = GainReductionMeter::new(sr);
        meter.update_block(12.0, 512);

        // One 512-sample block of no reduction barely moves the needle
        meter.update_block(0.0, 512);
        let after_one = meter.value_db();
        assert!(after_one > 10.0, "Decay too fast: {after_one}");

        // 500 ms worth of blocks brings it home
        let blocks = (sr * 0.5 / 512.0) as usize + 2;
        for _ in 0..blocks {
            meter.update_block(0.0, 512);
        }
        assert!(meter.value_db() < 0.5, "Should decay out: {}", meter.value_db());
    }

    #[test]
    fn rise_during_decay_jumps_back_up() {
        let mut meter = GainReductionMeter::new(48000.0);
        meter.update_block(12.0, 512);
        meter.update_block(0.0, 512);
        meter.update_block(0.0, 512);
        assert!(meter.value_db() < 12.0);

        meter.update_block(15.0, 512);
        assert_eq!(meter.value_db(), 15.0);
    }

    #[test]
    fn force_zero_snaps() {
        let mut meter = GainReductionMeter::new(48000.0);
        meter.update_block(9.0, 512);
        meter.force_zero();
        assert_eq!(meter.value_db(), 0.0);

        // And the zero holds, no stale ramp
        meter.update_block(0.0, 512);
        assert_eq!(meter.value_db(), 0.0);
    }

    #[test]
    fn decay_rate_follows_block_length() {
        let sr = 48000.0;
        let mut short_blocks = GainReductionMeter::new(sr);
        let mut long_blocks = GainReductionMeter::new(sr);
        short_blocks.update_block(12.0, 256);
        long_blocks.update_block(12.0, 1024);

        // First call only starts the ramp; the rest advance 4096 samples
        // in both cases
        for _ in 0..17 {
            short_blocks.update_block(0.0, 256);
        }
        for _ in 0..5 {
            long_blocks.update_block(0.0, 1024);
        }
        // Same number of samples elapsed, same decay position
        assert!((short_blocks.value_db() - long_blocks.value_db()).abs() < 0.01);
    }
}
