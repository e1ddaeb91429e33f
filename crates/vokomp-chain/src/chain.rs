//! The full processing chain for one stereo pair.

use vokomp_core::{linear_to_db, remap};

use crate::compressor::Compressor;
use crate::error::PrepareError;
use crate::gain::GainStage;
use crate::meter::GainReductionMeter;
use crate::mixer::DryWetMixer;
use crate::params::ParameterSnapshot;
use crate::voice::{Voice, VoiceEq};

/// Ramp time for the compression-derived input gain.
const INPUT_GAIN_RAMP_MS: f32 = 100.0;

/// Ramp time for the output level knob.
const OUTPUT_GAIN_RAMP_MS: f32 = 100.0;

/// Crossfade time for the dry/wet mix.
const MIX_RAMP_MS: f32 = 50.0;

/// Sample rate assumed before [`prepare`](SignalChain::prepare) runs.
const DEFAULT_SAMPLE_RATE: f32 = 44100.0;

/// Knob range of the compression control.
const COMP_KNOB_MAX: f32 = 10.0;

/// One compression knob drives two quantities at once: more compression
/// means a lower threshold and more input drive into it.
const THRESHOLD_RANGE_DB: (f32, f32) = (-5.0, -25.0);
const INPUT_GAIN_RANGE_DB: (f32, f32) = (-5.0, 20.0);

/// Stereo dynamics chain with voice coloring.
///
/// Call [`prepare`](Self::prepare) before the first block and again on
/// any sample-rate or block-size change. See the crate docs for the
/// stage order and the real-time contract.
#[derive(Debug, Clone)]
pub struct SignalChain {
    input_gain: GainStage,
    compressor: Compressor,
    meter: GainReductionMeter,
    voice_eq: VoiceEq,
    mixer: DryWetMixer,
    output_gain: GainStage,
    prepared: bool,
}

impl SignalChain {
    /// Create a chain with every stage at its default setting.
    pub fn new() -> Self {
        let sr = DEFAULT_SAMPLE_RATE;
        Self {
            input_gain: GainStage::new(sr, INPUT_GAIN_RAMP_MS),
            compressor: Compressor::new(sr),
            meter: GainReductionMeter::new(sr),
            voice_eq: VoiceEq::new(sr),
            mixer: DryWetMixer::new(sr, MIX_RAMP_MS, 0.8),
            output_gain: GainStage::new(sr, OUTPUT_GAIN_RAMP_MS),
            prepared: false,
        }
    }

    /// Configure for a stream: validate the format, size the dry tap, and
    /// clear all processing state.
    ///
    /// Non-real-time. Allocates.
    pub fn prepare(&mut self, sample_rate: f32, max_block_size: usize) -> Result<(), PrepareError> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(PrepareError::BadSampleRate(sample_rate));
        }
        if max_block_size == 0 {
            return Err(PrepareError::BadBlockSize(max_block_size));
        }

        self.input_gain.set_sample_rate(sample_rate);
        self.compressor.set_sample_rate(sample_rate);
        self.meter.set_sample_rate(sample_rate);
        self.voice_eq.set_sample_rate(sample_rate);
        self.mixer.prepare(sample_rate, max_block_size);
        self.output_gain.set_sample_rate(sample_rate);

        self.reset();
        self.prepared = true;
        Ok(())
    }

    /// Clear all processing memory: compressor envelope, filter state,
    /// meter, and any ramps in flight.
    pub fn reset(&mut self) {
        self.input_gain.reset();
        self.compressor.reset();
        self.meter.force_zero();
        self.voice_eq.reset();
        self.mixer.reset();
        self.output_gain.reset();
    }

    /// Process one stereo block in place.
    ///
    /// Real-time safe: no allocation, no locks, no failure path. Both
    /// slices must be the same length and no longer than the prepared
    /// maximum. A zero-length block is a no-op. When the snapshot is
    /// disabled the block passes through untouched and the meter reads
    /// zero.
    pub fn process(&mut self, left: &mut [f32], right: &mut [f32], params: &ParameterSnapshot) {
        debug_assert!(self.prepared, "process before prepare");
        debug_assert_eq!(left.len(), right.len());
        if left.is_empty() {
            return;
        }

        if !params.enabled {
            self.meter.force_zero();
            return;
        }

        self.apply_snapshot(params);
        self.mixer.capture_dry(left, right);

        self.input_gain.process(left, right);

        let peak_in = block_peak(left, right);
        self.compressor.process_block(left, right);
        let peak_out = block_peak(left, right);

        let reduction_db = (linear_to_db(peak_in) - linear_to_db(peak_out)).max(0.0);
        self.meter.update_block(reduction_db, left.len());

        self.voice_eq.process_block(left, right);
        self.mixer.blend(left, right);
        self.output_gain.process(left, right);
    }

    /// Smoothed gain-reduction readout in positive dB.
    pub fn meter_db(&self) -> f32 {
        self.meter.value_db()
    }

    /// The compressor's instantaneous envelope in positive dB, without
    /// meter ballistics.
    pub fn envelope_db(&self) -> f32 {
        self.compressor.gain_reduction_db()
    }

    /// Fold one snapshot into the stages. Values are clamped here so the
    /// audio path holds its contract even for an out-of-range snapshot.
    fn apply_snapshot(&mut self, params: &ParameterSnapshot) {
        let comp = params.comp_raw.clamp(0.0, COMP_KNOB_MAX);
        self.compressor.set_threshold_db(remap(
            comp,
            0.0,
            COMP_KNOB_MAX,
            THRESHOLD_RANGE_DB.0,
            THRESHOLD_RANGE_DB.1,
        ));
        self.input_gain.set_gain_db(remap(
            comp,
            0.0,
            COMP_KNOB_MAX,
            INPUT_GAIN_RANGE_DB.0,
            INPUT_GAIN_RANGE_DB.1,
        ));

        self.compressor.set_attack_ms(params.attack_ms);
        self.voice_eq.set_voice(Voice::from_index(params.voice));
        self.mixer.set_mix(params.mix_percent / 100.0);
        self.output_gain
            .set_gain_db(params.output_db.clamp(-18.0, 18.0));
    }
}

impl Default for SignalChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Largest absolute sample across both channels.
fn block_peak(left: &[f32], right: &[f32]) -> f32 {
    let l = left.iter().fold(0.0f32, |m, s| m.max(s.abs()));
    let r = right.iter().fold(0.0f32, |m, s| m.max(s.abs()));
    l.max(r)
}
