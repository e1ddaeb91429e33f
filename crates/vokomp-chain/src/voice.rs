//! Voice equalizer: two cascaded biquad sections with preset coloring.
//!
//! Each voice preset pairs a peaking bell (the character of the voice)
//! with a fixed 10 Hz high-pass that keeps sub-sonic rumble out of the
//! output. A voice switch only swaps coefficients; the delay registers
//! are kept, trading a short settling transient for click-free switching.
//! A sample-rate change recomputes coefficients *and* clears state.

use vokomp_core::{Biquad, highpass_coefficients, peaking_coefficients};

/// One voice preset: a peaking section plus the rumble high-pass.
#[derive(Debug, Clone, Copy)]
struct VoicePreset {
    peak_hz: f32,
    peak_q: f32,
    peak_gain_db: f32,
    hp_hz: f32,
    hp_q: f32,
}

/// Butterworth Q for the rumble filter.
const RUMBLE_Q: f32 = core::f32::consts::FRAC_1_SQRT_2;

/// The three voice colorings. Bell gains are linear factors of 2.0, 1.0,
/// and 2.5 expressed in dB.
const PRESETS: [VoicePreset; 3] = [
    // Presence: wide 2.4 kHz bell, +6 dB
    VoicePreset {
        peak_hz: 2430.0,
        peak_q: 0.5,
        peak_gain_db: 6.0206,
        hp_hz: 10.0,
        hp_q: RUMBLE_Q,
    },
    // Neutral: the bell sits at unity
    VoicePreset {
        peak_hz: 2430.0,
        peak_q: 0.5,
        peak_gain_db: 0.0,
        hp_hz: 10.0,
        hp_q: RUMBLE_Q,
    },
    // Punch: broader 2 kHz bell, +8 dB
    VoicePreset {
        peak_hz: 2000.0,
        peak_q: 0.35,
        peak_gain_db: 7.9588,
        hp_hz: 10.0,
        hp_q: RUMBLE_Q,
    },
];

/// Voice preset selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Voice {
    /// Wide 2.4 kHz presence lift.
    Presence = 0,
    /// No coloring from the bell section.
    #[default]
    Neutral = 1,
    /// Broad 2 kHz boost for a forward, punchy tone.
    Punch = 2,
}

impl Voice {
    /// Convert a knob index (0–2) to a voice. Out-of-range clamps to
    /// [`Voice::Punch`].
    pub fn from_index(index: u8) -> Self {
        match index {
            0 => Self::Presence,
            1 => Self::Neutral,
            _ => Self::Punch,
        }
    }
}

/// Two-section voice EQ for a stereo pair.
///
/// Sections are duplicated per channel so left and right keep independent
/// filter memory.
#[derive(Debug, Clone)]
pub struct VoiceEq {
    /// Biquad sections, indexed `[channel][section]`: section 0 is the
    /// bell, section 1 the rumble high-pass.
    sections: [[Biquad; 2]; 2],
    voice: Voice,
    sample_rate: f32,
}

impl VoiceEq {
    /// Create the EQ at the given sample rate with the default voice.
    pub fn new(sample_rate: f32) -> Self {
        let mut eq = Self {
            sections: [[Biquad::new(), Biquad::new()], [Biquad::new(), Biquad::new()]],
            voice: Voice::default(),
            sample_rate,
        };
        eq.update_coefficients();
        eq
    }

    /// Select a voice. Recomputes coefficients only when the voice
    /// actually changes; delay registers are kept.
    pub fn set_voice(&mut self, voice: Voice) {
        if voice != self.voice {
            self.voice = voice;
            self.update_coefficients();
        }
    }

    /// Currently selected voice.
    pub fn voice(&self) -> Voice {
        self.voice
    }

    /// Update the sample rate: recompute coefficients and clear all
    /// filter state.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.update_coefficients();
        self.reset();
    }

    /// Clear the delay registers of every section.
    pub fn reset(&mut self) {
        for channel in &mut self.sections {
            for section in channel {
                section.clear();
            }
        }
    }

    /// Filter both channels in place.
    pub fn process_block(&mut self, left: &mut [f32], right: &mut [f32]) {
        debug_assert_eq!(left.len(), right.len());
        let [left_sections, right_sections] = &mut self.sections;
        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            let bell = left_sections[0].process(*l);
            *l = left_sections[1].process(bell);
            let bell = right_sections[0].process(*r);
            *r = right_sections[1].process(bell);
        }
    }

    fn update_coefficients(&mut self) {
        let preset = PRESETS[self.voice as usize];
        let (pb0, pb1, pb2, pa0, pa1, pa2) = peaking_coefficients(
            preset.peak_hz,
            preset.peak_q,
            preset.peak_gain_db,
            self.sample_rate,
        );
        let (hb0, hb1, hb2, ha0, ha1, ha2) =
            highpass_coefficients(preset.hp_hz, preset.hp_q, self.sample_rate);

        for channel in &mut self.sections {
            channel[0].set_coefficients(pb0, pb1, pb2, pa0, pa1, pa2);
            channel[1].set_coefficients(hb0, hb1, hb2, ha0, ha1, ha2);
        }
    }
}
