//! The six-knob control surface and the lock-free parameter store.
//!
//! The chain never talks to the control thread directly. A UI (or the
//! CLI harness) writes knob values into a [`ParamStore`]; once per block
//! the audio thread takes a [`ParameterSnapshot`] and hands it to
//! [`SignalChain::process`](crate::SignalChain::process). The snapshot is
//! a plain value type, so a knob moving mid-block can never tear the
//! parameters the block is processed with.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Metadata for one user-facing control.
#[derive(Debug, Clone, Copy)]
pub struct KnobDescriptor {
    /// Display name.
    pub name: &'static str,
    /// Unit suffix for display ("" for unitless).
    pub unit: &'static str,
    /// Minimum plain value.
    pub min: f32,
    /// Maximum plain value.
    pub max: f32,
    /// Step for display quantization.
    pub step: f32,
    /// Value at construction.
    pub default: f32,
}

/// The six knobs, in snapshot field order.
///
/// On/Off and Voice are stepped controls stored as floats here so a host
/// or bridge can treat the whole surface uniformly.
pub const KNOBS: [KnobDescriptor; 6] = [
    KnobDescriptor {
        name: "On/Off",
        unit: "",
        min: 0.0,
        max: 1.0,
        step: 1.0,
        default: 1.0,
    },
    KnobDescriptor {
        name: "Compression",
        unit: "",
        min: 0.0,
        max: 10.0,
        step: 0.1,
        default: 5.0,
    },
    KnobDescriptor {
        name: "Output Level",
        unit: "dB",
        min: -18.0,
        max: 18.0,
        step: 0.1,
        default: 0.0,
    },
    KnobDescriptor {
        name: "Attack",
        unit: "ms",
        min: 1.0,
        max: 100.0,
        step: 0.1,
        default: 30.0,
    },
    KnobDescriptor {
        name: "Mix",
        unit: "%",
        min: 10.0,
        max: 100.0,
        step: 0.1,
        default: 80.0,
    },
    KnobDescriptor {
        name: "Voice",
        unit: "",
        min: 0.0,
        max: 2.0,
        step: 1.0,
        default: 1.0,
    },
];

/// Per-block view of all six controls.
///
/// Read by the chain once per callback. Values are expected to sit inside
/// the [`KNOBS`] ranges; the chain clamps defensively regardless.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSnapshot {
    /// Chain enabled. When false the block passes through untouched and
    /// the meter is forced to zero.
    pub enabled: bool,
    /// Compression amount, 0–10. Drives both the threshold and the input
    /// gain makeup.
    pub comp_raw: f32,
    /// Output level in dB, −18..+18.
    pub output_db: f32,
    /// Compressor attack time in ms, 1–100.
    pub attack_ms: f32,
    /// Wet proportion in percent, 10–100.
    pub mix_percent: f32,
    /// Voice preset index, 0–2.
    pub voice: u8,
}

impl Default for ParameterSnapshot {
    fn default() -> Self {
        Self {
            enabled: KNOBS[0].default >= 0.5,
            comp_raw: KNOBS[1].default,
            output_db: KNOBS[2].default,
            attack_ms: KNOBS[3].default,
            mix_percent: KNOBS[4].default,
            voice: KNOBS[5].default as u8,
        }
    }
}

/// Lock-free knob storage shared between the control and audio threads.
///
/// Float values live in `AtomicU32` as f32 bit patterns; writes use
/// Release ordering and the audio-thread snapshot uses Acquire, so a
/// snapshot always sees whole values, never torn ones. Setters clamp to
/// the [`KNOBS`] ranges.
#[derive(Debug)]
pub struct ParamStore {
    enabled: AtomicBool,
    comp_raw: AtomicU32,
    output_db: AtomicU32,
    attack_ms: AtomicU32,
    mix_percent: AtomicU32,
    voice: AtomicU32,
}

impl ParamStore {
    /// Create a store with every knob at its default.
    pub fn new() -> Self {
        Self {
            enabled: AtomicBool::new(KNOBS[0].default >= 0.5),
            comp_raw: AtomicU32::new(KNOBS[1].default.to_bits()),
            output_db: AtomicU32::new(KNOBS[2].default.to_bits()),
            attack_ms: AtomicU32::new(KNOBS[3].default.to_bits()),
            mix_percent: AtomicU32::new(KNOBS[4].default.to_bits()),
            voice: AtomicU32::new((KNOBS[5].default as u32).min(2)),
        }
    }

    /// Enable or disable the chain.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
    }

    /// Set the compression amount (clamped to 0–10).
    pub fn set_comp_raw(&self, value: f32) {
        let clamped = value.clamp(KNOBS[1].min, KNOBS[1].max);
        self.comp_raw.store(clamped.to_bits(), Ordering::Release);
    }

    /// Set the output level in dB (clamped to −18..+18).
    pub fn set_output_db(&self, value: f32) {
        let clamped = value.clamp(KNOBS[2].min, KNOBS[2].max);
        self.output_db.store(clamped.to_bits(), Ordering::Release);
    }

    /// Set the attack time in ms (clamped to 1–100).
    pub fn set_attack_ms(&self, value: f32) {
        let clamped = value.clamp(KNOBS[3].min, KNOBS[3].max);
        self.attack_ms.store(clamped.to_bits(), Ordering::Release);
    }

    /// Set the wet proportion in percent (clamped to 10–100).
    pub fn set_mix_percent(&self, value: f32) {
        let clamped = value.clamp(KNOBS[4].min, KNOBS[4].max);
        self.mix_percent.store(clamped.to_bits(), Ordering::Release);
    }

    /// Set the voice preset index (clamped to 0–2).
    pub fn set_voice(&self, index: u8) {
        self.voice.store(u32::from(index.min(2)), Ordering::Release);
    }

    /// Take an instantaneous snapshot of all six controls.
    ///
    /// Called by the audio thread once per block. Each field is read with
    /// a single atomic load; the snapshot as a whole is not globally
    /// atomic, which is fine: each value is individually consistent and
    /// the chain tolerates any in-range combination.
    pub fn snapshot(&self) -> ParameterSnapshot {
        ParameterSnapshot {
            enabled: self.enabled.load(Ordering::Acquire),
            comp_raw: f32::from_bits(self.comp_raw.load(Ordering::Acquire)),
            output_db: f32::from_bits(self.output_db.load(Ordering::Acquire)),
            attack_ms: f32::from_bits(self.attack_ms.load(Ordering::Acquire)),
            mix_percent: f32::from_bits(self.mix_percent.load(Ordering::Acquire)),
            voice: self.voice.load(Ordering::Acquire) as u8,
        }
    }
}

impl Default for ParamStore {
    fn default() -> Self {
        Self::new()
    }
}
