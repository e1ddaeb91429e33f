//! Preset file format for the six-knob surface.
//!
//! Presets are TOML files carrying one value per knob. Missing knobs fall
//! back to their defaults, so a preset can name just the controls it cares
//! about.

use serde::{Deserialize, Serialize};
use std::path::Path;
use vokomp_chain::ParameterSnapshot;

/// Preset file format.
#[derive(Debug, Serialize, Deserialize)]
pub struct Preset {
    /// Name of the preset
    pub name: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Knob settings
    #[serde(default)]
    pub knobs: Knobs,
}

/// One value per knob; every field is optional.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Knobs {
    /// Chain enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Compression amount, 0-10
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compression: Option<f32>,
    /// Output level in dB, -18..18
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_db: Option<f32>,
    /// Attack time in ms, 1-100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack_ms: Option<f32>,
    /// Wet proportion in percent, 10-100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mix_percent: Option<f32>,
    /// Voice preset index, 0-2
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<u8>,
}

impl Preset {
    /// Load a preset from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Fold the preset over a snapshot; unset knobs keep the base value.
    pub fn apply(&self, base: ParameterSnapshot) -> ParameterSnapshot {
        ParameterSnapshot {
            enabled: self.knobs.enabled.unwrap_or(base.enabled),
            comp_raw: self.knobs.compression.unwrap_or(base.comp_raw),
            output_db: self.knobs.output_db.unwrap_or(base.output_db),
            attack_ms: self.knobs.attack_ms.unwrap_or(base.attack_ms),
            mix_percent: self.knobs.mix_percent.unwrap_or(base.mix_percent),
            voice: self.knobs.voice.unwrap_or(base.voice),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_preset_keeps_defaults() {
        let preset: Preset = toml::from_str(
            r#"
            name = "gentle"

            [knobs]
            compression = 3.0
            mix_percent = 50.0
            "#,
        )
        .unwrap();

        let snap = preset.apply(ParameterSnapshot::default());
        assert_eq!(snap.comp_raw, 3.0);
        assert_eq!(snap.mix_percent, 50.0);
        // Untouched knobs stay at their defaults
        assert_eq!(snap.attack_ms, 30.0);
        assert_eq!(snap.voice, 1);
        assert!(snap.enabled);
    }

    #[test]
    fn full_preset_overrides_everything() {
        let preset: Preset = toml::from_str(
            r#"
            name = "squash"
            description = "heavy vocal squash"

            [knobs]
            enabled = true
            compression = 9.0
            output_db = -3.0
            attack_ms = 5.0
            mix_percent = 100.0
            voice = 2
            "#,
        )
        .unwrap();

        let snap = preset.apply(ParameterSnapshot::default());
        assert_eq!(snap.comp_raw, 9.0);
        assert_eq!(snap.output_db, -3.0);
        assert_eq!(snap.attack_ms, 5.0);
        assert_eq!(snap.mix_percent, 100.0);
        assert_eq!(snap.voice, 2);
    }

    #[test]
    fn missing_name_fails() {
        let result: Result<Preset, _> = toml::from_str("[knobs]\ncompression = 1.0\n");
        assert!(result.is_err());
    }
}
