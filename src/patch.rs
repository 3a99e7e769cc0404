//! Patch settings.
//!
//! A patch captures the non-gestural character of the instrument: waveform,
//! harmonic count, envelope times, filter, reverb level, vibrato range, and
//! an optional arpeggiator pattern. The external preset system owns the
//! JSON schema; this module owns the boundary type ([`PatchData`], all
//! fields optional) and its one-time resolution into the immutable
//! [`PatchSettings`] the engine runs on. Downstream components never merge
//! defaults again.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dsp::Waveform;

/// Errors rejecting a patch at resolution time.
///
/// Only these are hard failures; every other missing field falls back to
/// an engine default and the patch is accepted.
#[derive(Debug, Error, PartialEq)]
pub enum PatchError {
    #[error("patch has no waveform")]
    MissingWaveform,
    #[error("unknown waveform kind: {0:?}")]
    UnknownWaveform(String),
    #[error("harmonic count must be at least 1")]
    ZeroHarmonics,
}

/// An arpeggiator pattern: a step cadence and an ordered sequence of
/// signed semitone offsets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArpeggiatorPattern {
    /// Wall-clock time between steps, in milliseconds.
    pub interval_ms: f64,
    /// Semitone offsets visited in order, wrapping at the end.
    pub steps: Vec<i32>,
}

/// Fully resolved, immutable per-patch settings.
///
/// Replaced atomically on patch switch; the engine and graph read it but
/// never mutate it.
#[derive(Clone, Debug, PartialEq)]
pub struct PatchSettings {
    pub name: String,
    pub waveform: Waveform,
    /// Number of oscillator+gain pairs in the bank.
    pub harmonic_count: u32,
    pub attack_secs: f32,
    pub release_secs: f32,
    pub filter_cutoff_hz: f32,
    pub filter_q: f32,
    /// Baseline reverb wet amount, used when no left hand is present.
    pub reverb_mix: f32,
    /// Vibrato rate with the right hand at rest.
    pub lfo_min_freq_hz: f32,
    /// Hand-controlled rate headroom; see `ControlMapper`.
    pub lfo_max_rate_multiplier: f32,
    /// Hand-controlled peak pitch deviation in Hz.
    pub lfo_max_depth_multiplier: f32,
    /// Whole-octave transpose, signed.
    pub octave_offset: i32,
    pub arpeggiator: Option<ArpeggiatorPattern>,
}

impl Default for PatchSettings {
    fn default() -> Self {
        Self {
            name: "Init".to_string(),
            waveform: Waveform::Sine,
            harmonic_count: 6,
            attack_secs: 0.08,
            release_secs: 0.35,
            filter_cutoff_hz: 5000.0,
            filter_q: 1.0,
            reverb_mix: 0.25,
            lfo_min_freq_hz: 4.0,
            lfo_max_rate_multiplier: 1.5,
            lfo_max_depth_multiplier: 8.0,
            octave_offset: 0,
            arpeggiator: None,
        }
    }
}

/// The serde-facing patch shape handed over by the external preset system.
///
/// Every field is optional; [`PatchData::resolve`] fills defaults and
/// validates the two hard requirements (a known waveform, a positive
/// harmonic count).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchData {
    pub name: Option<String>,
    pub waveform: Option<String>,
    pub harmonic_count: Option<u32>,
    pub attack_secs: Option<f32>,
    pub release_secs: Option<f32>,
    pub filter_cutoff_hz: Option<f32>,
    pub filter_q: Option<f32>,
    pub reverb_mix: Option<f32>,
    pub lfo_min_freq_hz: Option<f32>,
    pub lfo_max_rate_multiplier: Option<f32>,
    pub lfo_max_depth_multiplier: Option<f32>,
    pub octave_offset: Option<i32>,
    pub arpeggiator: Option<ArpeggiatorPattern>,
}

impl PatchData {
    /// Resolves into concrete settings, defaulting unspecified fields.
    pub fn resolve(&self) -> Result<PatchSettings, PatchError> {
        let defaults = PatchSettings::default();

        let waveform_name = self.waveform.as_deref().ok_or(PatchError::MissingWaveform)?;
        let waveform = Waveform::from_name(waveform_name)
            .ok_or_else(|| PatchError::UnknownWaveform(waveform_name.to_string()))?;

        let harmonic_count = self.harmonic_count.unwrap_or(defaults.harmonic_count);
        if harmonic_count == 0 {
            return Err(PatchError::ZeroHarmonics);
        }

        Ok(PatchSettings {
            name: self.name.clone().unwrap_or(defaults.name),
            waveform,
            harmonic_count,
            attack_secs: self.attack_secs.unwrap_or(defaults.attack_secs),
            release_secs: self.release_secs.unwrap_or(defaults.release_secs),
            filter_cutoff_hz: self.filter_cutoff_hz.unwrap_or(defaults.filter_cutoff_hz),
            filter_q: self.filter_q.unwrap_or(defaults.filter_q),
            reverb_mix: self.reverb_mix.unwrap_or(defaults.reverb_mix),
            lfo_min_freq_hz: self.lfo_min_freq_hz.unwrap_or(defaults.lfo_min_freq_hz),
            lfo_max_rate_multiplier: self
                .lfo_max_rate_multiplier
                .unwrap_or(defaults.lfo_max_rate_multiplier),
            lfo_max_depth_multiplier: self
                .lfo_max_depth_multiplier
                .unwrap_or(defaults.lfo_max_depth_multiplier),
            octave_offset: self.octave_offset.unwrap_or(defaults.octave_offset),
            arpeggiator: self.arpeggiator.clone(),
        })
    }
}
