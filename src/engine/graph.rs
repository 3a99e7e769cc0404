//! The synthesis graph.
//!
//! Owns the oscillator bank (one oscillator+gain pair per harmonic), the
//! shared lowpass filter, the vibrato LFO fanned out to every oscillator's
//! pitch, and the reverb send. The bank is the only part that is ever torn
//! down and rebuilt while audio is live; filter, LFO, and reverb persist
//! for the graph's lifetime.
//!
//! Everything externally driven is written as a smoothed target, never
//! assigned directly. That is the mechanism that absorbs the mismatch
//! between the ~60 Hz control tick and the audio sample clock.

use crate::control::ControlTargets;
use crate::dsp::{ReverbSend, SmoothedValue, SvfFilter, Vibrato, Waveform};
use crate::patch::PatchSettings;

/// Headroom constant for harmonic gains: harmonic i gets
/// `REFERENCE_GAIN / sqrt(i)`, keeping a full 20-harmonic sum inside safe
/// output range.
pub const REFERENCE_GAIN: f32 = 0.3;

/// Time constants for per-tick gesture writes. Short enough to track the
/// hand, long enough that 60 Hz steps are inaudible.
const FREQ_SMOOTHING_SECS: f32 = 0.02;
const GAIN_SMOOTHING_SECS: f32 = 0.015;

/// The reverb amount moves slower; wet-level steps are more audible than
/// pitch steps.
const REVERB_SMOOTHING_SECS: f32 = 0.08;

/// Build state of the graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildState {
    /// No oscillator bank yet.
    Uninitialized,
    /// Bank matches the active patch topology.
    Built,
    /// Graph has been shut down; no further writes.
    TornDown,
}

/// One oscillator+gain pair of the bank.
struct HarmonicVoice {
    /// Phase accumulator (0.0 to 1.0).
    phase: f32,
    /// Oscillator frequency in Hz, smoothed.
    frequency: SmoothedValue,
    /// Harmonic gain, smoothed; silenced harmonics ramp here to exactly 0.
    gain: SmoothedValue,
}

impl HarmonicVoice {
    fn new(sample_rate: f32) -> Self {
        Self {
            phase: 0.0,
            frequency: SmoothedValue::new(0.0, FREQ_SMOOTHING_SECS, sample_rate),
            // New pairs always come up silent and fade in.
            gain: SmoothedValue::new(0.0, GAIN_SMOOTHING_SECS, sample_rate),
        }
    }
}

/// The additive synthesis signal graph.
pub struct SynthesisGraph {
    sample_rate: f32,
    state: BuildState,
    waveform: Waveform,
    voices: Vec<HarmonicVoice>,
    filter: SvfFilter,
    lfo: Vibrato,
    reverb: ReverbSend,
    reverb_wet: SmoothedValue,
}

impl SynthesisGraph {
    pub fn new(sample_rate: f32) -> Self {
        let defaults = PatchSettings::default();
        Self {
            sample_rate,
            state: BuildState::Uninitialized,
            waveform: defaults.waveform,
            voices: Vec::new(),
            filter: SvfFilter::new(defaults.filter_cutoff_hz, defaults.filter_q, sample_rate),
            lfo: Vibrato::new(defaults.lfo_min_freq_hz, sample_rate),
            reverb: ReverbSend::new(sample_rate),
            reverb_wet: SmoothedValue::new(0.0, REVERB_SMOOTHING_SECS, sample_rate),
        }
    }

    pub fn build_state(&self) -> BuildState {
        self.state
    }

    /// Number of oscillator+gain pairs currently built.
    pub fn harmonic_count(&self) -> usize {
        self.voices.len()
    }

    /// Whether applying `patch` requires tearing down the bank.
    pub fn needs_rebuild(&self, patch: &PatchSettings) -> bool {
        self.state != BuildState::Built
            || self.voices.len() != patch.harmonic_count as usize
            || self.waveform != patch.waveform
    }

    /// Tears down the oscillator bank and constructs a fresh one matching
    /// the patch: `harmonic_count` pairs of the patch's waveform, every
    /// gain starting at zero. The filter, LFO phase, reverb tail, and the
    /// master envelope (owned by the processor) are untouched, so a
    /// rebuild mid-note does not interrupt them.
    ///
    /// Safe to call whether the graph is silent or playing, and always
    /// yields identical topology for the same patch.
    pub fn rebuild(&mut self, patch: &PatchSettings) {
        if self.state == BuildState::TornDown {
            return;
        }
        self.waveform = patch.waveform;
        self.voices.clear();
        self.voices
            .extend((0..patch.harmonic_count).map(|_| HarmonicVoice::new(self.sample_rate)));
        self.state = BuildState::Built;
    }

    /// Applies the patch-level (non-gestural) parameters: filter cutoff
    /// and Q, LFO base rate, reverb send level. All smoothed.
    pub fn retune(&mut self, patch: &PatchSettings) {
        if self.state == BuildState::TornDown {
            return;
        }
        self.filter.set_cutoff_target(patch.filter_cutoff_hz);
        self.filter.set_q_target(patch.filter_q);
        self.lfo.set_rate_target(patch.lfo_min_freq_hz);
        self.reverb_wet.set_target(patch.reverb_mix);
    }

    /// Applies one control tick's parameter targets.
    ///
    /// Per 1-based harmonic index i: frequency target `pitch_hz * i`; gain
    /// target `REFERENCE_GAIN / sqrt(i)` while i <= active_harmonics, else
    /// exactly 0. Silenced harmonics stay in the bank and ramp down; they
    /// are never removed, so reactivating them is click-free.
    pub fn apply_control_targets(&mut self, targets: &ControlTargets) {
        if self.state != BuildState::Built {
            return;
        }
        for (index, voice) in self.voices.iter_mut().enumerate() {
            let harmonic = (index + 1) as u32;
            voice.frequency.set_target(targets.pitch_hz * harmonic as f32);
            let gain = if harmonic <= targets.active_harmonics {
                REFERENCE_GAIN / (harmonic as f32).sqrt()
            } else {
                0.0
            };
            voice.gain.set_target(gain);
        }
        self.lfo.set_rate_target(targets.lfo_rate_hz);
        self.lfo.set_depth_target(targets.lfo_depth_hz);
        self.reverb_wet.set_target(targets.reverb_mix);
    }

    /// Renders one sample. `envelope_gain` is the master envelope value
    /// for this sample, applied after the filter and before the reverb
    /// send so the tail rings through releases.
    #[inline]
    pub fn process(&mut self, envelope_gain: f32) -> f32 {
        if self.state != BuildState::Built {
            return 0.0;
        }

        let vibrato_hz = self.lfo.next_offset_hz();

        let mut sum = 0.0;
        for voice in &mut self.voices {
            let freq = (voice.frequency.next() + vibrato_hz).max(0.0);
            let sample = self.waveform.sample(voice.phase);
            voice.phase += freq / self.sample_rate;
            if voice.phase >= 1.0 {
                voice.phase -= 1.0;
            }
            sum += sample * voice.gain.next();
        }

        let dry = self.filter.process(sum) * envelope_gain;
        let wet = self.reverb.process(dry) * self.reverb_wet.next();
        dry + wet
    }

    /// Final teardown: silences and drops the bank and marks the graph
    /// unusable. Idempotent; tearing down an already torn-down graph is
    /// not an error (shutdown may race a rebuild).
    pub fn tear_down(&mut self) {
        self.voices.clear();
        self.reverb.clear();
        self.state = BuildState::TornDown;
    }

    // Target accessors, used by the tests to observe parameter writes
    // without waiting out the smoothing.

    pub fn voice_frequency_target(&self, index: usize) -> Option<f32> {
        self.voices.get(index).map(|v| v.frequency.target())
    }

    pub fn voice_gain_target(&self, index: usize) -> Option<f32> {
        self.voices.get(index).map(|v| v.gain.target())
    }

    pub fn filter_cutoff_target(&self) -> f32 {
        self.filter.cutoff_target()
    }

    pub fn reverb_wet_target(&self) -> f32 {
        self.reverb_wet.target()
    }

    pub fn lfo_rate_target(&self) -> f32 {
        self.lfo.rate_target()
    }
}
