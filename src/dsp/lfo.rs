//! Vibrato modulator.
//!
//! A sub-audio-rate sine oscillator whose output is an additive frequency
//! offset in Hz, fanned out to every oscillator in the bank. Rate and depth
//! are hand-controlled every tick, so both are smoothed.

use std::f32::consts::TAU;

use super::smoothed_value::SmoothedValue;

/// Rate changes glide a little slower than depth so fast hand motion reads
/// as expressive rather than warbly.
const RATE_SMOOTHING_SECS: f32 = 0.05;
const DEPTH_SMOOTHING_SECS: f32 = 0.02;

/// Low-frequency oscillator producing an additive pitch offset in Hz.
pub struct Vibrato {
    /// Current phase (0.0 to 1.0).
    phase: f32,
    /// Oscillation rate in Hz, smoothed.
    rate_hz: SmoothedValue,
    /// Peak frequency deviation in Hz, smoothed.
    depth_hz: SmoothedValue,
    sample_rate: f32,
}

impl Vibrato {
    /// Creates a vibrato oscillator at the given base rate with zero depth.
    pub fn new(rate_hz: f32, sample_rate: f32) -> Self {
        Self {
            phase: 0.0,
            rate_hz: SmoothedValue::new(rate_hz, RATE_SMOOTHING_SECS, sample_rate),
            depth_hz: SmoothedValue::new(0.0, DEPTH_SMOOTHING_SECS, sample_rate),
            sample_rate,
        }
    }

    /// Sets the rate target in Hz.
    pub fn set_rate_target(&mut self, rate_hz: f32) {
        self.rate_hz.set_target(rate_hz.max(0.0));
    }

    /// Sets the depth target (peak deviation in Hz).
    pub fn set_depth_target(&mut self, depth_hz: f32) {
        self.depth_hz.set_target(depth_hz.max(0.0));
    }

    /// Current rate target (Hz).
    pub fn rate_target(&self) -> f32 {
        self.rate_hz.target()
    }

    /// Current depth target (Hz).
    pub fn depth_target(&self) -> f32 {
        self.depth_hz.target()
    }

    /// Advances one sample and returns the frequency offset in Hz.
    #[inline]
    pub fn next_offset_hz(&mut self) -> f32 {
        let rate = self.rate_hz.next();
        let depth = self.depth_hz.next();
        let out = (self.phase * TAU).sin() * depth;
        self.phase += rate / self.sample_rate;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        out
    }
}
