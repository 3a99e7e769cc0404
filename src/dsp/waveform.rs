//! Waveform kinds and sample generation.
//!
//! The oscillator bank renders one of four classic shapes. Generation is
//! naive (no band-limiting); at the harmonic counts and pitch ranges this
//! instrument uses, aliasing stays below the reverb/filter noise floor.

use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

/// Oscillator waveform kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl Waveform {
    /// Parses the external patch-system name for a waveform.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sine" => Some(Waveform::Sine),
            "square" => Some(Waveform::Square),
            "sawtooth" => Some(Waveform::Sawtooth),
            "triangle" => Some(Waveform::Triangle),
            _ => None,
        }
    }

    /// Generates one sample for a phase in [0, 1).
    #[inline]
    pub fn sample(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (phase * TAU).sin(),
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            // Rising ramp: -1 at phase 0, +1 just before wrap.
            Waveform::Sawtooth => 2.0 * phase - 1.0,
            Waveform::Triangle => {
                if phase < 0.5 {
                    4.0 * phase - 1.0
                } else {
                    3.0 - 4.0 * phase
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(Waveform::from_name("sine"), Some(Waveform::Sine));
        assert_eq!(Waveform::from_name("square"), Some(Waveform::Square));
        assert_eq!(Waveform::from_name("sawtooth"), Some(Waveform::Sawtooth));
        assert_eq!(Waveform::from_name("triangle"), Some(Waveform::Triangle));
        assert_eq!(Waveform::from_name("noise"), None);
    }

    #[test]
    fn test_sine_endpoints() {
        assert!(Waveform::Sine.sample(0.0).abs() < 1e-6);
        assert!((Waveform::Sine.sample(0.25) - 1.0).abs() < 1e-6);
        assert!((Waveform::Sine.sample(0.75) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_square_halves() {
        assert_eq!(Waveform::Square.sample(0.1), 1.0);
        assert_eq!(Waveform::Square.sample(0.6), -1.0);
    }

    #[test]
    fn test_sawtooth_ramp() {
        assert_eq!(Waveform::Sawtooth.sample(0.0), -1.0);
        assert_eq!(Waveform::Sawtooth.sample(0.5), 0.0);
        assert!((Waveform::Sawtooth.sample(0.999) - 0.998).abs() < 1e-3);
    }

    #[test]
    fn test_triangle_peaks() {
        assert_eq!(Waveform::Triangle.sample(0.0), -1.0);
        assert_eq!(Waveform::Triangle.sample(0.25), 0.0);
        assert_eq!(Waveform::Triangle.sample(0.5), 1.0);
        assert_eq!(Waveform::Triangle.sample(0.75), 0.0);
    }

    #[test]
    fn test_all_waveforms_bounded() {
        for wf in [
            Waveform::Sine,
            Waveform::Square,
            Waveform::Sawtooth,
            Waveform::Triangle,
        ] {
            for i in 0..100 {
                let s = wf.sample(i as f32 / 100.0);
                assert!((-1.0..=1.0).contains(&s), "{:?} at {} -> {}", wf, i, s);
            }
        }
    }

    #[test]
    fn test_serde_lowercase() {
        let wf: Waveform = serde_json::from_str("\"sawtooth\"").unwrap();
        assert_eq!(wf, Waveform::Sawtooth);
        assert_eq!(serde_json::to_string(&Waveform::Sine).unwrap(), "\"sine\"");
    }
}
