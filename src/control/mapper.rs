//! Gesture-to-parameter mapping.
//!
//! A stateless pure function re-evaluated every control tick: the latest
//! hand snapshots plus the active patch in, a complete set of synthesis
//! parameter *targets* out. No smoothing happens here; the graph smooths
//! every write on the audio side.
//!
//! Axis assignments are fixed design choices, not per-patch options:
//!
//! - left hand y (inverted): pitch — screen-top is high
//! - left hand x: reverb amount
//! - right hand x (inverted): vibrato rate and depth
//! - right hand y (inverted): how many harmonics sound

use crate::patch::PatchSettings;

use super::{semitone_ratio, HandSample, PitchRange};

/// Hard ceiling on the reverb wet amount so the wet path can never
/// overpower the dry signal.
pub const REVERB_CEILING: f32 = 0.7;

/// Neutral position substituted for an absent hand. The mapper must always
/// return a complete target set; a lost detection holds the instrument at
/// mid-range rather than snapping anywhere.
const NEUTRAL: f32 = 0.5;

/// A complete set of synthesis parameter targets for one control tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlTargets {
    /// Fundamental frequency in Hz.
    pub pitch_hz: f32,
    /// Reverb wet amount, 0..=[`REVERB_CEILING`].
    pub reverb_mix: f32,
    /// Vibrato rate in Hz.
    pub lfo_rate_hz: f32,
    /// Vibrato peak deviation in Hz.
    pub lfo_depth_hz: f32,
    /// Harmonics 1..=this sound; the rest are silenced (gain target 0).
    pub active_harmonics: u32,
}

/// Maps the current hand snapshots onto synthesis targets.
pub fn map_controls(
    left: Option<&HandSample>,
    right: Option<&HandSample>,
    patch: &PatchSettings,
    range: &PitchRange,
) -> ControlTargets {
    // Left hand: pitch (y, inverted) and reverb (x).
    let pitch_pos = match left {
        Some(hand) => 1.0 - hand.y.clamp(0.0, 1.0),
        None => NEUTRAL,
    };

    let semitone_offset = pitch_pos * range.total_semitones();
    let pitch_hz = range.base_frequency_hz()
        * semitone_ratio(semitone_offset)
        * 2.0_f32.powi(patch.octave_offset);

    // An absent left hand keeps the patch's own reverb level; a present
    // one sweeps 0..0.7 across the screen.
    let reverb_mix = match left {
        Some(hand) => hand.x.clamp(0.0, 1.0) * REVERB_CEILING,
        None => patch.reverb_mix.min(REVERB_CEILING),
    };

    // Right hand: vibrato (x, inverted) and harmonic activation (y, inverted).
    let (vibrato_pos, intensity) = match right {
        Some(hand) => (1.0 - hand.x.clamp(0.0, 1.0), 1.0 - hand.y.clamp(0.0, 1.0)),
        None => (NEUTRAL, NEUTRAL),
    };

    let lfo_rate_hz = patch.lfo_min_freq_hz * (1.0 + vibrato_pos * patch.lfo_max_rate_multiplier);
    let lfo_depth_hz = vibrato_pos * patch.lfo_max_depth_multiplier;

    let active_harmonics = (1 + (intensity * (patch.harmonic_count - 1) as f32).floor() as u32)
        .clamp(1, patch.harmonic_count);

    ControlTargets {
        pitch_hz,
        reverb_mix,
        lfo_rate_hz,
        lfo_depth_hz,
        active_harmonics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patch() -> PatchSettings {
        PatchSettings::default()
    }

    fn left(x: f32, y: f32) -> HandSample {
        HandSample::new(x, y, false)
    }

    #[test]
    fn test_pitch_monotonically_non_increasing_in_y() {
        let range = PitchRange::default();
        let p = patch();
        let mut prev = f32::INFINITY;
        for i in 0..=20 {
            let y = i as f32 / 20.0;
            let t = map_controls(Some(&left(0.0, y)), None, &p, &range);
            assert!(
                t.pitch_hz <= prev,
                "pitch rose as y increased at y={}",
                y
            );
            prev = t.pitch_hz;
        }
    }

    #[test]
    fn test_pitch_endpoints_round_trip() {
        let range = PitchRange::new(2, 4);
        let p = patch();
        let base = range.base_frequency_hz();

        // y=1.0 -> bottom of the range.
        let bottom = map_controls(Some(&left(0.0, 1.0)), None, &p, &range);
        assert!((bottom.pitch_hz - base).abs() < 0.01);

        // y=0.0 -> top: base * 2^(36/12) = base * 8.
        let top = map_controls(Some(&left(0.0, 0.0)), None, &p, &range);
        assert!((top.pitch_hz - base * 8.0).abs() < 0.1);
    }

    #[test]
    fn test_octave_offset_scales_pitch() {
        let range = PitchRange::default();
        let mut p = patch();
        let plain = map_controls(Some(&left(0.0, 0.5)), None, &p, &range);
        p.octave_offset = 1;
        let up = map_controls(Some(&left(0.0, 0.5)), None, &p, &range);
        assert!((up.pitch_hz / plain.pitch_hz - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_reverb_ceiling_enforced() {
        let range = PitchRange::default();
        let t = map_controls(Some(&left(1.0, 0.5)), None, &patch(), &range);
        assert_eq!(t.reverb_mix, REVERB_CEILING);
    }

    #[test]
    fn test_reverb_scales_with_x() {
        let range = PitchRange::default();
        let t = map_controls(Some(&left(0.5, 0.5)), None, &patch(), &range);
        assert!((t.reverb_mix - 0.35).abs() < 1e-6);
    }

    #[test]
    fn test_absent_left_hand_uses_patch_reverb() {
        let range = PitchRange::default();
        let p = patch();
        let t = map_controls(None, None, &p, &range);
        assert_eq!(t.reverb_mix, p.reverb_mix);
    }

    #[test]
    fn test_absent_hands_give_neutral_midpoints() {
        let range = PitchRange::default();
        let p = patch();
        let t = map_controls(None, None, &p, &range);
        let mid = map_controls(Some(&left(0.5, 0.5)), None, &p, &range);
        assert!((t.pitch_hz - mid.pitch_hz).abs() < 0.01);
        // Neutral vibrato position 0.5.
        let expected_rate = p.lfo_min_freq_hz * (1.0 + 0.5 * p.lfo_max_rate_multiplier);
        assert!((t.lfo_rate_hz - expected_rate).abs() < 1e-5);
        assert!((t.lfo_depth_hz - 0.5 * p.lfo_max_depth_multiplier).abs() < 1e-5);
    }

    #[test]
    fn test_harmonic_activation_scenarios() {
        let range = PitchRange::default();
        let mut p = patch();
        p.harmonic_count = 4;

        // rightHand.y = 0.0 -> intensity 1 -> all four harmonics.
        let all = map_controls(None, Some(&HandSample::new(0.5, 0.0, false)), &p, &range);
        assert_eq!(all.active_harmonics, 4);

        // rightHand.y = 1.0 -> intensity 0 -> fundamental only.
        let one = map_controls(None, Some(&HandSample::new(0.5, 1.0, false)), &p, &range);
        assert_eq!(one.active_harmonics, 1);
    }

    #[test]
    fn test_active_harmonics_clamped_for_single_harmonic_patch() {
        let range = PitchRange::default();
        let mut p = patch();
        p.harmonic_count = 1;
        for y in [0.0, 0.5, 1.0] {
            let t = map_controls(None, Some(&HandSample::new(0.5, y, false)), &p, &range);
            assert_eq!(t.active_harmonics, 1);
        }
    }

    #[test]
    fn test_vibrato_increases_toward_screen_left() {
        let range = PitchRange::default();
        let p = patch();
        let lazy = map_controls(None, Some(&HandSample::new(1.0, 0.5, false)), &p, &range);
        let fast = map_controls(None, Some(&HandSample::new(0.0, 0.5, false)), &p, &range);
        assert!(fast.lfo_rate_hz > lazy.lfo_rate_hz);
        assert!(fast.lfo_depth_hz > lazy.lfo_depth_hz);
        assert_eq!(lazy.lfo_depth_hz, 0.0);
        assert!((lazy.lfo_rate_hz - p.lfo_min_freq_hz).abs() < 1e-5);
    }

    #[test]
    fn test_out_of_range_coordinates_clamped() {
        let range = PitchRange::default();
        let p = patch();
        let t = map_controls(
            Some(&left(1.5, -0.2)),
            Some(&HandSample::new(-1.0, 2.0, false)),
            &p,
            &range,
        );
        assert_eq!(t.reverb_mix, REVERB_CEILING);
        assert_eq!(t.active_harmonics, 1);
        assert!(t.pitch_hz.is_finite());
    }
}
