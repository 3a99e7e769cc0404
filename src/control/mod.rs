//! Control-rate types: hand snapshots, pitch range, and the mapper that
//! turns them into synthesis parameter targets.

pub mod mapper;

pub use mapper::{map_controls, ControlTargets, REVERB_CEILING};

/// Frequency of C0 in Hz (MIDI note 12 lineage).
const C0_HZ: f32 = 16.3516;

/// Ratio for a pitch offset in (possibly fractional) semitones.
#[inline]
pub fn semitone_ratio(semitones: f32) -> f32 {
    2.0_f32.powf(semitones / 12.0)
}

/// The latest position/gesture snapshot for one hand.
///
/// Coordinates are normalized to [0, 1] and mirrored so that 0 is
/// screen-left / screen-top. One instance exists per physical hand per
/// frame; an absent hand is simply `None` at the call sites.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandSample {
    pub x: f32,
    pub y: f32,
    pub is_fist: bool,
}

impl HandSample {
    pub fn new(x: f32, y: f32, is_fist: bool) -> Self {
        Self { x, y, is_fist }
    }
}

/// The externally configured pitch display range, in octaves.
///
/// The vertical axis of the play area spans `(end - start + 1)` octaves,
/// bottom to top, anchored at the C of the start octave.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PitchRange {
    pub start_octave: i32,
    pub end_octave: i32,
}

impl PitchRange {
    pub fn new(start_octave: i32, end_octave: i32) -> Self {
        Self {
            start_octave,
            end_octave,
        }
    }

    /// Total semitones spanned by the display range.
    pub fn total_semitones(&self) -> f32 {
        ((self.end_octave - self.start_octave + 1) * 12) as f32
    }

    /// Frequency of the bottom of the range (C of the start octave).
    pub fn base_frequency_hz(&self) -> f32 {
        C0_HZ * 2.0_f32.powi(self.start_octave)
    }
}

impl Default for PitchRange {
    /// C2..C5, a comfortable three-octave playing field.
    fn default() -> Self {
        Self::new(2, 4)
    }
}
