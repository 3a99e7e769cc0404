//! Hand landmark types and skeletal indices.
//!
//! The inference library delivers 21 3-D points per detected hand in a
//! fixed skeletal order (wrist first, then four points per digit). This
//! module pins down that convention so the classifier can index into it.

/// Number of landmarks per hand.
pub const LANDMARK_COUNT: usize = 21;

/// Index of the wrist landmark.
pub const WRIST: usize = 0;

/// (base, tip) landmark index pairs for the four non-thumb fingers, in
/// index/middle/ring/pinky order. The thumb is excluded from fist
/// detection; its curl estimate is too noisy to help.
pub const FINGERS: [(usize, usize); 4] = [(5, 8), (9, 12), (13, 16), (17, 20)];

/// One 3-D hand landmark in normalized image coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Planar (x/y) distance to another landmark. Depth is ignored
    /// throughout gesture classification; the z estimate is much noisier
    /// than the image-plane coordinates.
    #[inline]
    pub fn planar_distance(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Which physical hand a landmark set belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
}
