//! Gesture recognition.
//!
//! Pure classification of raw hand landmarks into discrete gesture flags,
//! plus the per-hand transition tracking that turns flickery per-frame
//! flags into stable events.

pub mod classifier;
pub mod landmarks;
pub mod tracker;

pub use classifier::classify_fist;
pub use landmarks::{Handedness, Landmark, FINGERS, LANDMARK_COUNT, WRIST};
pub use tracker::{FistTracker, DEFAULT_COOLDOWN_MS};
