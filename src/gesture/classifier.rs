//! Fist classification.
//!
//! A deliberately cheap geometric heuristic, not a trained classifier:
//! a finger counts as curled when its tip sits closer to the wrist than
//! 0.9x its base-to-wrist distance, and three curled fingers make a fist.
//! False positives and negatives are expected; the event cooldown in
//! [`super::tracker`] absorbs the jitter.

use super::landmarks::{Landmark, FINGERS, LANDMARK_COUNT, WRIST};

/// Tip-to-wrist distance must fall below this fraction of the
/// base-to-wrist distance for a finger to count as curled.
const CURL_RATIO: f32 = 0.9;

/// Minimum curled fingers (of four) to declare a fist.
const CURLED_FINGERS_FOR_FIST: usize = 3;

/// Returns true when the landmark set reads as a closed fist.
///
/// Incomplete input (fewer than 21 points) is classified as "not a fist",
/// never an error: a dropped detection frame must not break the stream.
pub fn classify_fist(points: &[Landmark]) -> bool {
    if points.len() < LANDMARK_COUNT {
        return false;
    }

    let wrist = &points[WRIST];
    let curled = FINGERS
        .iter()
        .filter(|&&(base, tip)| {
            let base_dist = points[base].planar_distance(wrist);
            let tip_dist = points[tip].planar_distance(wrist);
            tip_dist < base_dist * CURL_RATIO
        })
        .count();

    curled >= CURLED_FINGERS_FOR_FIST
}
