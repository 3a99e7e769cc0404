//! Gesture Synth demo.
//!
//! Drives the engine with a scripted hand performance: the left hand
//! sweeps pitch and reverb, the right hand opens up harmonics and
//! vibrato, and a synthetic fist gesture toggles the arpeggiator
//! partway through. Hand-tracking hardware stays out of scope; the
//! landmark sets here are generated, then run through the same
//! classifier and tracker a live inference feed would use.

use std::time::Duration;

use gesture_synth::engine::{EngineEvent, SynthEngine};
use gesture_synth::gesture::{
    classify_fist, FistTracker, Handedness, Landmark, FINGERS, LANDMARK_COUNT, WRIST,
};
use gesture_synth::{HandSample, PatchData, PitchRange};

/// Control tick cadence, matching a browser animation loop.
const TICK: Duration = Duration::from_millis(16);

/// Total scripted performance length.
const PERFORMANCE_TICKS: u32 = 600;

fn main() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(err) = run() {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let patch = PatchData {
        name: Some("Demo Bells".to_string()),
        waveform: Some("sine".to_string()),
        harmonic_count: Some(8),
        arpeggiator: Some(gesture_synth::ArpeggiatorPattern {
            interval_ms: 180.0,
            steps: vec![0, 4, 7, 12],
        }),
        ..Default::default()
    }
    .resolve()?;

    let mut engine = SynthEngine::start(patch, PitchRange::default())?;
    let mut right_fist = FistTracker::new();
    let mut arp_active = false;

    engine.set_hands_present(true);

    for tick in 0..PERFORMANCE_TICKS {
        let t = tick as f32 / PERFORMANCE_TICKS as f32;

        // One inference frame: labeled landmark sets, as the hand tracker
        // delivers them. The left hand arcs through pitch and reverb; the
        // right closes into a fist mid-performance, then opens.
        let fist_now = (0.45..0.55).contains(&t);
        let frame = [
            (
                Handedness::Left,
                synthetic_hand(
                    0.2 + 0.5 * t,
                    0.7 - 0.5 * (t * std::f32::consts::PI).sin(),
                    false,
                ),
            ),
            (
                Handedness::Right,
                synthetic_hand(0.7, 0.6 - 0.4 * t, fist_now),
            ),
        ];

        let mut left = None;
        let mut right = None;
        for (handedness, landmarks) in &frame {
            let wrist = landmarks[WRIST];
            let sample = HandSample::new(wrist.x, wrist.y, classify_fist(landmarks));
            match handedness {
                Handedness::Left => left = Some(sample),
                Handedness::Right => right = Some(sample),
            }
        }

        // Fist-opened event toggles the arpeggiator, just as the UI layer
        // would wire it.
        let right_is_fist = right.is_some_and(|hand| hand.is_fist);
        if right_fist.update(right_is_fist, engine.now_ms()) {
            arp_active = !arp_active;
            engine.set_arpeggiator_active(arp_active);
            tracing::info!(active = arp_active, "arpeggiator toggled");
        }

        engine.update(left, right);

        for event in engine.poll_events() {
            let EngineEvent::PeakLevel(peak) = event;
            tracing::debug!(peak, "output level");
        }

        std::thread::sleep(TICK);
    }

    // Hands leave: release ramp, then let the reverb tail breathe.
    engine.set_hands_present(false);
    std::thread::sleep(Duration::from_millis(800));
    engine.shutdown();
    Ok(())
}

/// Builds a 21-point landmark set for a hand at (x, y), either open or
/// closed.
fn synthetic_hand(x: f32, y: f32, fist: bool) -> Vec<Landmark> {
    let mut points = vec![Landmark::new(x, y, 0.0); LANDMARK_COUNT];
    points[WRIST] = Landmark::new(x, y, 0.0);
    let tip_dist = if fist { 0.05 } else { 0.22 };
    for (base, tip) in FINGERS {
        points[base] = Landmark::new(x + 0.12, y, 0.0);
        points[tip] = Landmark::new(x + tip_dist, y, 0.0);
    }
    points
}
