//! The synth engine composition root.
//!
//! Control-side owner of the whole instrument: it holds the audio backend,
//! the command channel into the audio thread, the latest hand snapshots,
//! the arpeggiator clock, and the active patch. The audio thread owns the
//! synthesis graph itself, so the single-writer rule on graph nodes is
//! enforced by construction; the only way to mutate them is through this
//! engine's command channel.
//!
//! Three producers feed the instrument at their own rates. The inference
//! callback and the render layer both land here: `update` snapshots hand
//! positions each animation tick, and the audio clock consumes smoothed
//! targets on its own schedule. Nothing blocks; a dropped tick is
//! re-derived from the next snapshot.

use std::time::Instant;

use tracing::{info, warn};

use crate::control::{map_controls, semitone_ratio, HandSample, PitchRange};
use crate::patch::{PatchData, PatchError, PatchSettings};

use super::arpeggiator::ArpeggiatorClock;
use super::audio::{AudioBackend, AudioError};
use super::channels::{ControlHandle, EngineChannels};
use super::commands::{EngineCommand, EngineEvent};
use super::processor::SynthProcessor;

/// The gesture-controlled synthesizer engine.
pub struct SynthEngine {
    backend: AudioBackend,
    control: ControlHandle,
    patch: PatchSettings,
    pitch_range: PitchRange,
    arpeggiator: ArpeggiatorClock,
    left: Option<HandSample>,
    right: Option<HandSample>,
    hands_present: bool,
    /// Monotonic time base for all control-side timestamps.
    epoch: Instant,
}

impl SynthEngine {
    /// Acquires audio output and starts the engine with the given patch.
    ///
    /// Failure to acquire an output device or start the stream is fatal
    /// and surfaced to the caller; there is no silent no-audio mode.
    pub fn start(patch: PatchSettings, pitch_range: PitchRange) -> Result<Self, AudioError> {
        let mut backend = AudioBackend::new()?;
        let (control, audio) = EngineChannels::with_defaults().split();

        let processor = SynthProcessor::new(
            backend.sample_rate(),
            backend.channels(),
            audio,
            &patch,
        );
        backend.start(processor)?;

        info!(patch = %patch.name, "synth engine started");

        Ok(Self {
            backend,
            control,
            arpeggiator: ArpeggiatorClock::new(patch.arpeggiator.clone()),
            patch,
            pitch_range,
            left: None,
            right: None,
            hands_present: false,
            epoch: Instant::now(),
        })
    }

    /// Milliseconds since engine start, monotonic.
    pub fn now_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }

    /// The active patch.
    pub fn patch(&self) -> &PatchSettings {
        &self.patch
    }

    /// Resolves and applies a patch from the external preset system.
    ///
    /// Invalid patches are rejected and the previous patch stays active;
    /// all other fields fall back to engine defaults during resolution.
    pub fn apply_patch(&mut self, data: &PatchData) -> Result<(), PatchError> {
        let patch = data.resolve()?;
        self.apply_settings(patch);
        Ok(())
    }

    /// Applies an already resolved patch.
    pub fn apply_settings(&mut self, patch: PatchSettings) {
        if let Some(patch) = commit_patch(&mut self.control, &mut self.arpeggiator, patch) {
            self.patch = patch;
        }
    }

    /// One animation tick: snapshot the latest hand samples, map them to
    /// parameter targets, fold in the arpeggiator, and hand the result to
    /// the audio thread. Lossy by design; skipped or dropped ticks cost
    /// nothing because every tick re-derives from the snapshots.
    pub fn update(&mut self, left: Option<HandSample>, right: Option<HandSample>) {
        self.left = left;
        self.right = right;

        let mut targets = map_controls(
            self.left.as_ref(),
            self.right.as_ref(),
            &self.patch,
            &self.pitch_range,
        );

        if self.arpeggiator.is_active() {
            let offset = self.arpeggiator.advance(self.now_ms());
            targets.pitch_hz *= semitone_ratio(offset as f32);
        }

        self.control
            .send_command_lossy(EngineCommand::SetControlTargets(targets));
    }

    /// Reports whether any hands are in view; drives the master envelope.
    /// Called by the render layer when the aggregate hand count crosses
    /// zero. Redundant calls are cheap no-ops end to end.
    pub fn set_hands_present(&mut self, present: bool) {
        if present == self.hands_present {
            return;
        }
        self.hands_present = present;
        self.control
            .send_command_lossy(EngineCommand::SetPresence(present));
    }

    /// Starts or stops the arpeggiator (right-hand fist state).
    pub fn set_arpeggiator_active(&mut self, active: bool) {
        let now = self.now_ms();
        self.arpeggiator.set_active(active, now);
    }

    /// Drains observability events from the audio thread.
    pub fn poll_events(&mut self) -> Vec<EngineEvent> {
        self.control.drain_events().collect()
    }

    /// Stops the audio stream and tears down the processor. Idempotent;
    /// also invoked on drop.
    pub fn shutdown(&mut self) {
        if self.backend.is_running() {
            info!("synth engine shutting down");
        }
        self.backend.stop();
    }
}

impl Drop for SynthEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Hands a resolved patch to the audio thread and, only once the command
/// is queued, brings the control-side arpeggiator in line with it.
/// Returns the patch to commit as active, or `None` when the queue was
/// full, in which case no control-side state changed either and the old
/// patch stays active on both sides.
fn commit_patch(
    control: &mut ControlHandle,
    arpeggiator: &mut ArpeggiatorClock,
    patch: PatchSettings,
) -> Option<PatchSettings> {
    if control
        .send_command(EngineCommand::ApplyPatch(Box::new(patch.clone())))
        .is_err()
    {
        warn!(patch = %patch.name, "command queue full, patch not applied");
        return None;
    }
    arpeggiator.set_pattern(patch.arpeggiator.clone());
    info!(patch = %patch.name, "patch applied");
    Some(patch)
}
