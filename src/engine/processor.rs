//! Audio-thread processor.
//!
//! Owns the synthesis graph and the master envelope, making the audio
//! thread the single writer of every graph node. Each callback drains the
//! command queue (bounded, non-blocking) and renders the block; the
//! control side can only reach the graph through commands.

use super::channels::AudioHandle;
use super::commands::{EngineCommand, EngineEvent};
use super::envelope::EnvelopeController;
use super::graph::SynthesisGraph;
use crate::patch::PatchSettings;

/// Upper bound on commands drained per block, so a flooded queue cannot
/// starve rendering.
const MAX_COMMANDS_PER_BLOCK: usize = 64;

/// Frames between peak-level reports.
const PEAK_REPORT_FRAMES: usize = 4096;

/// Consumes engine commands and renders audio blocks.
pub struct SynthProcessor {
    graph: SynthesisGraph,
    envelope: EnvelopeController,
    handle: AudioHandle,
    /// Output channel count; the mono render is written to every channel.
    channels: usize,
    peak: f32,
    frames_since_report: usize,
}

impl SynthProcessor {
    pub fn new(
        sample_rate: f32,
        channels: usize,
        handle: AudioHandle,
        initial_patch: &PatchSettings,
    ) -> Self {
        let mut graph = SynthesisGraph::new(sample_rate);
        graph.rebuild(initial_patch);
        graph.retune(initial_patch);
        Self {
            graph,
            envelope: EnvelopeController::new(
                initial_patch.attack_secs,
                initial_patch.release_secs,
                sample_rate,
            ),
            handle,
            channels: channels.max(1),
            peak: 0.0,
            frames_since_report: 0,
        }
    }

    fn apply_command(&mut self, cmd: EngineCommand) {
        match cmd {
            EngineCommand::ApplyPatch(patch) => {
                if self.graph.needs_rebuild(&patch) {
                    self.graph.rebuild(&patch);
                }
                self.graph.retune(&patch);
                self.envelope.set_times(patch.attack_secs, patch.release_secs);
            }
            EngineCommand::SetControlTargets(targets) => {
                self.graph.apply_control_targets(&targets);
            }
            EngineCommand::SetPresence(present) => {
                self.envelope.set_presence(present);
            }
        }
    }

    /// Renders one interleaved output block.
    pub fn render(&mut self, output: &mut [f32]) {
        for _ in 0..MAX_COMMANDS_PER_BLOCK {
            match self.handle.try_recv_command() {
                Some(cmd) => self.apply_command(cmd),
                None => break,
            }
        }

        for frame in output.chunks_mut(self.channels) {
            let gain = self.envelope.next_sample();
            let sample = self.graph.process(gain);
            for out in frame.iter_mut() {
                *out = sample;
            }

            self.peak = self.peak.max(sample.abs());
            self.frames_since_report += 1;
            if self.frames_since_report >= PEAK_REPORT_FRAMES {
                self.handle.send_event_lossy(EngineEvent::PeakLevel(self.peak));
                self.peak = 0.0;
                self.frames_since_report = 0;
            }
        }
    }

    /// Stops everything before the audio resource goes away. Idempotent.
    pub fn tear_down(&mut self) {
        self.graph.tear_down();
    }
}
