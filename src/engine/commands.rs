//! Engine commands and events.
//!
//! The messages that flow between the control thread and the audio
//! thread. Commands carry "last value wins" state: a dropped
//! `SetControlTargets` is re-derived on the next tick, so losing one to a
//! full queue is harmless. All types here must be Send + 'static.

use crate::control::ControlTargets;
use crate::patch::PatchSettings;

/// Commands sent from the control side to the audio-thread processor.
#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// Swap in a fully resolved patch. The processor decides rebuild vs
    /// retune by comparing topology with the built graph.
    ApplyPatch(Box<PatchSettings>),

    /// Latest gesture-derived parameter targets for this control tick.
    SetControlTargets(ControlTargets),

    /// Aggregate hand presence changed; drives the master envelope.
    SetPresence(bool),
}

/// Events sent back from the audio thread for observability. Strictly
/// lossy: the audio side never blocks on a full event queue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineEvent {
    /// Peak absolute output level over the last reporting window.
    PeakLevel(f32),
}
