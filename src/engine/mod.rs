//! The synthesis engine.
//!
//! Control side: [`SynthEngine`] (composition root) and the
//! [`ArpeggiatorClock`]. Audio side: [`SynthProcessor`] owning the
//! [`SynthesisGraph`] and [`EnvelopeController`]. The two sides talk only
//! through the lock-free [`channels`].

pub mod arpeggiator;
pub mod audio;
pub mod channels;
pub mod commands;
pub mod envelope;
pub mod graph;
pub mod processor;
pub mod synth_engine;

pub use arpeggiator::ArpeggiatorClock;
pub use audio::{AudioBackend, AudioError};
pub use channels::{AudioHandle, ControlHandle, EngineChannels};
pub use commands::{EngineCommand, EngineEvent};
pub use envelope::{EnvelopeController, EnvelopeStage};
pub use graph::{BuildState, SynthesisGraph, REFERENCE_GAIN};
pub use processor::SynthProcessor;
pub use synth_engine::SynthEngine;
