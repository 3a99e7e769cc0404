//! Gesture Synth
//!
//! A gesture-controlled additive synthesizer engine. Continuous hand
//! positions and discrete fist gestures drive an oscillator bank with a
//! master envelope, lowpass filter, vibrato LFO, reverb send, and an
//! arpeggiator clock, with every parameter write smoothed so the three
//! independent clocks involved (audio hardware, ~60 Hz control tick,
//! variable-rate hand inference) never produce audible steps.

pub mod control;
pub mod dsp;
pub mod engine;
pub mod gesture;
pub mod patch;

pub use control::{map_controls, ControlTargets, HandSample, PitchRange};
pub use engine::{AudioError, EngineEvent, SynthEngine};
pub use patch::{ArpeggiatorPattern, PatchData, PatchError, PatchSettings};
