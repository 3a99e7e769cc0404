//! DSP building blocks.
//!
//! Sample-level primitives used by the synthesis graph: parameter
//! smoothing, waveform generation, the shared filter, the vibrato LFO,
//! and the reverb send.

pub mod filter;
pub mod lfo;
pub mod reverb;
pub mod smoothed_value;
pub mod waveform;

pub use filter::SvfFilter;
pub use lfo::Vibrato;
pub use reverb::ReverbSend;
pub use smoothed_value::SmoothedValue;
pub use waveform::Waveform;
