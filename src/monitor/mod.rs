//! Live monitoring state: the bounded sample window and the heart-rate view.

pub mod buffer;
pub mod rate;

pub use buffer::{Sample, SampleBuffer, WaveformSnapshot, MAX_SAMPLES};
pub use rate::RhythmClass;
