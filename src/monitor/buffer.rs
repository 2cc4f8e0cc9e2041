//! Bounded in-memory store for the live waveform window.
//!
//! Holds the most recent samples pushed by the stream connection plus the
//! latest known heart-rate estimate. Older history is served by the records
//! service, not kept here: when the window is full the oldest sample is
//! evicted on each append.

use std::collections::VecDeque;

/// Fixed capacity of the visible window: 2 seconds at 200 Hz.
pub const MAX_SAMPLES: usize = 400;

/// Raw amplitude reading from the device ADC, nominal range 0..=4095.
pub type Sample = u16;

/// The waveform window plus the latest heart-rate estimate.
///
/// Written only by the stream connection's frame handler; everything else
/// reads through [`SampleBuffer::snapshot`].
#[derive(Debug, Clone, Default)]
pub struct SampleBuffer {
    samples: VecDeque<Sample>,
    last_heart_rate: u16,
}

impl SampleBuffer {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(MAX_SAMPLES),
            last_heart_rate: 0,
        }
    }

    /// Append one sample, evicting the oldest when the window is full.
    pub fn append(&mut self, value: Sample) {
        if self.samples.len() == MAX_SAMPLES {
            self.samples.pop_front();
        }
        self.samples.push_back(value);
    }

    /// Overwrite the heart-rate estimate with a fresh one. `None` means the
    /// device sent no estimate this tick and the previous value stands.
    pub fn set_heart_rate(&mut self, hr: Option<u16>) {
        if let Some(bpm) = hr {
            self.last_heart_rate = bpm;
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Clone out the current window and heart rate without mutating state.
    pub fn snapshot(&self) -> WaveformSnapshot {
        WaveformSnapshot {
            samples: self.samples.iter().copied().collect(),
            heart_rate: self.last_heart_rate,
        }
    }

    /// Drop all buffered samples and reset the heart rate to unknown.
    /// Called when the hosting view is torn down.
    pub fn clear(&mut self) {
        self.samples.clear();
        self.last_heart_rate = 0;
    }
}

/// Immutable read view over the buffer, consumed by the renderer and the
/// rate indicator. `heart_rate == 0` means no estimate has arrived yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WaveformSnapshot {
    pub samples: Vec<Sample>,
    pub heart_rate: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_arrival_order() {
        let mut buffer = SampleBuffer::new();
        for v in [512, 600, 48] {
            buffer.append(v);
        }
        assert_eq!(buffer.snapshot().samples, vec![512, 600, 48]);
    }

    #[test]
    fn window_never_exceeds_capacity() {
        let mut buffer = SampleBuffer::new();
        for v in 0..1000u16 {
            buffer.append(v);
            assert!(buffer.len() <= MAX_SAMPLES);
        }
    }

    #[test]
    fn fifo_eviction_keeps_last_window() {
        let mut buffer = SampleBuffer::new();
        for v in 0..500u16 {
            buffer.append(v);
        }
        let expected: Vec<Sample> = (100..500).collect();
        assert_eq!(buffer.len(), MAX_SAMPLES);
        assert_eq!(buffer.snapshot().samples, expected);
    }

    #[test]
    fn missing_heart_rate_leaves_previous_estimate() {
        let mut buffer = SampleBuffer::new();
        buffer.set_heart_rate(Some(72));
        buffer.set_heart_rate(None);
        assert_eq!(buffer.snapshot().heart_rate, 72);
    }

    #[test]
    fn present_heart_rate_always_overwrites() {
        let mut buffer = SampleBuffer::new();
        buffer.set_heart_rate(Some(72));
        buffer.set_heart_rate(Some(0));
        assert_eq!(buffer.snapshot().heart_rate, 0);
    }

    #[test]
    fn snapshot_does_not_mutate() {
        let mut buffer = SampleBuffer::new();
        buffer.append(1024);
        buffer.set_heart_rate(Some(65));
        let first = buffer.snapshot();
        let second = buffer.snapshot();
        assert_eq!(first, second);
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn clear_resets_window_and_rate() {
        let mut buffer = SampleBuffer::new();
        buffer.append(1024);
        buffer.set_heart_rate(Some(65));
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.snapshot(), WaveformSnapshot::default());
    }
}
