//! Read-only heart-rate view over a waveform snapshot.
//!
//! The device reports its estimate alongside the sample stream; until the
//! first estimate arrives the stored value is 0 and the indicator shows a
//! placeholder instead of a number.

use crate::monitor::buffer::WaveformSnapshot;

/// Placeholder shown before the device has produced any estimate.
pub const NO_READING: &str = "--";

/// The current estimate, or `None` while the initial unknown value has
/// never been overwritten.
pub fn current(snapshot: &WaveformSnapshot) -> Option<u16> {
    (snapshot.heart_rate > 0).then_some(snapshot.heart_rate)
}

/// Indicator text: the estimate in beats per minute, or the placeholder.
pub fn display(snapshot: &WaveformSnapshot) -> String {
    match current(snapshot) {
        Some(bpm) => bpm.to_string(),
        None => NO_READING.to_string(),
    }
}

/// Coarse rhythm classification of the current estimate.
pub fn rhythm(snapshot: &WaveformSnapshot) -> RhythmClass {
    RhythmClass::classify(snapshot.heart_rate)
}

/// Resting-rate classification bands used across the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RhythmClass {
    /// No estimate yet.
    Unknown,
    /// Below 60 bpm.
    Bradycardia,
    /// 60 to 100 bpm inclusive.
    Normal,
    /// Above 100 bpm.
    Tachycardia,
}

impl RhythmClass {
    pub fn classify(bpm: u16) -> Self {
        match bpm {
            0 => RhythmClass::Unknown,
            1..=59 => RhythmClass::Bradycardia,
            60..=100 => RhythmClass::Normal,
            _ => RhythmClass::Tachycardia,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RhythmClass::Unknown => "Unknown",
            RhythmClass::Bradycardia => "Bradycardia",
            RhythmClass::Normal => "Normal",
            RhythmClass::Tachycardia => "Tachycardia",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_with_rate(heart_rate: u16) -> WaveformSnapshot {
        WaveformSnapshot {
            samples: Vec::new(),
            heart_rate,
        }
    }

    #[test]
    fn sentinel_until_first_estimate() {
        let snapshot = snapshot_with_rate(0);
        assert_eq!(current(&snapshot), None);
        assert_eq!(display(&snapshot), NO_READING);
    }

    #[test]
    fn estimate_shown_once_present() {
        let snapshot = snapshot_with_rate(72);
        assert_eq!(current(&snapshot), Some(72));
        assert_eq!(display(&snapshot), "72");
    }

    #[test]
    fn classification_band_edges() {
        assert_eq!(RhythmClass::classify(0), RhythmClass::Unknown);
        assert_eq!(RhythmClass::classify(59), RhythmClass::Bradycardia);
        assert_eq!(RhythmClass::classify(60), RhythmClass::Normal);
        assert_eq!(RhythmClass::classify(100), RhythmClass::Normal);
        assert_eq!(RhythmClass::classify(101), RhythmClass::Tachycardia);
    }

    #[test]
    fn rhythm_reads_snapshot_estimate() {
        assert_eq!(rhythm(&snapshot_with_rate(48)), RhythmClass::Bradycardia);
        assert_eq!(rhythm(&snapshot_with_rate(0)), RhythmClass::Unknown);
    }
}
