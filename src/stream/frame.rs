//! Wire frames exchanged with the acquisition device.
//!
//! All traffic is JSON text discriminated by a `type` field. The monitor
//! sends a single `connect` handshake after each successful open and
//! receives `stream` sample frames; anything else fails to parse and is
//! dropped by the connection handler.

use serde::{Deserialize, Serialize};

use crate::monitor::buffer::Sample;

/// One message on the stream socket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StreamFrame {
    /// Outbound handshake carrying the patient identifier.
    Connect {
        #[serde(rename = "patientID")]
        patient_id: String,
    },

    /// One inbound waveform sample. `hr` is present only when the device
    /// has a fresh beats-per-minute estimate for this tick.
    Stream {
        value: Sample,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hr: Option<u16>,
    },
}

impl StreamFrame {
    /// Handshake frame for the given patient.
    pub fn connect(patient_id: impl Into<String>) -> Self {
        StreamFrame::Connect {
            patient_id: patient_id.into(),
        }
    }

    /// Parse an inbound text message. Unknown `type` values and malformed
    /// payloads are errors; the caller discards them.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sample_frame_with_rate() {
        let frame = StreamFrame::parse(r#"{"type":"stream","value":600,"hr":72}"#).unwrap();
        assert_eq!(
            frame,
            StreamFrame::Stream {
                value: 600,
                hr: Some(72)
            }
        );
    }

    #[test]
    fn rate_field_is_optional() {
        let frame = StreamFrame::parse(r#"{"type":"stream","value":512}"#).unwrap();
        assert_eq!(
            frame,
            StreamFrame::Stream {
                value: 512,
                hr: None
            }
        );
    }

    #[test]
    fn unknown_type_is_rejected() {
        assert!(StreamFrame::parse(r#"{"type":"ping"}"#).is_err());
    }

    #[test]
    fn malformed_payload_is_rejected() {
        assert!(StreamFrame::parse("not json").is_err());
        assert!(StreamFrame::parse(r#"{"value":512}"#).is_err());
    }

    #[test]
    fn negative_amplitude_is_rejected() {
        assert!(StreamFrame::parse(r#"{"type":"stream","value":-1}"#).is_err());
    }

    #[test]
    fn handshake_serializes_to_device_format() {
        let json = StreamFrame::connect("PT001").to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "type": "connect", "patientID": "PT001" })
        );
    }

    #[test]
    fn sample_frame_omits_absent_rate() {
        let json = StreamFrame::Stream {
            value: 512,
            hr: None,
        }
        .to_json()
        .unwrap();
        assert!(!json.contains("hr"));
    }
}
