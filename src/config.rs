//! Startup configuration for the live monitor.
//!
//! Both values are read once when the subsystem starts and can be
//! overridden via the environment.

use std::env;

/// Default streaming endpoint: the acquisition bridge on the ward network.
pub const DEFAULT_ENDPOINT: &str = "ws://192.168.1.6:3001/ws";

/// Default patient identifier sent in the handshake.
pub const DEFAULT_PATIENT_ID: &str = "PT001";

/// Environment override for the streaming endpoint URL.
pub const ENDPOINT_ENV: &str = "CARDIOSCOPE_WS_URL";

/// Environment override for the patient identifier.
pub const PATIENT_ID_ENV: &str = "CARDIOSCOPE_PATIENT_ID";

/// Configuration surface of the live waveform subsystem.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// WebSocket URL of the streaming endpoint.
    pub endpoint: String,

    /// Patient identifier carried by the handshake frame.
    pub patient_id: String,
}

impl MonitorConfig {
    /// Create a configuration with explicit values.
    pub fn new(endpoint: impl Into<String>, patient_id: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            patient_id: patient_id.into(),
        }
    }

    /// Read the configuration from the environment, falling back to the
    /// documented defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            endpoint: env::var(ENDPOINT_ENV).unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            patient_id: env::var(PATIENT_ID_ENV).unwrap_or_else(|_| DEFAULT_PATIENT_ID.to_string()),
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_PATIENT_ID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_documented_endpoint() {
        let config = MonitorConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.patient_id, DEFAULT_PATIENT_ID);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = MonitorConfig::new("ws://127.0.0.1:9000", "PT042");
        assert_eq!(config.endpoint, "ws://127.0.0.1:9000");
        assert_eq!(config.patient_id, "PT042");
    }
}
