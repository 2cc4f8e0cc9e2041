//! Streaming connection to the acquisition device.
//!
//! The device pushes waveform samples over a WebSocket as JSON text
//! messages; this module owns the wire format, the connection state
//! machine, and the reconnect schedule.

pub mod connection;
pub mod frame;

pub use connection::{ConnectionState, LiveMonitor, StreamError, RETRY_DELAY};
pub use frame::StreamFrame;
