// Cardioscope - Live ECG Waveform Monitoring Core

pub mod config;
pub mod monitor;
pub mod render;
pub mod stream;
