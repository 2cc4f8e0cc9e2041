//! demos/sim_device.rs
//!
//! Synthetic acquisition device: serves the streaming wire protocol on a
//! local port, waits for the monitor's handshake, then streams a looped
//! ECG-like waveform at 200 Hz with a heart-rate estimate once per second.
//!
//! Run alongside the live_monitor demo:
//!   cargo run --example sim_device

use anyhow::Result;
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::{interval, Duration};
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

const BIND_ADDR: &str = "127.0.0.1:3001";

/// 200 Hz sample clock.
const SAMPLE_PERIOD: Duration = Duration::from_millis(5);

/// Samples per synthetic beat (one beat per second at 200 Hz).
const BEAT_LEN: u64 = 200;

#[tokio::main]
async fn main() -> Result<()> {
    let listener = TcpListener::bind(BIND_ADDR).await?;
    println!("[SimDevice] Listening on ws://{}", BIND_ADDR);

    loop {
        let (stream, peer) = listener.accept().await?;
        println!("[SimDevice] Monitor connected: {}", peer);
        tokio::spawn(async move {
            if let Err(e) = serve_monitor(stream).await {
                eprintln!("[SimDevice] Session ended: {}", e);
            }
        });
    }
}

async fn serve_monitor(stream: TcpStream) -> Result<()> {
    let mut socket = accept_async(stream).await?;

    // Wait for the connect handshake before streaming.
    match socket.next().await {
        Some(Ok(Message::Text(text))) => println!("[SimDevice] Handshake: {}", text),
        other => {
            println!("[SimDevice] No handshake, dropping session: {:?}", other);
            return Ok(());
        }
    }

    let mut ticker = interval(SAMPLE_PERIOD);
    let mut tick: u64 = 0;
    loop {
        ticker.tick().await;
        let mut frame = serde_json::json!({ "type": "stream", "value": waveform_sample(tick) });
        if tick % BEAT_LEN == 0 {
            frame["hr"] = (70 + ((tick / BEAT_LEN) % 6)).into();
        }
        socket.send(Message::Text(frame.to_string())).await?;
        tick += 1;
    }
}

/// Crude PQRST-shaped beat centered in the ADC range.
fn waveform_sample(tick: u64) -> u16 {
    let phase = (tick % BEAT_LEN) as f32 / BEAT_LEN as f32;
    let p_wave = 150.0 * bump(phase, 0.25, 0.030);
    let q_dip = -350.0 * bump(phase, 0.41, 0.010);
    let r_spike = 1600.0 * bump(phase, 0.45, 0.012);
    let s_dip = -300.0 * bump(phase, 0.49, 0.010);
    let t_wave = 320.0 * bump(phase, 0.70, 0.050);
    let value = 2048.0 + p_wave + q_dip + r_spike + s_dip + t_wave;
    value.clamp(0.0, 4095.0) as u16
}

fn bump(x: f32, center: f32, width: f32) -> f32 {
    let d = (x - center) / width;
    (-0.5 * d * d).exp()
}
