//! demos/live_monitor.rs
//!
//! Connects to a streaming device (see sim_device), prints the Live/Offline
//! indicator line with the current heart rate, and saves a rendered
//! waveform frame every two seconds.
//!
//! Point it at a device with the environment overrides, e.g.:
//!   CARDIOSCOPE_WS_URL=ws://127.0.0.1:3001 cargo run --example live_monitor

use anyhow::Result;
use tokio::time::{sleep, Duration};

use cardioscope::config::MonitorConfig;
use cardioscope::monitor::rate;
use cardioscope::render::{render_frame, save_frame};
use cardioscope::stream::LiveMonitor;

const FRAME_WIDTH: u32 = 1200;
const FRAME_HEIGHT: u32 = 300;

#[tokio::main]
async fn main() -> Result<()> {
    let config = MonitorConfig::from_env();
    println!(
        "[Monitor] Watching patient {} via {}",
        config.patient_id, config.endpoint
    );
    let mut monitor = LiveMonitor::connect(config);

    for frame_no in 0..10 {
        sleep(Duration::from_secs(2)).await;

        let snapshot = monitor.snapshot();
        let status = if monitor.is_live() { "Live" } else { "Offline" };
        println!(
            "[Monitor] {} | {} BPM ({}) | {} samples buffered",
            status,
            rate::display(&snapshot),
            rate::rhythm(&snapshot).label(),
            snapshot.samples.len(),
        );

        let frame = render_frame(&snapshot, FRAME_WIDTH, FRAME_HEIGHT);
        let path = format!("waveform_{:02}.png", frame_no);
        save_frame(&frame, &path)?;
        println!("[Monitor] Saved {}", path);
    }

    monitor.teardown().await;
    Ok(())
}
