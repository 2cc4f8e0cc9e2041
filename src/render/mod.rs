//! Waveform rendering: snapshot plus surface dimensions in, drawn frame out.
//!
//! The renderer is a pure function of its inputs and keeps no state between
//! frames, so two observers rendering the same snapshot at the same
//! dimensions see identical pixels and the output is testable offline. The
//! host decides the cadence and calls [`WaveformRenderer::render`] itself;
//! there is no subscription machinery here.

use std::path::Path;

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_line_segment_mut;

use crate::monitor::buffer::{WaveformSnapshot, MAX_SAMPLES};

/// Reference grid spacing in pixels, both axes (ECG paper).
pub const GRID_SPACING: u32 = 20;

/// Full-scale amplitude of the device ADC.
const AMPLITUDE_FULL_SCALE: f32 = 4096.0;

/// Colors for one rendered frame. Defaults match the monitoring dashboard:
/// black surface, dark-green paper grid, green trace.
#[derive(Debug, Clone)]
pub struct TraceStyle {
    pub background: Rgba<u8>,
    pub grid: Rgba<u8>,
    pub trace: Rgba<u8>,
}

impl Default for TraceStyle {
    fn default() -> Self {
        Self {
            background: Rgba([0x00, 0x00, 0x00, 0xff]),
            grid: Rgba([0x1a, 0x3a, 0x1a, 0xff]),
            trace: Rgba([0x00, 0xff, 0x00, 0xff]),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("image encoding error: {0}")]
    Encode(#[from] image::ImageError),
}

/// Draws waveform frames with a fixed style.
#[derive(Debug, Clone, Default)]
pub struct WaveformRenderer {
    style: TraceStyle,
}

impl WaveformRenderer {
    pub fn new(style: TraceStyle) -> Self {
        Self { style }
    }

    /// Render one frame: clear to the background, draw the reference grid,
    /// then the sample polyline. An empty snapshot yields the grid-only
    /// no-signal frame. Never fails, including on zero-size surfaces.
    pub fn render(&self, snapshot: &WaveformSnapshot, width: u32, height: u32) -> RgbaImage {
        let mut frame = RgbaImage::from_pixel(width, height, self.style.background);
        self.draw_grid(&mut frame);
        self.draw_trace(&mut frame, snapshot);
        frame
    }

    fn draw_grid(&self, frame: &mut RgbaImage) {
        let (width, height) = frame.dimensions();
        if width == 0 || height == 0 {
            return;
        }
        let mut x = 0;
        while x < width {
            draw_line_segment_mut(
                frame,
                (x as f32, 0.0),
                (x as f32, (height - 1) as f32),
                self.style.grid,
            );
            x += GRID_SPACING;
        }
        let mut y = 0;
        while y < height {
            draw_line_segment_mut(
                frame,
                (0.0, y as f32),
                ((width - 1) as f32, y as f32),
                self.style.grid,
            );
            y += GRID_SPACING;
        }
    }

    fn draw_trace(&self, frame: &mut RgbaImage, snapshot: &WaveformSnapshot) {
        let (width, height) = frame.dimensions();
        if width == 0 || height == 0 || snapshot.samples.is_empty() {
            return;
        }

        // The x scale uses the fixed window capacity, not the occupied
        // length: a partially filled window draws a shorter trace from the
        // left edge instead of stretching. The y axis is inverted so higher
        // amplitude draws higher on the surface.
        let x_step = width as f32 / MAX_SAMPLES as f32;
        let y_scale = height as f32 / AMPLITUDE_FULL_SCALE;

        let points: Vec<(f32, f32)> = snapshot
            .samples
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                (
                    i as f32 * x_step,
                    height as f32 - f32::from(value) * y_scale,
                )
            })
            .collect();

        for pair in points.windows(2) {
            draw_line_segment_mut(frame, pair[0], pair[1], self.style.trace);
        }
    }
}

/// Render one frame with the default style.
pub fn render_frame(snapshot: &WaveformSnapshot, width: u32, height: u32) -> RgbaImage {
    WaveformRenderer::default().render(snapshot, width, height)
}

/// Encode a rendered frame as PNG bytes.
pub fn encode_png(frame: &RgbaImage) -> Result<Vec<u8>, RenderError> {
    let mut bytes = Vec::new();
    frame.write_to(
        &mut std::io::Cursor::new(&mut bytes),
        image::ImageOutputFormat::Png,
    )?;
    Ok(bytes)
}

/// Write a rendered frame to disk as PNG.
pub fn save_frame(frame: &RgbaImage, path: impl AsRef<Path>) -> Result<(), RenderError> {
    frame.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}
