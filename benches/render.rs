use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cardioscope::monitor::SampleBuffer;
use cardioscope::render::render_frame;

fn bench_render(c: &mut Criterion) {
    let mut buffer = SampleBuffer::new();
    for i in 0..400u32 {
        let value = (2048.0 + 1500.0 * (i as f32 / 20.0).sin()) as u16;
        buffer.append(value);
    }
    let snapshot = buffer.snapshot();

    c.bench_function("render_full_window_1200x300", |b| {
        b.iter(|| render_frame(black_box(&snapshot), 1200, 300))
    });
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
