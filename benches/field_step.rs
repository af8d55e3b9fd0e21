//! Particle field throughput benchmark.
//!
//! Measures the per-tick cost of the simulation step and of the full
//! update-plus-render pass (including the quadratic connection scan) at the
//! population cap.

use criterion::{criterion_group, criterion_main, Criterion};
use glam::Vec2;
use marquee::prelude::*;

fn capped_field() -> ParticleField {
    // 1920x1080 hits the 150-particle cap.
    ParticleField::new(Vec2::new(1920.0, 1080.0)).with_seed(7)
}

fn bench_update(c: &mut Criterion) {
    let mut field = capped_field();
    field.set_pointer(Vec2::new(960.0, 540.0));

    c.bench_function("field_update_150", |b| {
        b.iter(|| field.update());
    });
}

fn bench_update_render(c: &mut Criterion) {
    let mut field = capped_field();
    field.set_pointer(Vec2::new(960.0, 540.0));
    let mut surface = PixelSurface::new(1920, 1080);

    c.bench_function("field_update_render_150", |b| {
        b.iter(|| {
            field.update();
            field.render(&mut surface);
        });
    });
}

criterion_group!(benches, bench_update, bench_update_render);
criterion_main!(benches);
