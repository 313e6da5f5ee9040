//! Benchmarks for the CPU simulation tick.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;

use ecosystem::{Ecosystem, EcosystemConfig, Engine, LineBuffer, Projector};

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    for count in [50i64, 150, 400] {
        group.bench_with_input(BenchmarkId::new("ecosystem", count), &count, |b, &count| {
            let config = EcosystemConfig::new()
                .with_particle_count(count)
                .with_seed(42);
            let Ok(mut eco) = Ecosystem::initialize(config) else {
                return;
            };
            let pointer = Vec3::new(5.0, -3.0, 0.0);
            b.iter(|| {
                let frame = eco.tick(black_box(pointer));
                black_box(frame.map(|f| f.line_vertex_count).ok())
            })
        });
    }

    group.finish();
}

fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("stages");

    let config = EcosystemConfig::new().with_seed(42);
    let Ok(eco) = Ecosystem::initialize(config) else {
        return;
    };
    let particles = eco.particles().to_vec();

    group.bench_function("engine_step_150", |b| {
        let engine = Engine::default();
        let mut particles = particles.clone();
        let Some(mut lines) = LineBuffer::for_particles(particles.len()) else {
            return;
        };
        b.iter(|| {
            engine.step(black_box(Vec3::ZERO), &mut particles, &mut lines);
            black_box(lines.vertex_count())
        })
    });

    group.bench_function("project_150", |b| {
        let projector = Projector::default();
        let Some(mut lines) = LineBuffer::for_particles(particles.len()) else {
            return;
        };
        let mut visuals = Vec::with_capacity(particles.len());
        b.iter(|| {
            lines.begin();
            projector.project(black_box(&particles), &mut lines, &mut visuals);
            black_box(visuals.len())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_tick, bench_stages);
criterion_main!(benches);
