//! Criterion benches for mesh construction and structural validation.
//!
//! Inputs are cylinders with a growing segment count, so face and edge
//! counts scale linearly.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ginsu::api::*;

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");
    for segments in [8usize, 32, 128] {
        let solid = Solid::truncated_cone(&int(1), &int(2), segments).unwrap();
        group.throughput(Throughput::Elements(solid.edge_count() as u64));
        group.bench_with_input(BenchmarkId::new("cone", segments), &solid, |b, s| {
            b.iter(|| s.validate().unwrap())
        });
        let polys = solid.face_polygons();
        group.bench_with_input(BenchmarkId::new("from_polygons", segments), &polys, |b, p| {
            b.iter(|| Solid::from_polygons(p).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_validate);
criterion_main!(benches);
