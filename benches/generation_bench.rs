//! Criterion benchmarks for the generation pipeline

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use cosmogen::nebula::generate_nebulas;
use cosmogen::starfield::{generate_stars, SHELL_MAX_RADIUS};
use cosmogen::system::{generate_system, generate_systems};
use cosmogen::warp::generate_warp_lanes;

fn bench_star_field(c: &mut Criterion) {
    let mut group = c.benchmark_group("star_field");
    for count in [100usize, 1_000, 5_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| generate_stars(12345, count));
        });
    }
    group.finish();
}

fn bench_single_system(c: &mut Criterion) {
    let stars = generate_stars(12345, 16);
    let star = stars
        .iter()
        .find(|s| s.planet_count_hint >= 5)
        .unwrap_or(&stars[0]);
    c.bench_function("single_system", |b| {
        b.iter(|| generate_system(star, 12345).unwrap());
    });
}

fn bench_bulk_systems(c: &mut Criterion) {
    let stars = generate_stars(12345, 500);
    c.bench_function("bulk_systems_500", |b| {
        b.iter(|| generate_systems(&stars, 12345).unwrap());
    });
}

fn bench_nebulas_with_density_map(c: &mut Criterion) {
    let stars = generate_stars(12345, 2_000);
    c.bench_function("nebulas_density_biased", |b| {
        b.iter(|| generate_nebulas(12345, 50, Some(&stars)).unwrap());
    });
}

fn bench_warp_lanes(c: &mut Criterion) {
    let stars = generate_stars(12345, 1_000);
    c.bench_function("warp_lanes_6_of_1000", |b| {
        b.iter(|| generate_warp_lanes(&stars, SHELL_MAX_RADIUS, 6).unwrap());
    });
}

criterion_group!(
    benches,
    bench_star_field,
    bench_single_system,
    bench_bulk_systems,
    bench_nebulas_with_density_map,
    bench_warp_lanes
);
criterion_main!(benches);
