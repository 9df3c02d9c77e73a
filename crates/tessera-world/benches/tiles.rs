use std::hint::black_box;
use std::time::Duration;

use criterion::{Criterion, criterion_group, criterion_main};
use tessera_world::TerrainGenerator;

fn bench_cold_tiles(c: &mut Criterion) {
    let mut group = c.benchmark_group("cold_tiles");
    group.measurement_time(Duration::from_secs(8));
    let generator = TerrainGenerator::new(8_675_309, 1);
    group.bench_function("compute_uncached_8x8", |b| {
        b.iter(|| {
            for y in 0..8 {
                for x in 0..8 {
                    black_box(generator.compute_uncached(x, y));
                }
            }
        })
    });
    group.finish();
}

fn bench_cached_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("cached_lookup");
    let generator = TerrainGenerator::new(8_675_309, 4_096);
    generator.sample_region(0, 0, 32, 32);
    group.bench_function("hit_32x32", |b| {
        b.iter(|| {
            for y in 0..32 {
                for x in 0..32 {
                    black_box(generator.get_terrain_data(x, y));
                }
            }
        })
    });
    group.finish();
}

fn bench_region(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample_region");
    group.sample_size(10);
    group.bench_function("cold_64x32_parallel", |b| {
        b.iter(|| {
            let generator = TerrainGenerator::new(24_601, 4_096);
            black_box(generator.sample_region(-32, -16, 64, 32));
        })
    });
    group.finish();
}

criterion_group!(benches, bench_cold_tiles, bench_cached_lookup, bench_region);
criterion_main!(benches);
