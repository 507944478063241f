//! Benchmarks for the per-access paths.
//!
//! Run with: cargo bench -p climber --bench climber

use cache_core::FrequencySketch;
use climber::{AdaptiveWindowTinyLfu, MiniSimClimber};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use trace::{SyntheticTrace, TraceSource};
use wtinylfu::WindowTinyLfu;

const EVENTS: u64 = 1 << 16;

fn zipf_keys() -> Vec<u64> {
    SyntheticTrace::zipfian(100_000, 0.99, EVENTS)
        .map(|trace| trace.keys().collect())
        .unwrap_or_default()
}

/// Benchmark sketch increment and lookup.
fn bench_sketch(c: &mut Criterion) {
    let mut group = c.benchmark_group("sketch");
    let keys = zipf_keys();

    group.throughput(Throughput::Elements(1));
    group.bench_function("increment", |b| {
        let mut sketch = FrequencySketch::with_capacity(10_000);
        let mut idx = 0usize;
        b.iter(|| {
            sketch.increment(black_box(keys[idx]));
            idx = (idx + 1) % keys.len();
        });
    });
    group.bench_function("frequency", |b| {
        let mut sketch = FrequencySketch::with_capacity(10_000);
        for key in &keys {
            sketch.increment(*key);
        }
        let mut idx = 0usize;
        b.iter(|| {
            black_box(sketch.frequency(black_box(keys[idx])));
            idx = (idx + 1) % keys.len();
        });
    });

    group.finish();
}

/// Benchmark recording an access into the climber, sampled or not.
fn bench_record_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("climber/record_access");
    let keys = zipf_keys();

    for cache_size in [1_000u32, 100_000, 1_000_000] {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(
            BenchmarkId::from_parameter(cache_size),
            &cache_size,
            |b, &cache_size| {
                let Ok(mut climber) = MiniSimClimber::new(cache_size, 0.99, 0.8, u32::MAX) else {
                    return;
                };
                let mut idx = 0usize;
                b.iter(|| {
                    climber.record_access(black_box(keys[idx]));
                    idx = (idx + 1) % keys.len();
                });
            },
        );
    }

    group.finish();
}

/// Benchmark the full adaptive cache, decision rounds included.
fn bench_adaptive(c: &mut Criterion) {
    let mut group = c.benchmark_group("adaptive/record");
    let keys = zipf_keys();

    for cache_size in [1_000u32, 10_000] {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(
            BenchmarkId::from_parameter(cache_size),
            &cache_size,
            |b, &cache_size| {
                let (Ok(policy), Ok(climber)) = (
                    WindowTinyLfu::new(cache_size, 0.99, 0.8),
                    MiniSimClimber::new(cache_size, 0.99, 0.8, 10 * cache_size),
                ) else {
                    return;
                };
                let mut cache = AdaptiveWindowTinyLfu::new(policy, climber);
                let mut idx = 0usize;
                b.iter(|| {
                    black_box(cache.record(black_box(keys[idx])));
                    idx = (idx + 1) % keys.len();
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_sketch, bench_record_access, bench_adaptive);
criterion_main!(benches);
