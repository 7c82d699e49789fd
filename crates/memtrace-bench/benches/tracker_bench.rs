//! Tracker benchmarks.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use memtrace_core::{SlabBacking, Tracker};

fn bench_alloc_release_cycle(c: &mut Criterion) {
    let sizes: &[usize] = &[16, 64, 256, 1024, 4096, 32768];
    let mut group = c.benchmark_group("alloc_release_cycle");

    for &size in sizes {
        group.bench_with_input(BenchmarkId::new("tracked", size), &size, |b, &sz| {
            let mut tracker = Tracker::new(SlabBacking::new());
            b.iter(|| {
                let addr = tracker.allocate(sz).unwrap();
                tracker.release(criterion::black_box(addr)).unwrap();
            });
        });
    }
    group.finish();
}

fn bench_alloc_burst(c: &mut Criterion) {
    let mut group = c.benchmark_group("alloc_burst");

    group.bench_function("1000x64B", |b| {
        b.iter(|| {
            let mut tracker = Tracker::new(SlabBacking::new());
            for _ in 0..1000 {
                criterion::black_box(tracker.allocate(64).unwrap());
            }
            tracker.teardown();
        });
    });

    group.finish();
}

fn bench_release_under_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("release_under_load");

    // Release cost must stay O(1) with many outstanding allocations; this
    // exercises hash lookup through several registry growths.
    group.bench_function("10k_outstanding", |b| {
        b.iter_batched(
            || {
                let mut tracker = Tracker::new(SlabBacking::new());
                let addrs: Vec<_> = (0..10_000).map(|_| tracker.allocate(64).unwrap()).collect();
                (tracker, addrs)
            },
            |(mut tracker, addrs)| {
                for addr in addrs {
                    tracker.release(addr).unwrap();
                }
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_alloc_release_cycle,
    bench_alloc_burst,
    bench_release_under_load
);
criterion_main!(benches);
