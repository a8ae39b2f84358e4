use criterion::{BenchmarkId, criterion_group, criterion_main, Criterion};
use billiards::{BoxSizes, MultiplicityHistogram, StatsAggregator};

fn benchmark_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweep");
    group.sample_size(10);
    let aggregator = StatsAggregator::new();
    for max_side in [2, 3, 4] {
        group.bench_with_input(BenchmarkId::from_parameter(max_side), &max_side, |b, &n| {
            b.iter(|| aggregator.sweep(n).unwrap())
        });
    }
    group.finish();
}

fn benchmark_parallelism(c: &mut Criterion) {
    let sizes = BoxSizes::new([5, 6, 7]).unwrap();
    let aggregator = StatsAggregator::new();

    let mut group = c.benchmark_group("accumulate_5_6_7");
    group.sample_size(10);

    let max_cores = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(8);
    let mut cores_list = Vec::new();
    let mut cores = 1;
    while cores <= max_cores {
        cores_list.push(cores);
        cores *= 2;
    }
    if cores_list.last().map_or(false, |&last| last < max_cores) {
        cores_list.push(max_cores);
    }

    for &num_threads in &cores_list {
        // Create a thread pool for this specific number of threads
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .unwrap();

        group.bench_with_input(BenchmarkId::new("threads", num_threads), &num_threads, |b, &_n| {
            b.iter(|| {
                pool.install(|| {
                    let mut histogram = MultiplicityHistogram::new();
                    aggregator.accumulate(&sizes, &mut histogram).unwrap();
                    histogram
                })
            })
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_sweep, benchmark_parallelism);
criterion_main!(benches);
