//! Criterion benchmarks for vocalign-batch: comparison tables and label tallies.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use vocalign_batch::{BatchConfig, LabelTally};
use vocalign_dtw::{Metric, Sequence, SolverMode};

fn make_frames(n: usize, dim: usize, offset: f64) -> Sequence {
    let data: Vec<f64> = (0..n * dim)
        .map(|i| (i as f64 * 0.1 + offset).sin() + 1.5)
        .collect();
    Sequence::from_flat(data, dim).unwrap()
}

fn make_candidates(count: usize) -> Vec<(String, Sequence)> {
    (0..count)
        .map(|i| (format!("spk{i:03}"), make_frames(80 + i % 40, 13, i as f64 * 0.05)))
        .collect()
}

fn bench_compare(c: &mut Criterion) {
    let reference = make_frames(100, 13, 0.0);
    let candidates = make_candidates(64);

    let mut group = c.benchmark_group("compare_64x100x13");
    for mode in [SolverMode::ExplicitPath, SolverMode::Aggregate] {
        for parallel in [false, true] {
            let cfg = BatchConfig::new(Metric::Cosine)
                .with_mode(mode)
                .with_parallel(parallel);
            let id = BenchmarkId::new(mode.as_str(), if parallel { "parallel" } else { "serial" });
            group.bench_function(id, |b| {
                b.iter(|| cfg.compare_to_reference(&reference, &candidates).unwrap());
            });
        }
    }
    group.finish();
}

fn bench_tally(c: &mut Criterion) {
    let phones: Vec<String> = (0..50_000).map(|i| format!("p{}", i % 61)).collect();
    c.bench_function("tally_50k_labels", |b| {
        b.iter(|| phones.iter().map(String::as_str).collect::<LabelTally>());
    });
}

criterion_group!(benches, bench_compare, bench_tally);
criterion_main!(benches);
