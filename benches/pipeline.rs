/// Pipeline benchmarks
///
/// Measures counting, recounting and ranked filtering over synthetic
/// records with a bounded token alphabet.
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use subcombi::{calculate, Thresholds};

/// Seeded pseudo-random records, 1-6 tokens each
fn synthetic_records(n: usize, alphabet: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(42);

    (0..n)
        .map(|_| {
            let len = rng.gen_range(1..=6);
            let tokens: Vec<String> = (0..len)
                .map(|_| format!("A{}B", rng.gen_range(0..alphabet)))
                .collect();
            format!("({})", tokens.join(","))
        })
        .collect()
}

fn bench_calculate(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculate");
    let thresholds = Thresholds::default();

    for size in [1_000, 10_000, 100_000] {
        let records = synthetic_records(size, 40);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| calculate(black_box(records), &thresholds).unwrap());
        });
    }

    group.finish();
}

fn bench_alphabet_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("alphabet_size");
    let thresholds = Thresholds {
        token_min_freq: 0.0,
        ..Thresholds::default()
    };

    for alphabet in [8, 64, 512] {
        let records = synthetic_records(20_000, alphabet);
        group.bench_with_input(
            BenchmarkId::from_parameter(alphabet),
            &records,
            |b, records| {
                b.iter(|| calculate(black_box(records), &thresholds).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_calculate, bench_alphabet_size);
criterion_main!(benches);
