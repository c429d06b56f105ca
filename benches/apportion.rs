use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use electoral_quotient::{ColombiaElection, ElectionContext, ElectionType, QuotaMethod};

fn field(size: usize) -> Vec<(String, u64)> {
    (0..size)
        .map(|i| (format!("List {}", i), 10_000 + (i as u64 * 7_919) % 250_000))
        .collect()
}

fn largest_remainder(c: &mut Criterion) {
    let mut group = c.benchmark_group("largest_remainder");

    for size in [10usize, 100, 1_000].iter().copied() {
        let entries = field(size);
        let total = entries.iter().map(|(_, v)| v).sum();
        let ctx = ElectionContext::new(total, 166).with_candidates(entries);

        for method in [QuotaMethod::Hare, QuotaMethod::Droop].iter().copied() {
            group.bench_with_input(BenchmarkId::new(method.as_str(), size), &ctx, |b, ctx| {
                b.iter(|| ctx.assign_seats(black_box(method)))
            });
        }
    }

    group.finish();
}

fn senate(c: &mut Criterion) {
    let entries = field(200);
    let total = entries.iter().map(|(_, v)| v).sum();
    let election = ColombiaElection::new(ElectionType::Senate, total, None)
        .expect("senate has a fixed seat count")
        .with_candidates(entries);

    c.bench_function("senate_with_threshold", |b| {
        b.iter(|| black_box(&election).assign_seats_regional())
    });
}

criterion_group!(benches, largest_remainder, senate);
criterion_main!(benches);
