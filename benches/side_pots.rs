use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use pot_split::pots::{build_pots, settle, Boards, Contribution, WinnerSelection};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn random_table(players: usize, seed: u64) -> Vec<Contribution> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..players)
        .map(|i| {
            let cents: u32 = rng.random_range(1..=50_000);
            Contribution::new(format!("P{i}"), f64::from(cents) / 100.0)
        })
        .collect()
}

fn bench_build_pots(c: &mut Criterion) {
    let mut g = c.benchmark_group("build_pots");
    for players in [2usize, 9, 32] {
        let table = random_table(players, 7);
        g.bench_with_input(BenchmarkId::from_parameter(players), &table, |b, input| {
            b.iter(|| build_pots(black_box(input), black_box(2.5)))
        });
    }
    g.finish();
}

fn bench_settle(c: &mut Criterion) {
    let table = random_table(32, 11);
    let pots = build_pots(&table, 0.0);
    let mut selection = WinnerSelection::new();
    if let Some(top) = pots.first().and_then(|p| p.eligible.last()) {
        selection.mark(&pots, 0, 0, top, true);
        selection.mark(&pots, 0, 1, top, true);
    }
    c.bench_function("settle_two_boards_32", |b| {
        b.iter(|| settle(black_box(&table), 0.0, black_box(&selection), Boards::Two))
    });
}

criterion_group!(benches, bench_build_pots, bench_settle);
criterion_main!(benches);
