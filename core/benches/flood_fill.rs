use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use sapper_core::*;
use std::hint::black_box;

/// Hard-sized board with all mines packed into the last column, so one reveal floods nearly
/// everything.
fn open_field() -> (Difficulty, FixedPlacer) {
    let difficulty = Difficulty::new(16, 30, 16).unwrap();
    let placer = FixedPlacer::new((0..16).map(|row| (row, 29)));
    (difficulty, placer)
}

fn bench_flood_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood_fill");

    group.bench_function("open_field", |b| {
        b.iter_batched(
            || {
                let (difficulty, placer) = open_field();
                Session::new(difficulty, placer)
            },
            |mut session| black_box(session.reveal_at(black_box((0, 0)))),
            BatchSize::SmallInput,
        )
    });

    for key in DifficultyKey::ALL {
        group.bench_function(format!("first_reveal_{key}"), |b| {
            let mut seed = 0;
            b.iter_batched(
                || {
                    seed += 1;
                    Session::with_seed(Difficulty::preset(key), seed)
                },
                |mut session| black_box(session.reveal_at(black_box((4, 4)))),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_flood_fill);
criterion_main!(benches);
