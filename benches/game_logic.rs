use criterion::{black_box, criterion_group, criterion_main, Criterion};
use match_three::core::{Level, LevelDefinition, SimpleRng};
use match_three::engine::{Greedy, Policy};

fn shuffled_level(seed: u32) -> Level {
    let def = LevelDefinition::full(9, 9, 1000, 20).unwrap();
    let mut level = Level::new(&def, SimpleRng::new(seed));
    level.shuffle().unwrap();
    level
}

fn bench_shuffle(c: &mut Criterion) {
    let mut level = shuffled_level(12345);

    c.bench_function("shuffle_9x9", |b| {
        b.iter(|| {
            black_box(level.shuffle().unwrap());
        })
    });
}

fn bench_detect_possible_swaps(c: &mut Criterion) {
    let mut level = shuffled_level(12345);

    c.bench_function("detect_possible_swaps", |b| {
        b.iter(|| {
            black_box(level.detect_possible_swaps());
        })
    });
}

fn bench_detect_matches(c: &mut Criterion) {
    let level = shuffled_level(12345);

    c.bench_function("detect_matches", |b| {
        b.iter(|| {
            black_box(level.detect_horizontal_matches());
            black_box(level.detect_vertical_matches());
        })
    });
}

fn bench_play_and_resolve(c: &mut Criterion) {
    let level = shuffled_level(12345);
    let swap = level.first_possible_swap().unwrap();

    c.bench_function("play_and_resolve", |b| {
        b.iter(|| {
            let mut trial = level.clone();
            trial.perform_swap(&swap);
            black_box(trial.resolve_matches().unwrap());
        })
    });
}

fn bench_greedy_choose(c: &mut Criterion) {
    let level = shuffled_level(12345);
    let mut policy = Greedy;

    c.bench_function("greedy_choose", |b| {
        b.iter(|| {
            black_box(policy.choose(&level));
        })
    });
}

criterion_group!(
    benches,
    bench_shuffle,
    bench_detect_possible_swaps,
    bench_detect_matches,
    bench_play_and_resolve,
    bench_greedy_choose
);
criterion_main!(benches);
