use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tilefall::core::{align, generate_initial_board, remove_matches, Config, GameState, StepKind, TileFactory};
use tilefall::types::FallFrom;

fn settled(config: Config, seed: u32) -> GameState {
    let mut state = GameState::new(config, seed);
    while state.advance().unwrap() != StepKind::WaitForInput {}
    state
}

fn bench_advance_idle(c: &mut Criterion) {
    let mut state = settled(Config::default(), 12345);

    c.bench_function("advance_idle_8x8", |b| {
        b.iter(|| {
            black_box(state.advance().unwrap());
        })
    });
}

fn bench_settle_from_empty(c: &mut Criterion) {
    c.bench_function("settle_8x8", |b| {
        b.iter(|| settled(black_box(Config::default()), 42))
    });
}

fn bench_remove_matches(c: &mut Criterion) {
    let mut factory = TileFactory::new(7);
    let board = generate_initial_board(16, 3, &mut factory);

    c.bench_function("remove_matches_16x16", |b| {
        b.iter(|| remove_matches(black_box(&board), 3).unwrap())
    });
}

fn bench_align(c: &mut Criterion) {
    let mut factory = TileFactory::new(7);
    let board = generate_initial_board(16, 3, &mut factory);

    c.bench_function("align_right_16x16", |b| {
        b.iter(|| align(black_box(&board), FallFrom::Right))
    });
}

fn bench_resize(c: &mut Criterion) {
    let state = settled(Config::default(), 99);

    c.bench_function("grow_8_to_12", |b| {
        b.iter(|| {
            let mut next = state.clone();
            next.apply_config(Config::default().with_grid_size(12));
            black_box(next)
        })
    });
}

criterion_group!(
    benches,
    bench_advance_idle,
    bench_settle_from_empty,
    bench_remove_matches,
    bench_align,
    bench_resize
);
criterion_main!(benches);
