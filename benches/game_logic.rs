use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tetrion::core::scoring::get_drop_interval_ms;
use tetrion::core::{GameState, Grid};
use tetrion::sim::{choose_placement, run_sim, SimOptions};
use tetrion::types::{PieceKind, SpeedConfig};

fn bench_update(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();
    let mut now = 0u64;

    c.bench_function("update_16ms", |b| {
        b.iter(|| {
            now += 16;
            state.update(black_box(now));
            if state.game_over() {
                state.reset();
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut grid = Grid::default();
            for y in 16..20 {
                for x in 0..10 {
                    let _ = grid.set_cell(x, y, Some(PieceKind::I));
                }
            }
            let rows = grid.find_full_rows();
            grid.remove_rows(black_box(&rows))
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("hard_drop", |b| {
        b.iter(|| {
            if !state.hard_drop() {
                state.reset();
            }
        })
    });
}

fn bench_try_move(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("try_move", |b| {
        b.iter(|| {
            if !state.try_move(1, 0) {
                state.try_move(-1, 0);
            }
        })
    });
}

fn bench_try_rotate(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("try_rotate", |b| {
        b.iter(|| {
            state.try_rotate(1);
        })
    });
}

fn bench_drop_interval(c: &mut Criterion) {
    let speed = SpeedConfig::default();
    c.bench_function("drop_interval_levels_1_to_20", |b| {
        b.iter(|| (1..=20).map(|l| get_drop_interval_ms(black_box(l), &speed)).sum::<u32>())
    });
}

fn bench_autoplayer(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();
    c.bench_function("choose_placement", |b| b.iter(|| choose_placement(black_box(&state))));

    let opts = SimOptions {
        pieces: 50,
        ..SimOptions::default()
    };
    c.bench_function("sim_50_pieces", |b| b.iter(|| run_sim(black_box(&opts))));
}

criterion_group!(
    benches,
    bench_update,
    bench_line_clear,
    bench_hard_drop,
    bench_try_move,
    bench_try_rotate,
    bench_drop_interval,
    bench_autoplayer
);
criterion_main!(benches);
