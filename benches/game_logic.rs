use criterion::{black_box, criterion_group, criterion_main, Criterion};
use quintris::core::clearing::{apply_clear, scan_full_lines};
use quintris::core::{Game, GamePiece, Grid, PieceSpawner};

fn bench_place_and_clear(c: &mut Criterion) {
    c.bench_function("place_full_row_and_clear", |b| {
        b.iter(|| {
            let mut game = Game::with_seed(black_box(12345));
            game.start();
            // walk the drawn pieces across the second row; some placements
            // land, some are rejected, full lines clear on the way
            for x in 0..5 {
                game.place_at(x, 1);
            }
            game.score()
        })
    });
}

fn bench_clear_scan(c: &mut Criterion) {
    let mut grid = Grid::new();
    for i in 0..5 {
        grid.set(i, 2, 3);
        grid.set(2, i, 3);
    }

    c.bench_function("scan_full_lines", |b| {
        b.iter(|| scan_full_lines(black_box(&grid)))
    });

    c.bench_function("apply_clear", |b| {
        b.iter(|| {
            let mut board = grid.clone();
            let scan = scan_full_lines(&board);
            apply_clear(&mut board, &scan);
        })
    });
}

fn bench_can_play(c: &mut Criterion) {
    let grid = Grid::new();
    let piece = GamePiece::from_index(10).unwrap(); // plus, the widest footprint

    c.bench_function("can_play", |b| {
        b.iter(|| grid.can_play(black_box(&piece), 2, 2))
    });
}

fn bench_piece_draw(c: &mut Criterion) {
    let mut spawner = PieceSpawner::new(12345);

    c.bench_function("draw_piece", |b| b.iter(|| spawner.draw()));
}

fn bench_rotate(c: &mut Criterion) {
    let piece = GamePiece::from_index(5).unwrap();

    c.bench_function("rotate_piece", |b| {
        b.iter(|| black_box(piece).rotated(1))
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut game = Game::with_seed(12345);
    game.start();
    game.place_at(2, 2);

    c.bench_function("snapshot", |b| b.iter(|| game.snapshot()));
}

criterion_group!(
    benches,
    bench_place_and_clear,
    bench_clear_scan,
    bench_can_play,
    bench_piece_draw,
    bench_rotate,
    bench_snapshot
);
criterion_main!(benches);
