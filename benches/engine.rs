use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfit::core::{
    Board, BlockSetRegistry, Figure, GameSession, InMemoryHighScores, SessionConfig,
};
use blockfit::types::{Anchor, CoordinatePair};

fn scattered_board() -> Board {
    let rows = [
        "#..#...#..",
        "..#..#....",
        "#....#..#.",
        ".#.#......",
        "....#..#.#",
        "#.#.....#.",
        "...#.#....",
        ".#....#..#",
        "..#.#...#.",
        "#......#..",
    ];
    Board::from_ascii(10, &rows)
}

fn bench_fit_scan(c: &mut Criterion) {
    let board = scattered_board();
    let l = Figure::new(vec![
        CoordinatePair::new(0, 0),
        CoordinatePair::new(0, 1),
        CoordinatePair::new(0, 2),
        CoordinatePair::new(1, 2),
    ])
    .unwrap();

    c.bench_function("fit_positions_l_10x10", |b| {
        b.iter(|| black_box(board.fit_positions(black_box(&l))))
    });
}

fn bench_line_scan(c: &mut Criterion) {
    let mut rows = vec!["#.#.#.#.#."; 10];
    rows[4] = "##########";
    rows[7] = "##########";
    let board = Board::from_ascii(10, &rows);

    c.bench_function("complete_line_cells", |b| {
        b.iter(|| {
            let rows = board.complete_row_cells();
            let cols = board.complete_column_cells();
            black_box((rows, cols))
        })
    });
}

fn bench_game_over_scan(c: &mut Criterion) {
    let registry = BlockSetRegistry::new();
    let mut session = GameSession::new(
        SessionConfig::default(),
        registry,
        Box::new(InMemoryHighScores::new()),
    );
    *session.board_mut() = scattered_board();

    c.bench_function("can_play_scan", |b| b.iter(|| black_box(session.can_play())));
}

fn bench_attempt_placement(c: &mut Criterion) {
    c.bench_function("attempt_placement_turn", |b| {
        b.iter_batched(
            || {
                let mut s = GameSession::new(
                    SessionConfig::default(),
                    BlockSetRegistry::new(),
                    Box::new(InMemoryHighScores::new()),
                );
                *s.board_mut() = scattered_board();
                s.set_tray(vec![Figure::unit()]);
                s
            },
            |mut s| black_box(s.attempt_placement(0, Anchor::new(0, 1))),
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_fit_scan,
    bench_line_scan,
    bench_game_over_scan,
    bench_attempt_placement
);
criterion_main!(benches);
