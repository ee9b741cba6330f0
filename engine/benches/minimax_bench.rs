use criterion::{criterion_group, criterion_main, Criterion, SamplingMode};
use std::hint::black_box;
use std::time::Duration;
use tictactoe_engine::games::tictactoe::{
    Board, Mark, SearchBudget, best_move, best_move_for, minimax, search, winning_lines,
};

fn board_from(size: usize, moves: &[(usize, Mark)]) -> Board {
    let mut board = Board::new(size).unwrap();
    for &(index, mark) in moves {
        board.place(index, mark).unwrap();
    }
    board
}

fn bench_minimax_empty_board() {
    let mut board = Board::new(3).unwrap();
    let win_set = winning_lines(3);
    black_box(minimax(&mut board, &win_set, 0, true).unwrap());
}

fn bench_best_move_after_corner_opening() {
    let board = board_from(3, &[(0, Mark::X)]);
    let win_set = winning_lines(3);
    black_box(best_move(&board, &win_set, SearchBudget::unlimited()).unwrap());
}

fn bench_self_play_game() {
    let mut board = Board::new(3).unwrap();
    let win_set = winning_lines(3);
    let mut mark = Mark::X;
    while let Ok(index) = best_move_for(&board, &win_set, mark, SearchBudget::unlimited()) {
        board.place(index, mark).unwrap();
        if tictactoe_engine::games::tictactoe::check_win(&board, &win_set).is_some() {
            break;
        }
        mark = mark.opponent().unwrap();
    }
}

fn bench_budgeted_4x4_search() {
    let board = board_from(4, &[(5, Mark::X), (10, Mark::O), (0, Mark::X)]);
    let win_set = winning_lines(4);
    let _ = black_box(search(&board, &win_set, Mark::O, SearchBudget::nodes(200_000)));
}

fn minimax_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimax");

    group
        .sampling_mode(SamplingMode::Flat)
        .sample_size(10)
        .measurement_time(Duration::from_secs(30));

    group.bench_function("empty_3x3", |b| b.iter(bench_minimax_empty_board));

    group.bench_function("corner_opening_reply", |b| {
        b.iter(bench_best_move_after_corner_opening)
    });

    group.bench_function("self_play_3x3", |b| b.iter(bench_self_play_game));

    group.bench_function("budgeted_4x4", |b| b.iter(bench_budgeted_4x4_search));

    group.finish();
}

criterion_group!(benches, minimax_bench);
criterion_main!(benches);
