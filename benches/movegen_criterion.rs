use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};

use chess_replay::board::board::Board;
use chess_replay::move_generation::legal_move_generator::generate_legal_moves;
use chess_replay::moves::chess_move::Move;
use chess_replay::replay::replayer::replay;
use chess_replay::utils::san::{move_to_san, parse_san};

// Morphy vs Duke Karl / Count Isouard, Paris 1858.
const OPERA_GAME: &str = "1. e4 e5 2. Nf3 d6 3. d4 Bg4 4. dxe5 Bxf3 5. Qxf3 dxe5 \
6. Bc4 Nf6 7. Qb3 Qe7 8. Nc3 c6 9. Bg5 b5 10. Nxb5 cxb5 11. Bxb5+ Nbd7 \
12. O-O-O Rd8 13. Rxd7 Rxd7 14. Rd1 Qe6 15. Bxd7+ Nxd7 16. Qb8+ Nxb8 17. Rd8# 1-0";

/// Board before each ply, with the move played from it and its SAN.
fn replayed_positions() -> Vec<(Board, Move, String)> {
    let game = replay(OPERA_GAME).expect("benchmark game should replay");
    game.plies()
        .iter()
        .enumerate()
        .map(|(idx, ply)| (game.snapshot_at(idx).clone(), ply.mv, ply.san.clone()))
        .collect()
}

fn bench_replay_inner_loop(c: &mut Criterion) {
    let positions = replayed_positions();

    let mut group = c.benchmark_group("replay_inner_loop");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));
    group.throughput(Throughput::Elements(positions.len() as u64));

    group.bench_function("generate_legal_moves", |b| {
        b.iter(|| {
            positions
                .iter()
                .map(|(board, _, _)| generate_legal_moves(black_box(board)).len())
                .sum::<usize>()
        });
    });

    group.bench_function("parse_san", |b| {
        b.iter(|| {
            for (board, expected, san) in &positions {
                let mv = parse_san(black_box(san), black_box(board)).expect("recorded SAN should resolve");
                assert_eq!(mv, *expected);
            }
        });
    });

    group.bench_function("move_to_san", |b| {
        b.iter(|| {
            positions
                .iter()
                .map(|(board, mv, _)| move_to_san(black_box(board), *mv).len())
                .sum::<usize>()
        });
    });

    group.finish();
}

criterion_group!(movegen_benches, bench_replay_inner_loop);
criterion_main!(movegen_benches);
