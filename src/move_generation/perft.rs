//! Perft node counting over the legal move generator.

use crate::board::board::Board;
use crate::move_generation::legal_move_generator::{generate_legal_moves, generate_legal_successors};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
    }
}

/// Count leaf nodes `depth` plies below `board`, with move-type breakdown
/// for the last ply.
pub fn perft(board: &Board, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    if depth == 1 {
        let mut counts = PerftCounts::default();
        for mv in generate_legal_moves(board) {
            counts.nodes += 1;
            counts.captures += u64::from(mv.is_capture());
            counts.en_passant += u64::from(mv.is_en_passant());
            counts.castles += u64::from(mv.is_castling());
            counts.promotions += u64::from(mv.promotion.is_some());
        }
        return counts;
    }

    let mut total = PerftCounts::default();
    for (_, next) in generate_legal_successors(board) {
        total.merge(perft(&next, depth - 1));
    }
    total
}
