//! Pseudo-legal move generation, one routine per piece family.
//!
//! Moves are pushed in a fixed order (piece kind, then origin square
//! ascending, then destination) so repeated calls on the same board yield
//! identical sequences. Nothing here checks whether the mover's king ends up
//! attacked, except castling, whose transit rule cannot be expressed as a
//! post-move check.

use crate::board::board::Board;
use crate::board::chess_rules::castling_lanes;
use crate::board::chess_types::*;
use crate::move_generation::attack_checks::is_square_attacked;
use crate::moves::attack_tables::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, queen_attacks, rook_attacks,
};
use crate::moves::chess_move::{
    Move, FLAG_CAPTURE, FLAG_CASTLE_KINGSIDE, FLAG_CASTLE_QUEENSIDE, FLAG_DOUBLE_PAWN_PUSH,
    FLAG_EN_PASSANT,
};

pub fn generate_pseudo_legal_moves(board: &Board, out: &mut Vec<Move>) {
    generate_pawn_moves(board, out);
    generate_piece_moves(board, PieceKind::Knight, out);
    generate_piece_moves(board, PieceKind::Bishop, out);
    generate_piece_moves(board, PieceKind::Rook, out);
    generate_piece_moves(board, PieceKind::Queen, out);
    generate_piece_moves(board, PieceKind::King, out);
    generate_castling_moves(board, out);
}

fn generate_pawn_moves(board: &Board, out: &mut Vec<Move>) {
    let side = board.side_to_move;
    let enemy_occ = board.occupancy_by_color[side.opposite().index()];
    let empty = !board.occupancy_all;

    let mut pawns = board.bitboard(side, PieceKind::Pawn);
    while pawns != 0 {
        let from = pawns.trailing_zeros() as Square;
        pawns &= pawns - 1;

        // A pawn on its promotion rank is malformed input; skip it rather
        // than step off the board.
        if square_rank(from) == side.promotion_rank() {
            continue;
        }

        let one_step = step_forward(side, from);
        if (1u64 << one_step) & empty != 0 {
            push_pawn_move(side, from, one_step, 0, out);

            if square_rank(from) == side.pawn_start_rank() {
                let two_step = step_forward(side, one_step);
                if (1u64 << two_step) & empty != 0 {
                    out.push(Move::new(from, two_step, PieceKind::Pawn, None, FLAG_DOUBLE_PAWN_PUSH));
                }
            }
        }

        let mut targets = pawn_attacks(side, from);
        while targets != 0 {
            let to = targets.trailing_zeros() as Square;
            targets &= targets - 1;

            if (1u64 << to) & enemy_occ != 0 {
                push_pawn_move(side, from, to, FLAG_CAPTURE, out);
            } else if board.en_passant_square == Some(to) {
                out.push(Move::new(
                    from,
                    to,
                    PieceKind::Pawn,
                    None,
                    FLAG_CAPTURE | FLAG_EN_PASSANT,
                ));
            }
        }
    }
}

/// Push a pawn move, expanding it into the four promotions on the last rank.
fn push_pawn_move(side: Color, from: Square, to: Square, flags: u8, out: &mut Vec<Move>) {
    if square_rank(to) == side.promotion_rank() {
        for promo in PieceKind::PROMOTIONS {
            out.push(Move::new(from, to, PieceKind::Pawn, Some(promo), flags));
        }
    } else {
        out.push(Move::new(from, to, PieceKind::Pawn, None, flags));
    }
}

#[inline]
fn step_forward(side: Color, square: Square) -> Square {
    match side {
        Color::White => square + 8,
        Color::Black => square - 8,
    }
}

/// Knight, bishop, rook, queen, and single-step king moves.
fn generate_piece_moves(board: &Board, kind: PieceKind, out: &mut Vec<Move>) {
    let side = board.side_to_move;
    let own_occ = board.occupancy_by_color[side.index()];
    let enemy_occ = board.occupancy_by_color[side.opposite().index()];

    let mut pieces = board.bitboard(side, kind);
    while pieces != 0 {
        let from = pieces.trailing_zeros() as Square;
        pieces &= pieces - 1;

        let mut targets = piece_attacks(kind, from, board.occupancy_all) & !own_occ;
        while targets != 0 {
            let to = targets.trailing_zeros() as Square;
            targets &= targets - 1;

            let flags = if (1u64 << to) & enemy_occ != 0 {
                FLAG_CAPTURE
            } else {
                0
            };
            out.push(Move::new(from, to, kind, None, flags));
        }
    }
}

fn piece_attacks(kind: PieceKind, from: Square, occupancy: u64) -> u64 {
    match kind {
        PieceKind::Knight => knight_attacks(from),
        PieceKind::Bishop => bishop_attacks(from, occupancy),
        PieceKind::Rook => rook_attacks(from, occupancy),
        PieceKind::Queen => queen_attacks(from, occupancy),
        PieceKind::King => king_attacks(from),
        PieceKind::Pawn => 0,
    }
}

fn generate_castling_moves(board: &Board, out: &mut Vec<Move>) {
    let side = board.side_to_move;
    let enemy = side.opposite();
    let king = board.bitboard(side, PieceKind::King);
    let rooks = board.bitboard(side, PieceKind::Rook);

    for (lane, flag) in castling_lanes(side)
        .into_iter()
        .zip([FLAG_CASTLE_KINGSIDE, FLAG_CASTLE_QUEENSIDE])
    {
        if board.castling_rights & lane.right == 0
            || king & (1u64 << lane.king_from) == 0
            || rooks & (1u64 << lane.rook_from) == 0
            || board.occupancy_all & lane.empty_mask != 0
        {
            continue;
        }

        // The king may not castle out of, through, or into check.
        let king_safe = std::iter::once(lane.king_from)
            .chain(lane.king_path)
            .all(|square| !is_square_attacked(board, square, enemy));
        if king_safe {
            out.push(Move::new(lane.king_from, lane.king_to, PieceKind::King, None, flag));
        }
    }
}
