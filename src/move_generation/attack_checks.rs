use crate::board::board::Board;
use crate::board::chess_types::*;
use crate::moves::attack_tables::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, rook_attacks,
};

#[inline]
pub fn king_square(board: &Board, color: Color) -> Option<Square> {
    let kings = board.bitboard(color, PieceKind::King);
    if kings == 0 {
        None
    } else {
        Some(kings.trailing_zeros() as Square)
    }
}

#[inline]
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    let Some(king_sq) = king_square(board, color) else {
        return false;
    };
    is_square_attacked(board, king_sq, color.opposite())
}

/// Whether any piece of `attacker_color` attacks `square`. Works backwards
/// from the target: a pawn of the attacker's color attacks `square` exactly
/// when a defender pawn on `square` would attack that pawn.
pub fn is_square_attacked(board: &Board, square: Square, attacker_color: Color) -> bool {
    let occupancy = board.occupancy_all;
    let attacker = |kind: PieceKind| board.bitboard(attacker_color, kind);

    if pawn_attacks(attacker_color.opposite(), square) & attacker(PieceKind::Pawn) != 0 {
        return true;
    }

    if knight_attacks(square) & attacker(PieceKind::Knight) != 0 {
        return true;
    }

    if king_attacks(square) & attacker(PieceKind::King) != 0 {
        return true;
    }

    let diagonal = attacker(PieceKind::Bishop) | attacker(PieceKind::Queen);
    if bishop_attacks(square, occupancy) & diagonal != 0 {
        return true;
    }

    let straight = attacker(PieceKind::Rook) | attacker(PieceKind::Queen);
    rook_attacks(square, occupancy) & straight != 0
}
