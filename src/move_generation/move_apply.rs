//! Board mutation for a single pseudo-legal move.
//!
//! Check safety is not re-validated here; the legal move generator simulates
//! every candidate through `make_move` and discards the ones that leave the
//! mover's king attacked.

use crate::board::board::Board;
use crate::board::chess_rules::{castling_lanes, rights_touching_square};
use crate::board::chess_types::*;
use crate::errors::InvalidMoveError;
use crate::move_generation::attack_checks::is_king_in_check;
use crate::moves::attack_tables::pawn_attacks;
use crate::moves::chess_move::{Move, FLAG_CAPTURE, FLAG_CASTLE_KINGSIDE, FLAG_EN_PASSANT};

/// Apply `mv` to `board`, returning the successor board.
///
/// Fails only when the origin square is empty or holds a piece of the side
/// not to move. Any other inconsistency is the caller's responsibility.
pub fn apply_move(board: &Board, mv: Move) -> Result<Board, InvalidMoveError> {
    match board.piece_on(mv.from) {
        None => Err(InvalidMoveError::EmptyFromSquare(mv.from)),
        Some(piece) if piece.color != board.side_to_move => Err(InvalidMoveError::WrongColor {
            square: mv.from,
            found: piece.color,
            expected: board.side_to_move,
        }),
        Some(_) => Ok(make_move(board, mv)),
    }
}

/// Unchecked core of `apply_move`; `mv.from` must hold a piece of the side
/// to move.
pub(crate) fn make_move(board: &Board, mv: Move) -> Board {
    let mover = board.side_to_move;
    let enemy = mover.opposite();
    let from_mask = 1u64 << mv.from;
    let to_mask = 1u64 << mv.to;

    let mut next = board.clone();

    next.pieces[mover.index()][mv.piece.index()] &= !from_mask;

    if mv.is_en_passant() {
        let victim = en_passant_victim_square(mover, mv.to);
        next.pieces[enemy.index()][PieceKind::Pawn.index()] &= !(1u64 << victim);
    } else {
        for bb in next.pieces[enemy.index()].iter_mut() {
            *bb &= !to_mask;
        }
    }

    let landing = mv.promotion.unwrap_or(mv.piece);
    next.pieces[mover.index()][landing.index()] |= to_mask;

    if mv.is_castling() {
        let [kingside, queenside] = castling_lanes(mover);
        let lane = if mv.flags & FLAG_CASTLE_KINGSIDE != 0 {
            kingside
        } else {
            queenside
        };
        let rooks = &mut next.pieces[mover.index()][PieceKind::Rook.index()];
        *rooks &= !(1u64 << lane.rook_from);
        *rooks |= 1u64 << lane.rook_to;
    }

    next.castling_rights &= !(rights_touching_square(mv.from) | rights_touching_square(mv.to));

    next.recalc_occupancy();

    next.en_passant_square = None;

    if mv.piece == PieceKind::Pawn || mv.is_capture() {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock = next.halfmove_clock.saturating_add(1);
    }
    if mover == Color::Black {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }

    next.side_to_move = enemy;

    if mv.is_double_pawn_push() {
        let target = (mv.from + mv.to) / 2;
        if en_passant_is_legal(&next, target) {
            next.en_passant_square = Some(target);
        }
    }

    next
}

/// Square of the pawn removed by an en-passant capture landing on `target`.
#[inline]
pub fn en_passant_victim_square(mover: Color, target: Square) -> Square {
    match mover {
        Color::White => target - 8,
        Color::Black => target + 8,
    }
}

/// The target is only published when the side to move has an en-passant
/// capture onto it that does not leave its own king attacked.
fn en_passant_is_legal(board: &Board, target: Square) -> bool {
    let capturer = board.side_to_move;
    let mut pawns = pawn_attacks(capturer.opposite(), target) & board.bitboard(capturer, PieceKind::Pawn);

    while pawns != 0 {
        let from = pawns.trailing_zeros() as Square;
        pawns &= pawns - 1;

        let capture = Move::new(from, target, PieceKind::Pawn, None, FLAG_CAPTURE | FLAG_EN_PASSANT);
        if !is_king_in_check(&make_move(board, capture), capturer) {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::apply_move;
    use crate::board::board::Board;
    use crate::board::chess_types::*;
    use crate::errors::InvalidMoveError;
    use crate::moves::chess_move::{
        Move, FLAG_CAPTURE, FLAG_CASTLE_KINGSIDE, FLAG_CASTLE_QUEENSIDE, FLAG_DOUBLE_PAWN_PUSH,
        FLAG_EN_PASSANT,
    };

    #[test]
    fn double_push_without_adjacent_pawn_leaves_no_target() {
        let board = Board::new_game();
        let next = apply_move(&board, Move::new(12, 28, PieceKind::Pawn, None, FLAG_DOUBLE_PAWN_PUSH))
            .expect("e2e4 should apply");

        assert_eq!(next.en_passant_square, None);
        assert_eq!(next.side_to_move, Color::Black);
        assert_eq!(next.halfmove_clock, 0);
        assert_eq!(next.fullmove_number, 1);
        assert_eq!(next.piece_on(28), Some(Piece::new(Color::White, PieceKind::Pawn)));
    }

    #[test]
    fn double_push_beside_enemy_pawn_publishes_target() {
        let board = Board::from_fen("4k3/8/8/8/3p4/8/4P3/4K3 w - - 0 1").expect("FEN should parse");
        let next = apply_move(&board, Move::new(12, 28, PieceKind::Pawn, None, FLAG_DOUBLE_PAWN_PUSH))
            .expect("e2e4 should apply");

        assert_eq!(next.en_passant_square, Some(20));
        assert_eq!(next.get_fen(), "4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1");
    }

    #[test]
    fn pinned_capturer_leaves_no_target() {
        // exd6 would expose the a5 king to the h5 rook
        let board = Board::from_fen("3k4/3p4/8/K3P2r/8/8/8/8 b - - 0 1").expect("FEN should parse");
        let next = apply_move(&board, Move::new(51, 35, PieceKind::Pawn, None, FLAG_DOUBLE_PAWN_PUSH))
            .expect("d7d5 should apply");

        assert_eq!(next.en_passant_square, None);
        assert_eq!(next.get_fen(), "3k4/8/8/K2pP2r/8/8/8/8 w - - 0 2");
    }

    #[test]
    fn en_passant_capture_removes_the_passed_pawn() {
        let board = Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").expect("FEN should parse");
        let next = apply_move(
            &board,
            Move::new(36, 43, PieceKind::Pawn, None, FLAG_CAPTURE | FLAG_EN_PASSANT),
        )
        .expect("exd6 should apply");

        assert_eq!(next.piece_on(35), None);
        assert_eq!(next.piece_on(43), Some(Piece::new(Color::White, PieceKind::Pawn)));
        assert_eq!(next.get_fen(), "4k3/8/3P4/8/8/8/8/4K3 b - - 0 2");
    }

    #[test]
    fn castling_moves_rook_and_clears_rights() {
        let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 10").expect("FEN should parse");
        let short = apply_move(&board, Move::new(4, 6, PieceKind::King, None, FLAG_CASTLE_KINGSIDE))
            .expect("O-O should apply");
        assert_eq!(short.get_fen(), "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 4 10");

        let long = apply_move(&short, Move::new(60, 58, PieceKind::King, None, FLAG_CASTLE_QUEENSIDE))
            .expect("O-O-O should apply");
        assert_eq!(long.get_fen(), "2kr3r/8/8/8/8/8/8/R4RK1 w - - 5 11");
    }

    #[test]
    fn rook_capture_on_home_square_revokes_that_right() {
        let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let next = apply_move(&board, Move::new(7, 63, PieceKind::Rook, None, FLAG_CAPTURE))
            .expect("Rxh8 should apply");

        assert_eq!(next.castling_rights, CASTLE_WHITE_QUEENSIDE | CASTLE_BLACK_QUEENSIDE);
    }

    #[test]
    fn promotion_replaces_the_pawn() {
        let board = Board::from_fen("1n2k3/P7/8/8/8/8/8/4K3 w - - 7 40").expect("FEN should parse");
        let next = apply_move(
            &board,
            Move::new(48, 57, PieceKind::Pawn, Some(PieceKind::Queen), FLAG_CAPTURE),
        )
        .expect("axb8=Q should apply");

        assert_eq!(next.piece_on(57), Some(Piece::new(Color::White, PieceKind::Queen)));
        assert_eq!(next.bitboard(Color::White, PieceKind::Pawn), 0);
        assert_eq!(next.halfmove_clock, 0);
    }

    #[test]
    fn rejects_empty_and_wrong_color_origins() {
        let board = Board::new_game();

        assert_eq!(
            apply_move(&board, Move::new(28, 36, PieceKind::Pawn, None, 0)),
            Err(InvalidMoveError::EmptyFromSquare(28))
        );
        assert_eq!(
            apply_move(&board, Move::new(52, 44, PieceKind::Pawn, None, 0)),
            Err(InvalidMoveError::WrongColor {
                square: 52,
                found: Color::Black,
                expected: Color::White,
            })
        );
    }
}
