//! Canonical chess-rule constants.
//!
//! Starting position, home squares for the castling pieces, and the
//! thresholds used by draw bookkeeping.

use crate::board::chess_types::{
    CastlingRights, Color, Square, CASTLE_BLACK_KINGSIDE, CASTLE_BLACK_QUEENSIDE,
    CASTLE_WHITE_KINGSIDE, CASTLE_WHITE_QUEENSIDE,
};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Halfmove clock value at which the fifty-move rule may be claimed.
pub const FIFTY_MOVE_HALFMOVES: u16 = 100;

/// Occurrences of one position needed for a threefold repetition claim.
pub const REPETITION_COUNT: usize = 3;

/// Geometry of one castling option: which right guards it, where king and
/// rook start and end, and which squares must be empty or safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingLane {
    pub right: CastlingRights,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares between king and rook that must be empty.
    pub empty_mask: u64,
    /// Squares the king passes through or lands on; none may be attacked.
    pub king_path: [Square; 2],
}

pub const WHITE_KINGSIDE: CastlingLane = CastlingLane {
    right: CASTLE_WHITE_KINGSIDE,
    king_from: 4,
    king_to: 6,
    rook_from: 7,
    rook_to: 5,
    empty_mask: (1 << 5) | (1 << 6),
    king_path: [5, 6],
};

pub const WHITE_QUEENSIDE: CastlingLane = CastlingLane {
    right: CASTLE_WHITE_QUEENSIDE,
    king_from: 4,
    king_to: 2,
    rook_from: 0,
    rook_to: 3,
    empty_mask: (1 << 1) | (1 << 2) | (1 << 3),
    king_path: [3, 2],
};

pub const BLACK_KINGSIDE: CastlingLane = CastlingLane {
    right: CASTLE_BLACK_KINGSIDE,
    king_from: 60,
    king_to: 62,
    rook_from: 63,
    rook_to: 61,
    empty_mask: (1 << 61) | (1 << 62),
    king_path: [61, 62],
};

pub const BLACK_QUEENSIDE: CastlingLane = CastlingLane {
    right: CASTLE_BLACK_QUEENSIDE,
    king_from: 60,
    king_to: 58,
    rook_from: 56,
    rook_to: 59,
    empty_mask: (1 << 57) | (1 << 58) | (1 << 59),
    king_path: [59, 58],
};

/// Kingside lane first, then queenside.
#[inline]
pub const fn castling_lanes(color: Color) -> [CastlingLane; 2] {
    match color {
        Color::White => [WHITE_KINGSIDE, WHITE_QUEENSIDE],
        Color::Black => [BLACK_KINGSIDE, BLACK_QUEENSIDE],
    }
}

/// Rights lost when anything moves from or onto `square`.
#[inline]
pub const fn rights_touching_square(square: Square) -> CastlingRights {
    match square {
        0 => CASTLE_WHITE_QUEENSIDE,
        4 => CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE,
        7 => CASTLE_WHITE_KINGSIDE,
        56 => CASTLE_BLACK_QUEENSIDE,
        60 => CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE,
        63 => CASTLE_BLACK_KINGSIDE,
        _ => 0,
    }
}
