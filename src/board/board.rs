//! Board model: piece placement plus the state fields FEN carries.
//!
//! `Board` stores one bitboard per (color, kind) pair with cached occupancy
//! masks, the side to move, castling rights, the en-passant target, and the
//! two move counters. It is plain data: cloning produces an independent
//! snapshot, and equality compares every field.

use crate::board::chess_rules::STARTING_POSITION_FEN;
use crate::board::chess_types::*;
use crate::errors::FenError;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    // [color][piece_kind]
    pub pieces: [[u64; 6]; 2],

    // Occupancy caches, kept in sync by `recalc_occupancy`.
    pub occupancy_by_color: [u64; 2],
    pub occupancy_all: u64,

    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,

            side_to_move: Color::White,
            castling_rights: 0,
            en_passant_square: None,

            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

impl Board {
    /// Empty board, white to move, no rights, fullmove 1.
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Standard initial position.
    pub fn new_game() -> Self {
        let mut board = Self::new_empty();

        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (file, kind) in (0u8..).zip(back_rank) {
            board.put_piece(make_square(file, 0), Piece::new(Color::White, kind));
            board.put_piece(make_square(file, 1), Piece::new(Color::White, PieceKind::Pawn));
            board.put_piece(make_square(file, 6), Piece::new(Color::Black, PieceKind::Pawn));
            board.put_piece(make_square(file, 7), Piece::new(Color::Black, kind));
        }
        board.castling_rights = CASTLE_ALL;

        debug_assert_eq!(generate_fen(&board), STARTING_POSITION_FEN);
        board
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    /// Piece standing on `square`, if any.
    pub fn piece_on(&self, square: Square) -> Option<Piece> {
        let mask = 1u64 << square;
        if self.occupancy_all & mask == 0 {
            return None;
        }

        for color in Color::ALL {
            if self.occupancy_by_color[color.index()] & mask == 0 {
                continue;
            }
            for kind in PieceKind::ALL {
                if self.pieces[color.index()][kind.index()] & mask != 0 {
                    return Some(Piece::new(color, kind));
                }
            }
        }

        None
    }

    /// Bitboard of `color`'s pieces of `kind`.
    #[inline]
    pub fn bitboard(&self, color: Color, kind: PieceKind) -> u64 {
        self.pieces[color.index()][kind.index()]
    }

    /// Place `piece` on an empty `square`, or replace whatever stood there.
    pub fn put_piece(&mut self, square: Square, piece: Piece) {
        self.clear_square(square);
        self.pieces[piece.color.index()][piece.kind.index()] |= 1u64 << square;
        self.recalc_occupancy();
    }

    /// Remove whatever stands on `square`.
    pub fn clear_square(&mut self, square: Square) {
        let mask = !(1u64 << square);
        for color_boards in self.pieces.iter_mut() {
            for bb in color_boards.iter_mut() {
                *bb &= mask;
            }
        }
        self.recalc_occupancy();
    }

    pub(crate) fn recalc_occupancy(&mut self) {
        for color in Color::ALL {
            self.occupancy_by_color[color.index()] = self.pieces[color.index()]
                .iter()
                .copied()
                .fold(0u64, |acc, bb| acc | bb);
        }
        self.occupancy_all = self.occupancy_by_color[Color::White.index()]
            | self.occupancy_by_color[Color::Black.index()];
    }

    /// Fields that identify a position for repetition purposes. Clocks are
    /// not compared.
    pub fn same_position(&self, other: &Board) -> bool {
        self.pieces == other.pieces
            && self.side_to_move == other.side_to_move
            && self.castling_rights == other.castling_rights
            && self.en_passant_square == other.en_passant_square
    }
}

#[cfg(test)]
mod tests {
    use super::Board;
    use crate::board::chess_rules::STARTING_POSITION_FEN;
    use crate::board::chess_types::{Color, Piece, PieceKind, CASTLE_ALL};

    #[test]
    fn new_game_matches_starting_fen() {
        let board = Board::new_game();
        let parsed = Board::from_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");

        assert_eq!(board, parsed);
        assert_eq!(board.castling_rights, CASTLE_ALL);
        assert_eq!(board.occupancy_all.count_ones(), 32);
    }

    #[test]
    fn piece_on_reports_color_and_kind() {
        let board = Board::new_game();

        assert_eq!(board.piece_on(4), Some(Piece::new(Color::White, PieceKind::King)));
        assert_eq!(board.piece_on(59), Some(Piece::new(Color::Black, PieceKind::Queen)));
        assert_eq!(board.piece_on(28), None);
    }

    #[test]
    fn put_piece_replaces_existing_occupant() {
        let mut board = Board::new_game();
        board.put_piece(12, Piece::new(Color::Black, PieceKind::Knight));

        assert_eq!(board.piece_on(12), Some(Piece::new(Color::Black, PieceKind::Knight)));
        assert_eq!(board.bitboard(Color::White, PieceKind::Pawn).count_ones(), 7);
        assert_eq!(board.occupancy_all.count_ones(), 32);
    }
}
