//! Structured move value.

use std::fmt;

use crate::board::chess_types::{PieceKind, Square};
use crate::utils::algebraic::square_to_algebraic;

pub type MoveFlags = u8;

pub const FLAG_CAPTURE: MoveFlags = 1 << 0;
pub const FLAG_EN_PASSANT: MoveFlags = 1 << 1;
pub const FLAG_CASTLE_KINGSIDE: MoveFlags = 1 << 2;
pub const FLAG_CASTLE_QUEENSIDE: MoveFlags = 1 << 3;
pub const FLAG_DOUBLE_PAWN_PUSH: MoveFlags = 1 << 4;

pub const FLAG_CASTLING: MoveFlags = FLAG_CASTLE_KINGSIDE | FLAG_CASTLE_QUEENSIDE;

/// A move relative to the board it was generated from. `piece` is the kind
/// standing on `from` before the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: PieceKind,
    pub promotion: Option<PieceKind>,
    pub flags: MoveFlags,
}

impl Move {
    #[inline]
    pub const fn new(
        from: Square,
        to: Square,
        piece: PieceKind,
        promotion: Option<PieceKind>,
        flags: MoveFlags,
    ) -> Self {
        Self {
            from,
            to,
            piece,
            promotion,
            flags,
        }
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.flags & FLAG_CAPTURE != 0
    }

    #[inline]
    pub const fn is_en_passant(&self) -> bool {
        self.flags & FLAG_EN_PASSANT != 0
    }

    #[inline]
    pub const fn is_castling(&self) -> bool {
        self.flags & FLAG_CASTLING != 0
    }

    #[inline]
    pub const fn is_double_pawn_push(&self) -> bool {
        self.flags & FLAG_DOUBLE_PAWN_PUSH != 0
    }
}

/// Coordinate form, e.g. `e2e4` or `e7e8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&square_to_algebraic(self.from))?;
        f.write_str(&square_to_algebraic(self.to))?;
        if let Some(promotion) = self.promotion.and_then(PieceKind::san_letter) {
            write!(f, "{}", promotion.to_ascii_lowercase())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Move, FLAG_CAPTURE, FLAG_CASTLE_KINGSIDE};
    use crate::board::chess_types::PieceKind;

    #[test]
    fn display_uses_coordinate_notation() {
        let push = Move::new(12, 28, PieceKind::Pawn, None, 0);
        assert_eq!(push.to_string(), "e2e4");

        let promo = Move::new(52, 61, PieceKind::Pawn, Some(PieceKind::Queen), FLAG_CAPTURE);
        assert_eq!(promo.to_string(), "e7f8q");
        assert!(promo.is_capture());
    }

    #[test]
    fn castling_flag_is_reported() {
        let castle = Move::new(4, 6, PieceKind::King, None, FLAG_CASTLE_KINGSIDE);
        assert!(castle.is_castling());
        assert!(!castle.is_capture());
    }
}
