//! Full legal move generation pipeline.
//!
//! Generates pseudo-legal moves, simulates each one on a scratch board, and
//! keeps only those that leave the mover's king unattacked. Also classifies
//! positions as ongoing, check, checkmate, or stalemate.

use crate::board::board::Board;
use crate::board::chess_types::Color;
use crate::move_generation::attack_checks::is_king_in_check;
use crate::move_generation::move_apply::make_move;
use crate::move_generation::pseudo_legal::generate_pseudo_legal_moves;
use crate::moves::chess_move::Move;

/// Every legal move for the side to move, in stable enumeration order.
pub fn generate_legal_moves(board: &Board) -> Vec<Move> {
    let mut pseudo = Vec::<Move>::with_capacity(64);
    generate_pseudo_legal_moves(board, &mut pseudo);

    let mover = board.side_to_move;
    pseudo.retain(|&mv| !is_king_in_check(&make_move(board, mv), mover));
    pseudo
}

/// Legal moves paired with the boards they lead to.
pub fn generate_legal_successors(board: &Board) -> Vec<(Move, Board)> {
    let mut pseudo = Vec::<Move>::with_capacity(64);
    generate_pseudo_legal_moves(board, &mut pseudo);

    let mover = board.side_to_move;
    pseudo
        .into_iter()
        .map(|mv| (mv, make_move(board, mv)))
        .filter(|(_, next)| !is_king_in_check(next, mover))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionStatus {
    Ongoing,
    /// Side to move is in check but has at least one legal reply.
    Check,
    Checkmate { winner: Color },
    Stalemate,
}

impl PositionStatus {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, PositionStatus::Checkmate { .. } | PositionStatus::Stalemate)
    }
}

pub fn position_status(board: &Board) -> PositionStatus {
    let in_check = is_king_in_check(board, board.side_to_move);
    let has_moves = !generate_legal_moves(board).is_empty();

    match (has_moves, in_check) {
        (true, false) => PositionStatus::Ongoing,
        (true, true) => PositionStatus::Check,
        (false, true) => PositionStatus::Checkmate {
            winner: board.side_to_move.opposite(),
        },
        (false, false) => PositionStatus::Stalemate,
    }
}
