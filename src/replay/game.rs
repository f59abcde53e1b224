//! Replayed game record: the starting board plus one snapshot per ply.

use crate::board::board::Board;
use crate::board::chess_rules::{FIFTY_MOVE_HALFMOVES, REPETITION_COUNT};
use crate::board::chess_types::Color;
use crate::move_generation::legal_move_generator::{position_status, PositionStatus};
use crate::moves::chess_move::Move;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GamePly {
    pub mv: Move,
    /// Normalized SAN, which may differ from the source token.
    pub san: String,
    /// Board after `mv` was played.
    pub board: Board,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Checkmate { winner: Color },
    Stalemate,
    FiftyMoveRule,
    ThreefoldRepetition,
}

/// Ply 0 is `initial`; ply `n` is the board after the `n`-th move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    initial: Board,
    plies: Vec<GamePly>,
    result_token: Option<String>,
}

impl Game {
    pub fn new(initial: Board) -> Self {
        Self {
            initial,
            plies: Vec::new(),
            result_token: None,
        }
    }

    pub(crate) fn push(&mut self, mv: Move, san: String, board: Board) {
        self.plies.push(GamePly { mv, san, board });
    }

    pub(crate) fn set_result_token(&mut self, token: String) {
        self.result_token = Some(token);
    }

    /// Number of moves played.
    #[inline]
    pub fn len(&self) -> usize {
        self.plies.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.plies.is_empty()
    }

    pub fn initial_board(&self) -> &Board {
        &self.initial
    }

    pub fn final_board(&self) -> &Board {
        self.plies.last().map_or(&self.initial, |ply| &ply.board)
    }

    pub fn plies(&self) -> &[GamePly] {
        &self.plies
    }

    pub fn san_moves(&self) -> impl Iterator<Item = &str> + '_ {
        self.plies.iter().map(|ply| ply.san.as_str())
    }

    /// Result marker (`1-0`, `0-1`, `1/2-1/2`, `*`) that closed the movetext.
    pub fn result_token(&self) -> Option<&str> {
        self.result_token.as_deref()
    }

    /// Board at `ply`, clamped to `[0, len]`.
    pub fn snapshot_at(&self, ply: usize) -> &Board {
        match ply.min(self.plies.len()) {
            0 => &self.initial,
            n => &self.plies[n - 1].board,
        }
    }

    /// How the final position ends the game, if it does. Mate and stalemate
    /// take precedence over the draw rules.
    pub fn outcome(&self) -> Option<GameOutcome> {
        let last = self.final_board();

        match position_status(last) {
            PositionStatus::Checkmate { winner } => return Some(GameOutcome::Checkmate { winner }),
            PositionStatus::Stalemate => return Some(GameOutcome::Stalemate),
            PositionStatus::Ongoing | PositionStatus::Check => {}
        }

        if last.halfmove_clock >= FIFTY_MOVE_HALFMOVES {
            return Some(GameOutcome::FiftyMoveRule);
        }
        if self.repetition_count(last) >= REPETITION_COUNT {
            return Some(GameOutcome::ThreefoldRepetition);
        }

        None
    }

    fn repetition_count(&self, board: &Board) -> usize {
        std::iter::once(&self.initial)
            .chain(self.plies.iter().map(|ply| &ply.board))
            .filter(|seen| seen.same_position(board))
            .count()
    }
}

/// Board at `ply` in `game`; out-of-range indices clamp to the nearest end.
pub fn snapshot_at(game: &Game, ply: usize) -> &Board {
    game.snapshot_at(ply)
}
