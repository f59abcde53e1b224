//! Error types for every layer of the crate.
//!
//! Notation and replay failures are user-facing; `InvalidMoveError` marks a
//! broken precondition inside the engine and should never surface for input
//! that went through the legal move generator.

use thiserror::Error;

use crate::board::chess_types::{Color, Square};

/// `apply_move` was handed a move whose origin square is empty or holds the
/// wrong side's piece.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidMoveError {
    #[error("no piece on from-square {0}")]
    EmptyFromSquare(Square),

    #[error("piece on from-square {square} belongs to {found}, but {expected} is to move")]
    WrongColor {
        square: Square,
        found: Color,
        expected: Color,
    },
}

/// A single movetext token could not be resolved against the board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    /// Token is well formed but no legal move matches it.
    #[error("illegal move `{0}`")]
    Illegal(String),

    /// Token matches several legal moves even after disambiguation.
    #[error("ambiguous move `{token}` matches {candidates} legal moves")]
    Ambiguous { token: String, candidates: usize },

    /// Token is not a move number, result, or move shape at all.
    #[error("malformed movetext token `{0}`")]
    Malformed(String),
}

/// Cause of a replay stopping early.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error(transparent)]
    Notation(#[from] NotationError),

    /// Engine defect: a generated move did not fit the board it came from.
    #[error("internal move application failure: {0}")]
    Invalid(#[from] InvalidMoveError),
}

/// Replay stopped at `ply` on `token`. No partial game is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("replay failed at ply {ply} on token `{token}`: {source}")]
pub struct ReplayError {
    pub ply: usize,
    pub token: String,
    #[source]
    pub source: MoveError,
}

impl ReplayError {
    pub fn is_illegal(&self) -> bool {
        matches!(self.source, MoveError::Notation(NotationError::Illegal(_)))
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self.source, MoveError::Notation(NotationError::Ambiguous { .. }))
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self.source, MoveError::Notation(NotationError::Malformed(_)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("missing FEN field: {0}")]
    MissingField(&'static str),

    #[error("FEN has extra trailing fields")]
    TrailingFields,

    #[error("invalid board layout: {0}")]
    InvalidLayout(String),

    #[error("invalid side-to-move field: {0}")]
    InvalidSideToMove(String),

    #[error("invalid castling rights field: {0}")]
    InvalidCastling(String),

    #[error("invalid en-passant field: {0}")]
    InvalidEnPassant(String),

    #[error("invalid {field}: {value}")]
    InvalidCounter { field: &'static str, value: String },

    #[error("position must contain exactly one {0} king")]
    KingCount(Color),

    #[error("pawn on back rank at square {0}")]
    PawnOnBackRank(Square),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PgnError {
    #[error("invalid PGN header line: {0}")]
    InvalidHeader(String),

    #[error("PGN SetUp=1 is present but FEN header is missing")]
    MissingSetupFen,

    #[error("invalid SetUp FEN: {0}")]
    SetupFen(#[from] FenError),

    #[error(transparent)]
    Movetext(#[from] NotationError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("could not read game record: {0}")]
    Pgn(#[from] PgnError),

    #[error("could not replay game: {0}")]
    Replay(#[from] ReplayError),

    #[error("game has {plies} plies, limit is {limit}")]
    TooManyPlies { plies: usize, limit: usize },
}
