//! Crate root module declarations for the chess replay engine.
//!
//! The board model, move generation, notation, and FEN/PGN codecs sit at
//! the bottom; `replay` turns movetext into a snapshot-per-ply `Game`, and
//! `import` wraps that into the title/description/FEN record an application
//! stores.

pub mod board {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
}

pub mod moves {
    pub mod attack_tables;
    pub mod chess_move;
}

pub mod move_generation {
    pub mod attack_checks;
    pub mod legal_move_generator;
    pub mod move_apply;
    pub mod perft;
    pub mod pseudo_legal;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod pgn;
    pub mod san;
}

pub mod replay {
    pub mod game;
    pub mod replayer;
}

pub mod import {
    pub mod chess_import;
}

pub mod errors;

pub use board::board::Board;
pub use errors::{ImportError, ReplayError};
pub use import::chess_import::{import_game, ImportConfig, ImportRequest, ImportResult, MoveNumbering};
pub use replay::game::{snapshot_at, Game, GameOutcome};
pub use replay::replayer::{replay, replay_from};
pub use utils::fen_generator::generate_fen;
pub use utils::fen_parser::parse_fen;
