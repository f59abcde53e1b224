//! Movetext replay: resolve each token against the running board and record
//! the resulting snapshot.
//!
//! Replay stops at the first token that cannot be resolved. Continuing past
//! a bad token would make every later snapshot wrong, so a failure yields a
//! `ReplayError` and no `Game` at all.

use crate::board::board::Board;
use crate::errors::{MoveError, NotationError, ReplayError};
use crate::move_generation::move_apply::apply_move;
use crate::moves::chess_move::Move;
use crate::replay::game::Game;
use crate::utils::pgn::{tokenize_movetext, MovetextToken};
use crate::utils::san::{move_to_san, parse_san};

/// Replay `movetext` from the standard initial position.
pub fn replay(movetext: &str) -> Result<Game, ReplayError> {
    replay_from(Board::new_game(), movetext)
}

/// Replay `movetext` from an arbitrary starting board (PGN `SetUp`/`FEN`).
pub fn replay_from(initial: Board, movetext: &str) -> Result<Game, ReplayError> {
    let mut game = Game::new(initial);

    for token in tokenize_movetext(movetext) {
        let ply = game.len() + 1;

        match token {
            Ok(MovetextToken::MoveNumber(_)) => {}
            Ok(MovetextToken::Result(result)) => {
                game.set_result_token(result);
                break;
            }
            Ok(MovetextToken::Move(san)) => {
                let (mv, normalized, next) =
                    play_token(game.final_board(), &san).map_err(|source| ReplayError {
                        ply,
                        token: san.clone(),
                        source,
                    })?;
                log::trace!("ply {ply}: {san} -> {}", next.get_fen());
                game.push(mv, normalized, next);
            }
            Err(err) => {
                return Err(ReplayError {
                    ply,
                    token: offending_token(&err),
                    source: err.into(),
                })
            }
        }
    }

    log::debug!(
        "replayed {} plies, final position {}",
        game.len(),
        game.final_board().get_fen()
    );
    Ok(game)
}

fn play_token(board: &Board, token: &str) -> Result<(Move, String, Board), MoveError> {
    let mv = parse_san(token, board)?;
    let san = move_to_san(board, mv);
    let next = apply_move(board, mv)?;
    Ok((mv, san, next))
}

fn offending_token(err: &NotationError) -> String {
    match err {
        NotationError::Illegal(token) | NotationError::Malformed(token) => token.clone(),
        NotationError::Ambiguous { token, .. } => token.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::{replay, replay_from};
    use crate::board::board::Board;
    use crate::board::chess_types::{Color, CASTLE_BLACK_KINGSIDE, CASTLE_BLACK_QUEENSIDE};
    use crate::errors::{MoveError, NotationError};
    use crate::replay::game::{snapshot_at, GameOutcome};
    use crate::utils::fen_generator::generate_fen;

    #[test]
    fn open_game_snapshot_after_two_plies() {
        let game = replay("1. e4 e5 2. Nf3 Nc6").expect("movetext should replay");

        assert_eq!(game.len(), 4);
        assert_eq!(
            generate_fen(snapshot_at(&game, 2)),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2"
        );
        assert_eq!(
            game.final_board().get_fen(),
            "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3"
        );
    }

    #[test]
    fn kingside_castling_revokes_both_white_rights() {
        let game = replay("1. e4 e5 2. Nf3 Nc6 3. Bc4 Bc5 4. O-O").expect("movetext should replay");
        let board = game.final_board();

        assert_eq!(board.castling_rights, CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE);
        assert_eq!(
            board.get_fen(),
            "r1bqk1nr/pppp1ppp/2n5/2b1p3/2B1P3/5N2/PPPP1PPP/RNBQ1RK1 b kq - 5 4"
        );
        assert_eq!(game.plies()[6].san, "O-O");
    }

    #[test]
    fn ambiguous_knight_move_fails_at_its_ply() {
        let err = replay("1. d4 d5 2. Nf3 Nf6 3. Nd2").expect_err("Nd2 should be ambiguous");

        assert!(err.is_ambiguous());
        assert_eq!(err.ply, 5);
        assert_eq!(err.token, "Nd2");
        assert_eq!(
            err.source,
            MoveError::Notation(NotationError::Ambiguous {
                token: "Nd2".to_owned(),
                candidates: 2,
            })
        );

        let game = replay("1. d4 d5 2. Nf3 Nf6 3. Nbd2").expect("disambiguated move should replay");
        assert_eq!(game.len(), 5);
    }

    #[test]
    fn capture_onto_empty_square_is_illegal() {
        let err = replay("1. e4 d5 2. exf5").expect_err("exf5 has nothing to capture");

        assert!(err.is_illegal());
        assert_eq!(err.ply, 3);
        assert_eq!(err.token, "exf5");
    }

    #[test]
    fn malformed_token_stops_replay() {
        let err = replay("1. e4 ??? e5").expect_err("??? is not a move");

        assert!(err.is_malformed());
        assert_eq!(err.ply, 2);
        assert_eq!(err.token, "???");
    }

    #[test]
    fn snapshot_indices_clamp_to_game_ends() {
        let game = replay("1. e4 e5 2. Nf3 Nc6 1-0").expect("movetext should replay");

        assert_eq!(snapshot_at(&game, 0), &Board::new_game());
        assert_eq!(snapshot_at(&game, 4), game.final_board());
        assert_eq!(snapshot_at(&game, 400), game.final_board());
        assert_eq!(game.result_token(), Some("1-0"));
    }

    #[test]
    fn en_passant_capture_replays() {
        let game = replay("1. e4 a6 2. e5 d5 3. exd6").expect("movetext should replay");

        assert_eq!(
            generate_fen(snapshot_at(&game, 4)),
            "rnbqkbnr/1pp1pppp/p7/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3"
        );
        assert_eq!(
            game.final_board().get_fen(),
            "rnbqkbnr/1pp1pppp/p2P4/8/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 3"
        );
    }

    #[test]
    fn pinned_en_passant_capturer_publishes_no_target() {
        let start = Board::from_fen("3k4/3p4/8/K3P2r/8/8/8/8 b - - 0 1").expect("FEN should parse");
        let game = replay_from(start, "1... d5").expect("movetext should replay");

        assert_eq!(game.final_board().get_fen(), "3k4/8/8/K2pP2r/8/8/8/8 w - - 0 2");
        assert!(replay_from(game.final_board().clone(), "2. exd6").is_err());
    }

    #[test]
    fn recorded_san_is_normalized() {
        let game = replay("1. f2f3 e5 2. g4 Qh4 0-1").expect("movetext should replay");

        assert_eq!(game.san_moves().collect::<Vec<_>>(), vec!["f3", "e5", "g4", "Qh4#"]);
    }

    #[test]
    fn detects_checkmate() {
        let game = replay("1. f3 e5 2. g4 Qh4# 0-1").expect("movetext should replay");

        assert_eq!(game.outcome(), Some(GameOutcome::Checkmate { winner: Color::Black }));
        assert_eq!(game.plies()[3].san, "Qh4#");
    }

    #[test]
    fn detects_stalemate() {
        let start = Board::from_fen("7k/8/4Q1K1/8/8/8/8/8 w - - 0 1").expect("FEN should parse");
        let game = replay_from(start, "1. Qf7").expect("movetext should replay");

        assert_eq!(game.outcome(), Some(GameOutcome::Stalemate));
    }

    #[test]
    fn detects_fifty_move_rule() {
        let start = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 99 80").expect("FEN should parse");
        let game = replay_from(start, "80. Ra2").expect("movetext should replay");

        assert_eq!(game.final_board().halfmove_clock, 100);
        assert_eq!(game.outcome(), Some(GameOutcome::FiftyMoveRule));
    }

    #[test]
    fn detects_threefold_repetition() {
        let shuffle = "1. Nf3 Nf6 2. Ng1 Ng8 3. Nf3 Nf6 4. Ng1";
        let game = replay(shuffle).expect("movetext should replay");
        assert_eq!(game.outcome(), None);

        let game = replay(&format!("{shuffle} Ng8")).expect("movetext should replay");
        assert_eq!(game.outcome(), Some(GameOutcome::ThreefoldRepetition));
    }

    #[test]
    fn accepts_coordinate_move_lists() {
        let san = replay("e4 e5 Nf3").expect("SAN should replay");
        let coordinates = replay("e2e4 e7e5 g1f3").expect("coordinates should replay");

        assert_eq!(san.final_board(), coordinates.final_board());
        assert_eq!(coordinates.san_moves().collect::<Vec<_>>(), vec!["e4", "e5", "Nf3"]);
    }
}
