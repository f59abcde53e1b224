use crate::board::board::Board;
use crate::board::chess_types::*;
use crate::utils::algebraic::square_to_algebraic;

/// Encode `board` as a six-field FEN string.
pub fn generate_fen(board: &Board) -> String {
    let side_to_move = match board.side_to_move {
        Color::White => "w",
        Color::Black => "b",
    };
    let en_passant = board
        .en_passant_square
        .map(square_to_algebraic)
        .unwrap_or_else(|| "-".to_owned());

    format!(
        "{} {} {} {} {} {}",
        generate_placement_field(board),
        side_to_move,
        generate_castling_field(board.castling_rights),
        en_passant,
        board.halfmove_clock,
        board.fullmove_number
    )
}

fn generate_placement_field(board: &Board) -> String {
    let mut out = String::with_capacity(72);

    for rank in (0..8u8).rev() {
        let mut empty_count = 0u8;

        for file in 0..8u8 {
            match board.piece_on(make_square(file, rank)) {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push(piece.fen_char());
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }
        if rank > 0 {
            out.push('/');
        }
    }

    out
}

fn generate_castling_field(rights: CastlingRights) -> String {
    let out: String = [
        (CASTLE_WHITE_KINGSIDE, 'K'),
        (CASTLE_WHITE_QUEENSIDE, 'Q'),
        (CASTLE_BLACK_KINGSIDE, 'k'),
        (CASTLE_BLACK_QUEENSIDE, 'q'),
    ]
    .into_iter()
    .filter(|(flag, _)| rights & flag != 0)
    .map(|(_, ch)| ch)
    .collect();

    if out.is_empty() {
        "-".to_owned()
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::generate_fen;
    use crate::board::board::Board;
    use crate::board::chess_rules::STARTING_POSITION_FEN;
    use crate::move_generation::legal_move_generator::generate_legal_moves;
    use crate::move_generation::move_apply::apply_move;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn round_trip_starting_position_fen() {
        let parsed = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        let generated = generate_fen(&parsed);

        assert_eq!(generated, STARTING_POSITION_FEN);
        assert_eq!(parse_fen(&generated).expect("generated FEN should parse"), parsed);
    }

    #[test]
    fn round_trip_custom_position_fen() {
        for fen in [
            "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/2N2N2/PPPP1PPP/R1BQ1RK1 b kq - 4 6",
            "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2",
            "8/8/8/8/8/8/8/K6k b - - 99 120",
        ] {
            let parsed = parse_fen(fen).expect("custom FEN should parse");
            assert_eq!(generate_fen(&parsed), fen);
        }
    }

    #[test]
    fn reachable_boards_round_trip_field_for_field() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..10 {
            let mut board = Board::new_game();
            for _ in 0..80 {
                let decoded = parse_fen(&generate_fen(&board)).expect("encoded FEN should parse");
                assert_eq!(decoded, board);

                let moves = generate_legal_moves(&board);
                if moves.is_empty() {
                    break;
                }
                let mv = moves[rng.random_range(0..moves.len())];
                board = apply_move(&board, mv).expect("legal move should apply");
            }
        }
    }
}
