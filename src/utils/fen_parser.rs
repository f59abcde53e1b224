//! FEN-to-Board parser.
//!
//! Builds a fully populated board (bitboards, occupancy, rights, clocks)
//! from a Forsyth-Edwards Notation string and rejects positions that break
//! the board invariants: one king per color, no pawns on the back ranks.

use crate::board::board::Board;
use crate::board::chess_types::*;
use crate::errors::FenError;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> Result<Board, FenError> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or(FenError::MissingField("board layout"))?;
    let side_part = parts.next().ok_or(FenError::MissingField("side to move"))?;
    let castling_part = parts.next().ok_or(FenError::MissingField("castling rights"))?;
    let en_passant_part = parts.next().ok_or(FenError::MissingField("en-passant square"))?;
    let halfmove_part = parts.next().ok_or(FenError::MissingField("halfmove clock"))?;
    let fullmove_part = parts.next().ok_or(FenError::MissingField("fullmove number"))?;

    if parts.next().is_some() {
        return Err(FenError::TrailingFields);
    }

    let mut board = Board::new_empty();

    parse_placement(board_part, &mut board)?;
    board.side_to_move = parse_side_to_move(side_part)?;
    board.castling_rights = parse_castling_rights(castling_part)?;
    board.en_passant_square = parse_en_passant_square(en_passant_part)?;
    board.halfmove_clock = parse_counter("halfmove clock", halfmove_part)?;
    board.fullmove_number = parse_counter("fullmove number", fullmove_part)?;

    validate_invariants(&board)?;

    Ok(board)
}

fn parse_placement(board_part: &str, board: &mut Board) -> Result<(), FenError> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::InvalidLayout(format!(
            "expected 8 ranks, found {}",
            ranks.len()
        )));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(FenError::InvalidLayout(format!(
                        "invalid empty-square count '{ch}'"
                    )));
                }
                file += empty_count as u8;
                if file > 8 {
                    break;
                }
                continue;
            }

            let piece = Piece::from_fen_char(ch)
                .ok_or_else(|| FenError::InvalidLayout(format!("invalid piece character '{ch}'")))?;

            if file >= 8 {
                return Err(FenError::InvalidLayout(format!("rank {} has too many files", rank + 1)));
            }

            let sq = make_square(file, rank);
            board.pieces[piece.color.index()][piece.kind.index()] |= 1u64 << sq;
            file += 1;
        }

        if file != 8 {
            return Err(FenError::InvalidLayout(format!(
                "rank {} does not sum to 8 files",
                rank + 1
            )));
        }
    }

    board.recalc_occupancy();
    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Result<Color, FenError> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(FenError::InvalidSideToMove(side_part.to_owned())),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, FenError> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        let flag = match ch {
            'K' => CASTLE_WHITE_KINGSIDE,
            'Q' => CASTLE_WHITE_QUEENSIDE,
            'k' => CASTLE_BLACK_KINGSIDE,
            'q' => CASTLE_BLACK_QUEENSIDE,
            _ => return Err(FenError::InvalidCastling(castling_part.to_owned())),
        };
        if rights & flag != 0 {
            return Err(FenError::InvalidCastling(castling_part.to_owned()));
        }
        rights |= flag;
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> Result<Option<Square>, FenError> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)
        .ok_or_else(|| FenError::InvalidEnPassant(en_passant_part.to_owned()))?;

    // Targets only ever sit on the third or sixth rank.
    if !matches!(square_rank(square), 2 | 5) {
        return Err(FenError::InvalidEnPassant(en_passant_part.to_owned()));
    }

    Ok(Some(square))
}

fn parse_counter(field: &'static str, value: &str) -> Result<u16, FenError> {
    value.parse::<u16>().map_err(|_| FenError::InvalidCounter {
        field,
        value: value.to_owned(),
    })
}

fn validate_invariants(board: &Board) -> Result<(), FenError> {
    for color in Color::ALL {
        if board.bitboard(color, PieceKind::King).count_ones() != 1 {
            return Err(FenError::KingCount(color));
        }
    }

    const BACK_RANKS: u64 = 0xFF | (0xFF << 56);
    let pawns = board.bitboard(Color::White, PieceKind::Pawn) | board.bitboard(Color::Black, PieceKind::Pawn);
    let misplaced = pawns & BACK_RANKS;
    if misplaced != 0 {
        return Err(FenError::PawnOnBackRank(misplaced.trailing_zeros() as Square));
    }

    Ok(())
}
