//! Standard Algebraic Notation: token parsing against a board, and
//! rendering legal moves back to SAN.
//!
//! Parsing never trusts the token on its own. The token is reduced to a
//! pattern (piece, optional origin file/rank, destination, promotion), and
//! the pattern is matched against the board's legal moves. Exactly one match
//! is required.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::board::board::Board;
use crate::board::chess_types::*;
use crate::errors::NotationError;
use crate::move_generation::legal_move_generator::{
    generate_legal_moves, position_status, PositionStatus,
};
use crate::move_generation::move_apply::make_move;
use crate::moves::chess_move::{Move, FLAG_CASTLE_KINGSIDE, FLAG_CASTLE_QUEENSIDE};
use crate::utils::algebraic::{
    algebraic_to_square, file_from_char, file_to_char, rank_from_char, rank_to_char,
    square_to_algebraic,
};

static CASTLING_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:O-O(?P<long>-O)?|0-0(?P<long0>-0)?)(?P<suffix>[+#])?$").expect("valid regex"));

static SAN_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<piece>[NBRQK])?(?P<file>[a-h])?(?P<rank>[1-8])?(?P<capture>x)?(?P<to>[a-h][1-8])(?:=?(?P<promo>[NBRQ]))?(?P<suffix>[+#])?$",
    )
    .expect("valid regex")
});

static COORDINATE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<from>[a-h][1-8])(?P<to>[a-h][1-8])(?P<promo>[nbrqNBRQ])?$").expect("valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckSuffix {
    Check,
    Checkmate,
}

impl CheckSuffix {
    fn from_capture(text: Option<&str>) -> Option<Self> {
        match text {
            Some("+") => Some(CheckSuffix::Check),
            Some("#") => Some(CheckSuffix::Checkmate),
            _ => None,
        }
    }
}

/// What a movetext token says about the move, before looking at the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovePattern {
    Castle {
        kingside: bool,
    },
    Standard {
        piece: PieceKind,
        from_file: Option<u8>,
        from_rank: Option<u8>,
        capture: bool,
        to: Square,
        promotion: Option<PieceKind>,
    },
    /// Coordinate form such as `e2e4` or `e7e8q`.
    Coordinate {
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    },
}

impl MovePattern {
    pub fn matches(&self, mv: &Move) -> bool {
        match *self {
            MovePattern::Castle { kingside } => {
                let flag = if kingside {
                    FLAG_CASTLE_KINGSIDE
                } else {
                    FLAG_CASTLE_QUEENSIDE
                };
                mv.flags & flag != 0
            }
            MovePattern::Standard {
                piece,
                from_file,
                from_rank,
                capture,
                to,
                promotion,
            } => {
                mv.piece == piece
                    && mv.to == to
                    && mv.promotion == promotion
                    && !mv.is_castling()
                    && (!capture || mv.is_capture())
                    && from_file.map_or(true, |file| square_file(mv.from) == file)
                    && from_rank.map_or(true, |rank| square_rank(mv.from) == rank)
            }
            MovePattern::Coordinate {
                from,
                to,
                promotion,
            } => mv.from == from && mv.to == to && mv.promotion == promotion,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveToken {
    pub pattern: MovePattern,
    pub suffix: Option<CheckSuffix>,
}

/// Whether `token` has the shape of a move (SAN, castling, or coordinate
/// form), ignoring trailing `!`/`?` annotations.
pub fn is_move_shaped(token: &str) -> bool {
    read_move_token(token).is_some()
}

/// Reduce a token to its pattern without consulting any board.
pub fn read_move_token(token: &str) -> Option<MoveToken> {
    let token = strip_annotations(token);

    if let Some(caps) = CASTLING_TOKEN.captures(token) {
        let long = caps.name("long").is_some() || caps.name("long0").is_some();
        return Some(MoveToken {
            pattern: MovePattern::Castle { kingside: !long },
            suffix: CheckSuffix::from_capture(caps.name("suffix").map(|m| m.as_str())),
        });
    }

    if let Some(caps) = COORDINATE_TOKEN.captures(token) {
        let promotion = match caps.name("promo") {
            Some(m) => Some(promotion_from_char(m.as_str())?),
            None => None,
        };
        return Some(MoveToken {
            pattern: MovePattern::Coordinate {
                from: algebraic_to_square(&caps["from"])?,
                to: algebraic_to_square(&caps["to"])?,
                promotion,
            },
            suffix: None,
        });
    }

    let caps = SAN_TOKEN.captures(token)?;
    let piece = match caps.name("piece") {
        Some(m) => PieceKind::from_san_letter(first_char(m.as_str())?)?,
        None => PieceKind::Pawn,
    };
    let to = algebraic_to_square(&caps["to"])?;
    let mut from_file = match caps.name("file") {
        Some(m) => Some(file_from_char(first_char(m.as_str())?)?),
        None => None,
    };
    let from_rank = match caps.name("rank") {
        Some(m) => Some(rank_from_char(first_char(m.as_str())?)?),
        None => None,
    };
    let promotion = match caps.name("promo") {
        Some(m) => Some(promotion_from_char(m.as_str())?),
        None => None,
    };

    // Pawn moves that name no file are pushes along the destination file.
    if piece == PieceKind::Pawn && from_file.is_none() {
        from_file = Some(square_file(to));
    }

    Some(MoveToken {
        pattern: MovePattern::Standard {
            piece,
            from_file,
            from_rank,
            capture: caps.name("capture").is_some(),
            to,
            promotion,
        },
        suffix: CheckSuffix::from_capture(caps.name("suffix").map(|m| m.as_str())),
    })
}

/// Resolve a SAN (or coordinate) token to the unique legal move it names.
pub fn parse_san(token: &str, board: &Board) -> Result<Move, NotationError> {
    let parsed = read_move_token(token).ok_or_else(|| NotationError::Malformed(token.to_owned()))?;

    let candidates: Vec<Move> = generate_legal_moves(board)
        .into_iter()
        .filter(|mv| parsed.pattern.matches(mv))
        .collect();

    let mv = match candidates.as_slice() {
        [mv] => *mv,
        [] => return Err(NotationError::Illegal(token.to_owned())),
        many => {
            return Err(NotationError::Ambiguous {
                token: token.to_owned(),
                candidates: many.len(),
            })
        }
    };

    check_suffix_consistency(token, parsed.suffix, board, mv);
    Ok(mv)
}

/// The check/mate suffix never decides which move was meant; a mismatch is
/// only logged.
fn check_suffix_consistency(token: &str, claimed: Option<CheckSuffix>, board: &Board, mv: Move) {
    let actual = match position_status(&make_move(board, mv)) {
        PositionStatus::Check => Some(CheckSuffix::Check),
        PositionStatus::Checkmate { .. } => Some(CheckSuffix::Checkmate),
        PositionStatus::Ongoing | PositionStatus::Stalemate => None,
    };

    if claimed.is_some() && claimed != actual {
        log::warn!("token `{token}` claims {claimed:?} but the move gives {actual:?}");
    } else if claimed.is_none() && actual.is_some() {
        log::debug!("token `{token}` omits its {actual:?} suffix");
    }
}

/// Render a legal move as SAN with minimal disambiguation and a check or
/// mate suffix.
pub fn move_to_san(board: &Board, mv: Move) -> String {
    let mut out = String::with_capacity(8);

    if mv.is_castling() {
        out.push_str(if mv.flags & FLAG_CASTLE_KINGSIDE != 0 {
            "O-O"
        } else {
            "O-O-O"
        });
    } else {
        match mv.piece.san_letter() {
            Some(letter) => {
                out.push(letter);
                push_disambiguation(board, mv, &mut out);
            }
            None if mv.is_capture() => out.push(file_to_char(square_file(mv.from))),
            None => {}
        }

        if mv.is_capture() {
            out.push('x');
        }
        out.push_str(&square_to_algebraic(mv.to));

        if let Some(letter) = mv.promotion.and_then(PieceKind::san_letter) {
            out.push('=');
            out.push(letter);
        }
    }

    match position_status(&make_move(board, mv)) {
        PositionStatus::Check => out.push('+'),
        PositionStatus::Checkmate { .. } => out.push('#'),
        PositionStatus::Ongoing | PositionStatus::Stalemate => {}
    }

    out
}

fn push_disambiguation(board: &Board, mv: Move, out: &mut String) {
    let rivals: Vec<Square> = generate_legal_moves(board)
        .into_iter()
        .filter(|other| other.piece == mv.piece && other.to == mv.to && other.from != mv.from)
        .map(|other| other.from)
        .collect();

    if rivals.is_empty() {
        return;
    }

    let file = square_file(mv.from);
    let rank = square_rank(mv.from);
    if rivals.iter().all(|&sq| square_file(sq) != file) {
        out.push(file_to_char(file));
    } else if rivals.iter().all(|&sq| square_rank(sq) != rank) {
        out.push(rank_to_char(rank));
    } else {
        out.push(file_to_char(file));
        out.push(rank_to_char(rank));
    }
}

fn strip_annotations(token: &str) -> &str {
    token.trim_end_matches(['!', '?'])
}

fn first_char(text: &str) -> Option<char> {
    text.chars().next()
}

fn promotion_from_char(text: &str) -> Option<PieceKind> {
    match PieceKind::from_san_letter(first_char(text)?.to_ascii_uppercase())? {
        PieceKind::King => None,
        kind => Some(kind),
    }
}
