//! PGN reading: tag pairs, movetext cleanup, and token classification.
//!
//! The reader is deliberately forgiving about layout (blank lines, headers
//! without movetext, movetext without headers) and strict about token shape:
//! every surviving movetext token must be a move number, a result, or a
//! move.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::board::board::Board;
use crate::errors::{NotationError, PgnError};
use crate::utils::san::is_move_shaped;

static MOVE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<number>\d+)\.+(?P<rest>.*)$").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PgnRecord {
    pub headers: BTreeMap<String, String>,
    pub initial_board: Board,
    pub movetext: String,
}

impl PgnRecord {
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovetextToken {
    MoveNumber(u32),
    Move(String),
    Result(String),
}

pub fn read_pgn(pgn: &str) -> Result<PgnRecord, PgnError> {
    let mut headers = BTreeMap::<String, String>::new();
    let mut movetext_lines = Vec::<&str>::new();

    for line in pgn.lines() {
        let trimmed = line.trim();
        // `%` at column zero escapes the whole line.
        if trimmed.is_empty() || line.starts_with('%') {
            continue;
        }
        if trimmed.starts_with('[') && movetext_lines.is_empty() {
            let (key, value) = parse_header_line(trimmed)?;
            headers.insert(key, value);
        } else {
            movetext_lines.push(trimmed);
        }
    }

    let initial_board = if headers.get("SetUp").map(String::as_str) == Some("1") {
        let fen = headers.get("FEN").ok_or(PgnError::MissingSetupFen)?;
        Board::from_fen(fen)?
    } else {
        Board::new_game()
    };

    Ok(PgnRecord {
        headers,
        initial_board,
        movetext: movetext_lines.join("\n"),
    })
}

fn parse_header_line(line: &str) -> Result<(String, String), PgnError> {
    let invalid = || PgnError::InvalidHeader(line.to_owned());

    let inner = line
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(invalid)?
        .trim();
    let (key, value_raw) = inner.split_once(char::is_whitespace).ok_or_else(invalid)?;
    let value = value_raw
        .trim()
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(invalid)?;

    if key.is_empty() {
        return Err(invalid());
    }

    Ok((key.to_owned(), value.replace("\\\"", "\"").replace("\\\\", "\\")))
}

/// Split movetext into classified tokens, stopping after the result marker.
/// Unrecognisable tokens are returned in place as `Malformed` errors so the
/// caller can report where they sit.
pub fn tokenize_movetext(movetext: &str) -> Vec<Result<MovetextToken, NotationError>> {
    let cleaned = strip_comments_and_variations(movetext);
    let mut tokens = Vec::new();

    for raw in cleaned.split_whitespace() {
        if is_nag(raw) {
            continue;
        }
        if is_result_token(raw) {
            tokens.push(Ok(MovetextToken::Result(raw.to_owned())));
            break;
        }

        if let Some(caps) = MOVE_NUMBER.captures(raw) {
            match caps["number"].parse::<u32>() {
                Ok(number) => tokens.push(Ok(MovetextToken::MoveNumber(number))),
                Err(_) => {
                    tokens.push(Err(NotationError::Malformed(raw.to_owned())));
                    continue;
                }
            }

            // A move glued onto its number, as in `12.e4`.
            let rest = &caps["rest"];
            if !rest.is_empty() {
                tokens.push(classify_move(rest));
            }
            continue;
        }

        tokens.push(classify_move(raw));
    }

    tokens
}

/// Number of move tokens in `movetext`, malformed tokens excluded.
pub fn count_moves(movetext: &str) -> usize {
    tokenize_movetext(movetext)
        .iter()
        .filter(|token| matches!(token, Ok(MovetextToken::Move(_))))
        .count()
}

fn classify_move(token: &str) -> Result<MovetextToken, NotationError> {
    if is_move_shaped(token) {
        Ok(MovetextToken::Move(token.to_owned()))
    } else {
        Err(NotationError::Malformed(token.to_owned()))
    }
}

fn strip_comments_and_variations(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_brace_comment = false;
    let mut in_line_comment = false;
    let mut variation_depth = 0usize;

    for ch in text.chars() {
        if in_line_comment {
            if ch == '\n' {
                in_line_comment = false;
                out.push(' ');
            }
            continue;
        }
        if in_brace_comment {
            if ch == '}' {
                in_brace_comment = false;
                out.push(' ');
            }
            continue;
        }

        match ch {
            '{' => in_brace_comment = true,
            ';' => in_line_comment = true,
            '(' => variation_depth += 1,
            ')' => {
                variation_depth = variation_depth.saturating_sub(1);
                out.push(' ');
            }
            _ if variation_depth == 0 => out.push(ch),
            _ => {}
        }
    }

    out
}

fn is_nag(token: &str) -> bool {
    token
        .strip_prefix('$')
        .is_some_and(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
}

pub fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}
