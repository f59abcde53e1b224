//! Square name conversions (`e4` <-> index).

use crate::board::chess_types::{make_square, square_file, square_rank, Square};

/// Parse a square name such as `"e4"`.
#[inline]
pub fn algebraic_to_square(name: &str) -> Option<Square> {
    let &[file, rank] = name.as_bytes() else {
        return None;
    };

    Some(make_square(file_from_char(file as char)?, rank_from_char(rank as char)?))
}

/// Render a square index (`0..=63`) as its name, e.g. `28 -> "e4"`.
#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    debug_assert!(square < 64, "square index out of bounds: {square}");
    format!("{}{}", file_to_char(square_file(square)), rank_to_char(square_rank(square)))
}

#[inline]
pub fn file_from_char(ch: char) -> Option<u8> {
    ('a'..='h').contains(&ch).then(|| ch as u8 - b'a')
}

#[inline]
pub fn rank_from_char(ch: char) -> Option<u8> {
    ('1'..='8').contains(&ch).then(|| ch as u8 - b'1')
}

#[inline]
pub fn file_to_char(file: u8) -> char {
    char::from(b'a' + file)
}

#[inline]
pub fn rank_to_char(rank: u8) -> char {
    char::from(b'1' + rank)
}
