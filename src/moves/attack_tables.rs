//! Attack sets for every piece kind.
//!
//! Leaper attacks (knight, king, pawn) are precomputed at compile time from
//! their offset lists. Slider attacks are traced ray by ray against the
//! occupancy mask and include the first blocker, whichever side owns it.

use crate::board::chess_types::{Color, Square};

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const WHITE_PAWN_OFFSETS: [(i32, i32); 2] = [(-1, 1), (1, 1)];
const BLACK_PAWN_OFFSETS: [(i32, i32); 2] = [(-1, -1), (1, -1)];

pub const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];
pub const ROOK_DIRECTIONS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

pub const KNIGHT_ATTACKS: [u64; 64] = leaper_table(&KNIGHT_OFFSETS);
pub const KING_ATTACKS: [u64; 64] = leaper_table(&KING_OFFSETS);
pub const WHITE_PAWN_ATTACKS: [u64; 64] = leaper_table(&WHITE_PAWN_OFFSETS);
pub const BLACK_PAWN_ATTACKS: [u64; 64] = leaper_table(&BLACK_PAWN_OFFSETS);

#[inline]
pub const fn knight_attacks(square: Square) -> u64 {
    KNIGHT_ATTACKS[square as usize]
}

#[inline]
pub const fn king_attacks(square: Square) -> u64 {
    KING_ATTACKS[square as usize]
}

/// Squares a pawn of `color` on `square` attacks diagonally.
#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> u64 {
    match color {
        Color::White => WHITE_PAWN_ATTACKS[square as usize],
        Color::Black => BLACK_PAWN_ATTACKS[square as usize],
    }
}

#[inline]
pub fn bishop_attacks(square: Square, occupancy: u64) -> u64 {
    slider_attacks(square, occupancy, &BISHOP_DIRECTIONS)
}

#[inline]
pub fn rook_attacks(square: Square, occupancy: u64) -> u64 {
    slider_attacks(square, occupancy, &ROOK_DIRECTIONS)
}

#[inline]
pub fn queen_attacks(square: Square, occupancy: u64) -> u64 {
    bishop_attacks(square, occupancy) | rook_attacks(square, occupancy)
}

fn slider_attacks(square: Square, occupancy: u64, directions: &[(i32, i32)]) -> u64 {
    let origin_file = i32::from(square % 8);
    let origin_rank = i32::from(square / 8);
    let mut attacks = 0u64;

    for &(file_step, rank_step) in directions {
        let mut file = origin_file + file_step;
        let mut rank = origin_rank + rank_step;

        while (0..8).contains(&file) && (0..8).contains(&rank) {
            let bit = 1u64 << (rank * 8 + file);
            attacks |= bit;
            if occupancy & bit != 0 {
                break;
            }
            file += file_step;
            rank += rank_step;
        }
    }

    attacks
}

const fn leaper_table(offsets: &[(i32, i32)]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;
        let mut i = 0usize;

        while i < offsets.len() {
            let (df, dr) = offsets[i];
            attacks |= bit_if_on_board(file + df, rank + dr);
            i += 1;
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}

const fn bit_if_on_board(file: i32, rank: i32) -> u64 {
    if file < 0 || file > 7 || rank < 0 || rank > 7 {
        return 0;
    }
    1u64 << (rank * 8 + file)
}

#[cfg(test)]
mod tests {
    use super::*;

    const A1: Square = 0;
    const C1: Square = 2;
    const E2: Square = 12;
    const D4: Square = 27;
    const E7: Square = 52;

    #[test]
    fn leaper_counts_at_center_and_corner() {
        assert_eq!(knight_attacks(D4).count_ones(), 8);
        assert_eq!(knight_attacks(A1).count_ones(), 2);
        assert_eq!(king_attacks(A1).count_ones(), 3);
        assert_eq!(king_attacks(D4).count_ones(), 8);
    }

    #[test]
    fn pawn_attacks_point_toward_the_enemy() {
        assert_eq!(pawn_attacks(Color::White, E2), (1u64 << 19) | (1u64 << 21));
        assert_eq!(pawn_attacks(Color::Black, E7), (1u64 << 43) | (1u64 << 45));
        // a-file pawn has a single capture square
        assert_eq!(pawn_attacks(Color::White, 8).count_ones(), 1);
    }

    #[test]
    fn empty_board_ray_lengths() {
        assert_eq!(bishop_attacks(D4, 0).count_ones(), 13);
        assert_eq!(rook_attacks(D4, 0).count_ones(), 14);
        assert_eq!(queen_attacks(D4, 0).count_ones(), 27);
    }

    #[test]
    fn blocker_is_included_and_stops_the_ray() {
        let blocker_on_e3 = 1u64 << 20;
        let attacks = bishop_attacks(C1, blocker_on_e3);
        assert_ne!(attacks & (1u64 << 20), 0);
        assert_eq!(attacks & (1u64 << 29), 0);

        let blocker_on_a4 = 1u64 << 24;
        let attacks = rook_attacks(A1, blocker_on_a4);
        assert_ne!(attacks & (1u64 << 24), 0);
        assert_eq!(attacks & (1u64 << 32), 0);
    }
}
