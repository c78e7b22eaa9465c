// Copyright 2023 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

//! Per-piece movement rules. Everything here ignores whether the move
//! would leave the mover's own king attacked; see `legal.rs` for that.

use once_cell::sync::Lazy;
use strum::IntoEnumIterator;

use super::castling::castle_moves;
use super::material::{Color, Pair, Piece};
use super::position::Position;
use super::square::{Direction, Mask, Offset, Square};

use Color::*;
use Piece::*;

/// Pseudo-legal destinations for the piece on `from`; empty if the square
/// is vacant.
pub fn pseudo_moves(position: &Position, from: Square) -> Mask {
    let Some(material) = position.contents(from) else {
        return Mask::empty();
    };
    let color = material.color();
    match material.piece() {
        Pawn => pawn_moves(position, from, color),
        Knight => knight_moves(position, from, color),
        Bishop => line_moves(position, from, color, Direction::diagonals()),
        Rook => line_moves(position, from, color, Direction::horizontals()),
        Queen => line_moves(position, from, color, Direction::iter()),
        King => king_steps(position, from, color) | castle_moves(position, color),
    }
}

/// The two forward diagonals, whether or not anything stands on them.
#[inline]
pub fn pawn_attacks(color: Color, from: Square) -> Mask {
    PAWN_ATTACKS[color][from]
}

pub(super) fn king_steps(position: &Position, from: Square, color: Color) -> Mask {
    KING_MOVES[from] & !position.occupied_by(color)
}

pub(super) fn knight_moves(position: &Position, from: Square, color: Color) -> Mask {
    KNIGHT_MOVES[from] & !position.occupied_by(color)
}

pub(super) fn line_moves<I>(position: &Position, from: Square, color: Color, directions: I) -> Mask
where
    I: Iterator<Item = Direction>,
{
    let mut result = Mask::empty();
    for dir in directions {
        let mut next = from + dir;
        while let Some(square) = next {
            match position.contents(square) {
                None => result |= square,
                Some(material) => {
                    // the ray stops here, capturing only an opposing piece
                    if material.color() != color {
                        result |= square;
                    }
                    break;
                }
            }
            next = square + dir;
        }
    }
    result
}

fn pawn_moves(position: &Position, from: Square, color: Color) -> Mask {
    let mut result = Mask::empty();
    let forward = Offset::new(color.forward(), 0);
    if let Some(single) = from + forward {
        if position.is_vacant(single) {
            result |= single;
            if from.row() == color.pawn_row() {
                if let Some(double) = single + forward {
                    if position.is_vacant(double) {
                        result |= double;
                    }
                }
            }
        }
    }
    for dest in pawn_attacks(color, from) {
        let capture = matches!(position.contents(dest), Some(m) if m.color() != color);
        // the target only counts if the opponent made the double advance
        let en_passant =
            position.en_passant() == Some(dest) && dest.row() == (!color).passed_row();
        if capture || en_passant {
            result |= dest;
        }
    }
    result
}

static KING_MOVES: Lazy<[Mask; 64]> = Lazy::new(|| {
    let mut array = [Mask::default(); 64];
    for square in Square::iter() {
        array[square] = Direction::iter().filter_map(|dir| square + dir).collect();
    }
    array
});

static KNIGHT_MOVES: Lazy<[Mask; 64]> = Lazy::new(|| {
    const OFFSETS: [Offset; 8] = [
        Offset::new(-2, -1),
        Offset::new(-2, 1),
        Offset::new(-1, -2),
        Offset::new(-1, 2),
        Offset::new(1, -2),
        Offset::new(1, 2),
        Offset::new(2, -1),
        Offset::new(2, 1),
    ];
    let mut array = [Mask::default(); 64];
    for square in Square::iter() {
        array[square] = OFFSETS.into_iter().filter_map(|offset| square + offset).collect();
    }
    array
});

static PAWN_ATTACKS: Lazy<Pair<[Mask; 64]>> = Lazy::new(|| {
    let attacks = |color: Color| {
        let offsets = [
            Offset::new(color.forward(), -1),
            Offset::new(color.forward(), 1),
        ];
        let mut array = [Mask::default(); 64];
        for square in Square::iter() {
            array[square] = offsets.into_iter().filter_map(|offset| square + offset).collect();
        }
        array
    };
    Pair::new(attacks(White), attacks(Black))
});
