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

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;
use strum::IntoEnumIterator;

use super::castling::CastlingRights;
use super::material::{Color, Material, Pair, Piece};
use super::square::{Mask, Square, BOARD_SIZE};
use super::Turn;

use Color::*;
use Piece::*;

const BACK_RANK: [Piece; BOARD_SIZE] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

/// The authoritative board: the contents of every square plus the
/// auxiliary state needed to generate moves (castling rights, en passant
/// target and the color to move).
///
/// Outside this crate a position can only be read. Changes go through
/// `apply_move` (see `moves.rs`) and the turn is flipped by the owning
/// game once a move completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PositionRepr", into = "PositionRepr")]
pub struct Position {
    squares: [Option<Material>; 64],
    occupancy: Pair<Mask>,
    castling: Pair<CastlingRights>,
    en_passant: Option<Square>,
    turn: Color,
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl Position {
    /// The standard starting position, White to move.
    pub fn new() -> Self {
        let mut position = Self::empty();
        for (col, piece) in BACK_RANK.into_iter().enumerate() {
            for color in Color::iter() {
                let back = Square::from_index(color.back_row() * BOARD_SIZE + col);
                let pawn = Square::from_index(color.pawn_row() * BOARD_SIZE + col);
                position.place(back, Material::new(color, piece));
                position.place(pawn, Material::new(color, Pawn));
            }
        }
        position
    }

    /// A board with no pieces. Castling rights are intact but unusable
    /// until a king and rook stand on their original squares.
    pub fn empty() -> Self {
        Self {
            squares: [None; 64],
            occupancy: Pair::default(),
            castling: Pair::default(),
            en_passant: None,
            turn: White,
        }
    }

    #[inline]
    pub fn contents(&self, square: Square) -> Option<Material> {
        self.squares[square]
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn castling(&self, color: Color) -> &CastlingRights {
        &self.castling[color]
    }

    #[inline]
    pub fn occupied_by(&self, color: Color) -> Mask {
        self.occupancy[color]
    }

    #[inline]
    pub fn occupied(&self) -> Mask {
        self.occupancy[White] | self.occupancy[Black]
    }

    #[inline]
    pub fn is_vacant(&self, square: Square) -> bool {
        self.squares[square].is_none()
    }

    /// Every piece of `color` in row-major order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Material)> + '_ {
        self.occupancy[color]
            .iter()
            .filter_map(move |square| self.squares[square].map(|material| (square, material)))
    }

    /// The square of `color`'s king. `None` means the board is corrupt:
    /// legal play never removes a king.
    pub fn king(&self, color: Color) -> Option<Square> {
        let king = Material::new(color, King);
        self.occupancy[color]
            .iter()
            .find(|&square| self.squares[square] == Some(king))
    }

    pub(crate) fn castling_mut(&mut self, color: Color) -> &mut CastlingRights {
        &mut self.castling[color]
    }

    pub(crate) fn set_en_passant_target(&mut self, square: Option<Square>) {
        self.en_passant = square;
    }

    pub(crate) fn toggle_turn(&mut self) {
        self.turn = !self.turn;
    }

    pub(crate) fn place(&mut self, square: Square, material: Material) -> Option<Material> {
        let replaced = self.remove(square);
        self.squares[square] = Some(material);
        self.occupancy[material.color()] |= square;
        replaced
    }

    pub(crate) fn remove(&mut self, square: Square) -> Option<Material> {
        let material = self.squares[square].take()?;
        self.occupancy[material.color()] &= !square.to_mask();
        Some(material)
    }

    /// Moves whatever stands on `from` to `to` without any special-move
    /// bookkeeping. Used to probe scratch copies.
    pub(crate) fn relocate(&mut self, from: Square, to: Square) -> Option<Material> {
        let material = self.remove(from)?;
        self.place(to, material)
    }
}

impl Turn for Position {
    #[inline]
    fn turn(&self) -> Color {
        self.turn
    }
}

impl Index<Square> for Position {
    type Output = Option<Material>;
    #[inline]
    fn index(&self, index: Square) -> &Self::Output {
        &self.squares[index]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, square) in Square::iter().enumerate() {
            match self.squares[square] {
                Some(material) => write!(f, "{}", material)?,
                None => write!(f, ".")?,
            }
            if index % BOARD_SIZE == BOARD_SIZE - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct PositionRepr {
    pieces: Vec<(Square, Material)>,
    castling: Pair<CastlingRights>,
    en_passant: Option<Square>,
    turn: Color,
}

impl From<Position> for PositionRepr {
    fn from(position: Position) -> Self {
        let pieces = Color::iter()
            .flat_map(|color| position.pieces(color).collect::<Vec<_>>())
            .collect();
        Self {
            pieces,
            castling: position.castling,
            en_passant: position.en_passant,
            turn: position.turn,
        }
    }
}

impl From<PositionRepr> for Position {
    fn from(repr: PositionRepr) -> Self {
        let mut position = Position::empty();
        for (square, material) in repr.pieces {
            position.place(square, material);
        }
        position.castling = repr.castling;
        position.en_passant = repr.en_passant;
        position.turn = repr.turn;
        position
    }
}

#[cfg(test)]
impl Position {
    pub fn set_contents(mut self, square: Square, value: Option<Material>) -> Self {
        match value {
            Some(material) => {
                self.place(square, material);
            }
            None => {
                self.remove(square);
            }
        }
        self
    }
    pub fn set_turn(mut self, turn: Color) -> Self {
        self.turn = turn;
        self
    }
    pub fn set_en_passant(mut self, value: Option<Square>) -> Self {
        self.en_passant = value;
        self
    }
    /// Builds a position from `(square, material)` pairs on an empty board.
    pub fn from_pieces(pieces: &[(Square, Material)]) -> Self {
        pieces
            .iter()
            .fold(Self::empty(), |position, &(square, material)| {
                position.set_contents(square, Some(material))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Square::*;

    #[test]
    fn test_initial_position() {
        let position = Position::default();
        assert_eq!(position.turn(), White);
        assert_eq!(position[E1], Some(Material::WK));
        assert_eq!(position[D8], Some(Material::BQ));
        assert_eq!(position[A1], Some(Material::WR));
        assert_eq!(position[G8], Some(Material::BN));
        assert_eq!(position[E2], Some(Material::WP));
        assert_eq!(position[E7], Some(Material::BP));
        assert_eq!(position[E4], None);
        assert_eq!(position.occupied_by(White).len(), 16);
        assert_eq!(position.occupied_by(Black).len(), 16);
        assert_eq!(position.en_passant(), None);
    }
    #[test]
    fn test_king_lookup() {
        let position = Position::default();
        assert_eq!(position.king(White), Some(E1));
        assert_eq!(position.king(Black), Some(E8));
        let position = position.set_contents(E8, None);
        assert_eq!(position.king(Black), None);
    }
    #[test]
    fn test_place_and_remove_track_occupancy() {
        let mut position = Position::empty();
        assert_eq!(position.place(D4, Material::WN), None);
        assert!(position.occupied_by(White).contains(D4));
        assert_eq!(position.place(D4, Material::BQ), Some(Material::WN));
        assert!(!position.occupied_by(White).contains(D4));
        assert!(position.occupied_by(Black).contains(D4));
        assert_eq!(position.remove(D4), Some(Material::BQ));
        assert!(position.occupied().is_empty());
        assert_eq!(position.remove(D4), None);
    }
    #[test]
    fn test_relocate_captures_by_overwrite() {
        let mut position = Position::default().set_contents(D3, Some(Material::BN));
        assert_eq!(position.relocate(E2, D3), Some(Material::BN));
        assert_eq!(position[D3], Some(Material::WP));
        assert!(position.is_vacant(E2));
        assert!(!position.occupied_by(Black).contains(D3));
    }
    #[test]
    fn test_pieces_are_row_major() {
        let position = Position::from_pieces(&[
            (E1, Material::WK),
            (A8, Material::WR),
            (E8, Material::BK),
        ]);
        let squares: Vec<Square> = position.pieces(White).map(|(sq, _)| sq).collect();
        assert_eq!(squares, vec![A8, E1]);
    }
    #[test]
    fn test_display() {
        let text = Position::default().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "rnbqkbnr");
        assert_eq!(lines[1], "pppppppp");
        assert_eq!(lines[4], "........");
        assert_eq!(lines[7], "RNBQKBNR");
    }
}
