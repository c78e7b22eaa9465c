// Copyright 2026 Tobin Edwards
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
use std::ops::{Index, IndexMut, Not};
use strum_macros::Display;
use strum_macros::EnumIter;

/// A piece of a specific color, as held by an occupied square.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Material {
    color: Color,
    piece: Piece,
}

impl Material {
    pub const WK: Self = Self::white(King);
    pub const WQ: Self = Self::white(Queen);
    pub const WR: Self = Self::white(Rook);
    pub const WB: Self = Self::white(Bishop);
    pub const WN: Self = Self::white(Knight);
    pub const WP: Self = Self::white(Pawn);

    pub const BK: Self = Self::black(King);
    pub const BQ: Self = Self::black(Queen);
    pub const BR: Self = Self::black(Rook);
    pub const BB: Self = Self::black(Bishop);
    pub const BN: Self = Self::black(Knight);
    pub const BP: Self = Self::black(Pawn);

    #[inline]
    pub const fn new(color: Color, piece: Piece) -> Self {
        Self { color, piece }
    }

    #[inline]
    pub const fn white(piece: Piece) -> Self {
        Self::new(White, piece)
    }

    #[inline]
    pub const fn black(piece: Piece) -> Self {
        Self::new(Black, piece)
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn piece(&self) -> Piece {
        self.piece
    }

    /// Material value signed so that White is positive.
    #[inline]
    pub fn signed_value(&self) -> i32 {
        self.piece.value() * self.color.sign()
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.piece.symbol();
        match self.color {
            White => write!(f, "{}", c.to_ascii_uppercase()),
            Black => write!(f, "{}", c),
        }
    }
}

use Color::{Black, White};

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn sign(&self) -> i32 {
        match self {
            White => 1,
            Black => -1,
        }
    }

    /// Row delta of a single pawn advance.
    #[inline]
    pub const fn forward(&self) -> isize {
        match self {
            White => -1,
            Black => 1,
        }
    }

    #[inline]
    pub const fn back_row(&self) -> usize {
        match self {
            White => 7,
            Black => 0,
        }
    }

    #[inline]
    pub const fn pawn_row(&self) -> usize {
        match self {
            White => 6,
            Black => 1,
        }
    }

    /// The row a double advance by this color passes over, and so the only
    /// row its en passant target can be on.
    #[inline]
    pub const fn passed_row(&self) -> usize {
        match self {
            White => 5,
            Black => 2,
        }
    }

    /// The row on which this color's pawns promote.
    #[inline]
    pub const fn promotion_row(&self) -> usize {
        match self {
            White => 0,
            Black => 7,
        }
    }
}

impl Not for Color {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        match self {
            White => Black,
            Black => White,
        }
    }
}

/// One value per color.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pair<T> {
    white: T,
    black: T,
}

impl<T> Pair<T> {
    pub const fn new(white: T, black: T) -> Self {
        Self { white, black }
    }
}

impl<T> Index<Color> for Pair<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, index: Color) -> &Self::Output {
        match index {
            White => &self.white,
            Black => &self.black,
        }
    }
}

impl<T> IndexMut<Color> for Pair<T> {
    #[inline(always)]
    fn index_mut(&mut self, index: Color) -> &mut Self::Output {
        match index {
            White => &mut self.white,
            Black => &mut self.black,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}
use Piece::{Bishop, King, Knight, Pawn, Queen, Rook};

impl Piece {
    pub const fn value(&self) -> i32 {
        match self {
            Pawn => 10,
            Knight => 30,
            Bishop => 30,
            Rook => 50,
            Queen => 90,
            King => 900,
        }
    }
    pub const fn symbol(&self) -> char {
        match self {
            Pawn => 'p',
            Knight => 'n',
            Bishop => 'b',
            Rook => 'r',
            Queen => 'q',
            King => 'k',
        }
    }
}

/// The kinds a pawn may promote to.
#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter)]
pub enum Promotion {
    #[default]
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl Promotion {
    /// Reads a promotion choice as offered by a dialog ("Queen", "rook",
    /// "n", ...). Anything unrecognised is a queen.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "rook" | "r" => Promotion::Rook,
            "bishop" | "b" => Promotion::Bishop,
            "knight" | "n" => Promotion::Knight,
            _ => Promotion::Queen,
        }
    }
}

impl From<Promotion> for Piece {
    fn from(value: Promotion) -> Self {
        match value {
            Promotion::Queen => Queen,
            Promotion::Rook => Rook,
            Promotion::Bishop => Bishop,
            Promotion::Knight => Knight,
        }
    }
}
