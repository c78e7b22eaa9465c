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
use std::ops::{Add, BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};
use std::ops::{Index, IndexMut};
use strum_macros::EnumIter;

/// A square on the board. Declaration order is row-major starting from the
/// top-left corner as seen by White: row 0 is the eighth rank (Black's back
/// rank) and column 0 is the a-file.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Square {
    A8, B8, C8, D8, E8, F8, G8, H8,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A1, B1, C1, D1, E1, F1, G1, H1,
}

use Square::{
    A1, A2, A3, A4, A5, A6, A7, A8, B1, B2, B3, B4, B5, B6, B7, B8, C1, C2, C3, C4, C5, C6, C7,
    C8, D1, D2, D3, D4, D5, D6, D7, D8, E1, E2, E3, E4, E5, E6, E7, E8, F1, F2, F3, F4, F5, F6,
    F7, F8, G1, G2, G3, G4, G5, G6, G7, G8, H1, H2, H3, H4, H5, H6, H7, H8,
};

pub const BOARD_SIZE: usize = 8;

impl Square {
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        const VALUES: [Square; 64] = [
            A8, B8, C8, D8, E8, F8, G8, H8,
            A7, B7, C7, D7, E7, F7, G7, H7,
            A6, B6, C6, D6, E6, F6, G6, H6,
            A5, B5, C5, D5, E5, F5, G5, H5,
            A4, B4, C4, D4, E4, F4, G4, H4,
            A3, B3, C3, D3, E3, F3, G3, H3,
            A2, B2, C2, D2, E2, F2, G2, H2,
            A1, B1, C1, D1, E1, F1, G1, H1,
        ];
        debug_assert!(index < 64);
        VALUES[index]
    }

    /// Returns the square at `(row, col)`, or `None` off the board.
    #[inline]
    pub const fn at(row: isize, col: isize) -> Option<Self> {
        if row < 0 || col < 0 || row >= BOARD_SIZE as isize || col >= BOARD_SIZE as isize {
            return None;
        }
        Some(Self::from_index(row as usize * BOARD_SIZE + col as usize))
    }

    /// Parses algebraic names such as `"e4"`.
    pub fn try_from_string(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        let file = chars.next()?.to_ascii_lowercase();
        let rank = chars.next()?;
        if chars.next().is_some() || !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }
        let col = file as isize - 'a' as isize;
        let row = '8' as isize - rank as isize;
        Self::at(row, col)
    }

    #[inline]
    pub const fn to_index(&self) -> usize {
        *self as usize
    }
    #[inline]
    pub const fn to_mask(&self) -> Mask {
        Mask::new(0x1 << (63 - self.to_index()))
    }
    #[inline]
    pub const fn row(&self) -> usize {
        self.to_index() / BOARD_SIZE
    }
    #[inline]
    pub const fn col(&self) -> usize {
        self.to_index() % BOARD_SIZE
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.col() as u8) as char;
        let rank = BOARD_SIZE - self.row();
        write!(f, "{}{}", file, rank)
    }
}

/// A displacement in `(rows, cols)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    pub rows: isize,
    pub cols: isize,
}

impl Offset {
    pub const fn new(rows: isize, cols: isize) -> Self {
        Self { rows, cols }
    }
}

impl Add<Offset> for Square {
    type Output = Option<Square>;
    fn add(self, rhs: Offset) -> Self::Output {
        Square::at(self.row() as isize + rhs.rows, self.col() as isize + rhs.cols)
    }
}

impl<T> Index<Square> for [T; 64] {
    type Output = T;
    fn index(&self, square: Square) -> &Self::Output {
        &self[square.to_index()]
    }
}

impl<T> IndexMut<Square> for [T; 64] {
    fn index_mut(&mut self, square: Square) -> &mut Self::Output {
        &mut self[square.to_index()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Direction {
    UpLeft,
    Up,
    UpRight,
    Left,
    Right,
    DownLeft,
    Down,
    DownRight,
}

use Direction::{Down, DownLeft, DownRight, Left, Right, Up, UpLeft, UpRight};

impl Direction {
    pub fn horizontals() -> impl Iterator<Item = Self> {
        [Up, Left, Right, Down].into_iter()
    }
    pub fn diagonals() -> impl Iterator<Item = Self> {
        [UpLeft, UpRight, DownLeft, DownRight].into_iter()
    }
}

impl From<Direction> for Offset {
    fn from(value: Direction) -> Self {
        match value {
            UpLeft => Self::new(-1, -1),
            Up => Self::new(-1, 0),
            UpRight => Self::new(-1, 1),
            Left => Self::new(0, -1),
            Right => Self::new(0, 1),
            DownLeft => Self::new(1, -1),
            Down => Self::new(1, 0),
            DownRight => Self::new(1, 1),
        }
    }
}

impl Add<Direction> for Square {
    type Output = Option<Square>;
    fn add(self, rhs: Direction) -> Self::Output {
        let offset: Offset = rhs.into();
        self + offset
    }
}

/// A set of squares, one bit per square. Iteration is row-major from A8.
#[derive(Clone, Serialize, Deserialize, Copy, PartialEq, Eq, Hash, Default)]
pub struct Mask(u64);

impl Mask {
    #[inline]
    pub const fn new(val: u64) -> Self {
        Self(val)
    }

    #[inline]
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn from_squares<I>(squares: I) -> Self
    where
        I: IntoIterator<Item = Square>,
    {
        squares
            .into_iter()
            .fold(Self::empty(), |mask, square| mask | square)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub const fn contains(&self, square: Square) -> bool {
        (self.0 & square.to_mask().0) != 0
    }

    pub fn iter(&self) -> MaskIter {
        MaskIter(self.0)
    }
}

impl fmt::Debug for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let square = Square::from_index(row * BOARD_SIZE + col);
                write!(f, "{}", if self.contains(square) { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl IntoIterator for Mask {
    type Item = Square;
    type IntoIter = MaskIter;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Square> for Mask {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        Self::from_squares(iter)
    }
}

impl Not for Mask {
    type Output = Self;
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

impl BitOr for Mask {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Mask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitOr<Square> for Mask {
    type Output = Self;
    fn bitor(self, rhs: Square) -> Self {
        Self(self.0 | rhs.to_mask().0)
    }
}

impl BitOrAssign<Square> for Mask {
    fn bitor_assign(&mut self, rhs: Square) {
        self.0 |= rhs.to_mask().0;
    }
}

impl BitAnd for Mask {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for Mask {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaskIter(u64);

impl Iterator for MaskIter {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 != 0 {
            let square = Square::from_index(self.0.leading_zeros() as usize);
            self.0 &= !square.to_mask().0;
            return Some(square);
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for MaskIter {}
