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

use super::attacks::is_attacked;
use super::material::{Color, Material, Pair, Piece};
use super::position::Position;
use super::square::{Mask, Square};

const KING_COL: usize = 4;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    /// Towards the h-file rook.
    Short,
    /// Towards the a-file rook.
    Long,
}

impl CastleSide {
    pub const BOTH: [CastleSide; 2] = [CastleSide::Short, CastleSide::Long];

    const fn rook_col(&self) -> usize {
        match self {
            CastleSide::Short => 7,
            CastleSide::Long => 0,
        }
    }
    const fn king_dest_col(&self) -> usize {
        match self {
            CastleSide::Short => 6,
            CastleSide::Long => 2,
        }
    }
    const fn rook_dest_col(&self) -> usize {
        match self {
            CastleSide::Short => 5,
            CastleSide::Long => 3,
        }
    }

    /// The side a king move from `from` to `to` castles towards, if it is a
    /// two-file king move at all.
    pub fn of_king_move(from: Square, to: Square) -> Option<Self> {
        if from.row() != to.row() {
            return None;
        }
        match to.col() as isize - from.col() as isize {
            2 => Some(CastleSide::Short),
            -2 => Some(CastleSide::Long),
            _ => None,
        }
    }

    #[inline]
    pub fn king_src(color: Color) -> Square {
        back_rank_square(color, KING_COL)
    }
    #[inline]
    pub fn king_dest(&self, color: Color) -> Square {
        back_rank_square(color, self.king_dest_col())
    }
    #[inline]
    pub fn rook_src(&self, color: Color) -> Square {
        back_rank_square(color, self.rook_col())
    }
    #[inline]
    pub fn rook_dest(&self, color: Color) -> Square {
        back_rank_square(color, self.rook_dest_col())
    }

    /// Squares strictly between king and rook; all must be empty.
    pub fn blocking_lane(&self, color: Color) -> Mask {
        let (lo, hi) = match self {
            CastleSide::Short => (KING_COL + 1, self.rook_col()),
            CastleSide::Long => (self.rook_col() + 1, KING_COL),
        };
        (lo..hi).map(|col| back_rank_square(color, col)).collect()
    }

    /// The square the king crosses and the square it lands on; neither may
    /// be attacked. On the long side the b-file square is not included.
    pub fn attacking_lane(&self, color: Color) -> Mask {
        self.rook_dest(color).to_mask() | self.king_dest(color)
    }
}

fn back_rank_square(color: Color, col: usize) -> Square {
    Square::from_index(color.back_row() * 8 + col)
}

/// Tracks whether the original king and rooks of one color have left their
/// starting squares. Flags are only ever set.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    color: Color,
    king_moved: bool,
    short_rook_moved: bool,
    long_rook_moved: bool,
}

impl CastlingRights {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            king_moved: false,
            short_rook_moved: false,
            long_rook_moved: false,
        }
    }
    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }
    #[inline]
    pub fn king_moved(&self) -> bool {
        self.king_moved
    }
    #[inline]
    pub fn rook_moved(&self, side: CastleSide) -> bool {
        match side {
            CastleSide::Short => self.short_rook_moved,
            CastleSide::Long => self.long_rook_moved,
        }
    }
    #[inline]
    pub fn may_castle(&self, side: CastleSide) -> bool {
        !self.king_moved && !self.rook_moved(side)
    }

    /// Marks whichever original piece lives on `square` as gone, either
    /// because it moved away or because it was captured there.
    pub fn update(&mut self, square: Square) {
        if square == CastleSide::king_src(self.color) {
            self.king_moved = true;
        } else if square == CastleSide::Short.rook_src(self.color) {
            self.short_rook_moved = true;
        } else if square == CastleSide::Long.rook_src(self.color) {
            self.long_rook_moved = true;
        }
    }
}

impl Default for Pair<CastlingRights> {
    fn default() -> Self {
        Pair::new(
            CastlingRights::new(Color::White),
            CastlingRights::new(Color::Black),
        )
    }
}

/// King destinations for every castle `color` may currently perform.
pub fn castle_moves(position: &Position, color: Color) -> Mask {
    let mut result = Mask::empty();
    let king_src = CastleSide::king_src(color);
    if position[king_src] != Some(Material::new(color, Piece::King))
        || is_attacked(position, king_src, !color)
    {
        return result;
    }
    let rights = position.castling(color);
    for side in CastleSide::BOTH {
        if rights.may_castle(side)
            && position[side.rook_src(color)] == Some(Material::new(color, Piece::Rook))
            && (side.blocking_lane(color) & position.occupied()).is_empty()
            && !side
                .attacking_lane(color)
                .iter()
                .any(|square| is_attacked(position, square, !color))
        {
            result |= side.king_dest(color);
        }
    }
    result
}
