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

//! Chess board and the rules of standard chess
//!
//! A _board_ holds the state of a chess game between two players and
//! decides which moves are legal. The following features are supported:
//!
//! [x] Standard chess movement for all six pieces
//! [x] Castling on both sides, with the usual king safety rules
//! [x] En passant
//! [x] Promotion, with the choice of piece delegated to the caller
//! [x] Check, checkmate and stalemate
//! [ ] Draws by repetition, the fifty-move rule or insufficient material
//! [ ] Chess960
//!
//! Some of the key abstractions include:
//!
//! * A `Square` represents the coordinates for a single square on an
//!   8-by-8 board. Squares are numbered in row-major order starting at
//!   `A8` (row 0, column 0) and ending at `H1` (row 7, column 7), so
//!   White's back rank is row 7 and Black's is row 0.
//!
//! * A `Mask` is a 64-bit (u64) value in which each bit maps to a
//!   square on the board. Masks are used for the squares a color
//!   occupies and for the destinations of a piece. They can be combined
//!   with the bitwise `|`, `|=`, `&`, `&=` and `!` operators, and they
//!   iterate in square order. That order is the enumeration order of
//!   moves everywhere in this crate.
//!
//! * `Material` is a `Piece` of a specific `Color`. `Promotion` has
//!   only the four variants a pawn may become and converts into a
//!   `Piece` with `From<Promotion>`.
//!
//! * A `Position` holds the contents of each square, the castling
//!   rights, the en passant target and whose turn it is. The only
//!   public way to change a position is `apply_move`, which takes a
//!   `LegalMove` and returns a `MoveRecord` describing what changed.
//!   It does not toggle the turn; `Game` does that.
//!
//! * `legal_moves` filters the pseudo-moves of a piece (see `rules`) by
//!   trying each one on a scratch position and discarding those that
//!   leave the mover's king attacked. `evaluate` turns the result into
//!   a `Status`.
//!

mod attacks;
mod castling;
mod legal;
mod material;
mod moves;
mod position;
mod rules;
mod square;
mod status;

pub use attacks::*;
pub use castling::*;
pub use legal::*;
pub use material::*;
pub use moves::*;
pub use position::*;
pub use rules::*;
pub use square::*;
pub use status::*;

pub trait Turn {
    fn turn(&self) -> Color;
}
