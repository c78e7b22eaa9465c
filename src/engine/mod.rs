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

//! The computer opponent.
//!
//! Two strengths are offered. `Easy` picks uniformly among the legal moves.
//! `Medium` looks one ply ahead and keeps the move that leaves the best
//! material balance for the mover; it has no notion of the reply, so it
//! will happily trade a queen for a pawn if the pawn is free right now.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use crate::board::{all_legal_moves, Color, LegalMove, Position};

#[derive(
    Debug, Display, EnumIter, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
}

/// Chooses a move for `color`. Returns `None` only if `color` has no legal
/// move.
pub fn select_move<R>(
    position: &Position,
    color: Color,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<LegalMove>
where
    R: Rng + ?Sized,
{
    let moves = all_legal_moves(position, color);
    match difficulty {
        Difficulty::Easy => moves.choose(rng).copied(),
        Difficulty::Medium => greedy_move(position, color, &moves),
    }
}

/// Sum of piece values on the board, White positive.
pub fn material_balance(position: &Position) -> i32 {
    Color::iter()
        .flat_map(|color| position.pieces(color))
        .map(|(_, material)| material.signed_value())
        .sum()
}

fn greedy_move(position: &Position, color: Color, moves: &[LegalMove]) -> Option<LegalMove> {
    let mut best: Option<(LegalMove, i32)> = None;
    for &mv in moves {
        // only the material left on the board matters for the score
        let mut scratch = position.clone();
        scratch.relocate(mv.from(), mv.to());
        let score = material_balance(&scratch) * color.sign();
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((mv, score)),
        }
    }
    best.map(|(mv, _)| mv)
}
