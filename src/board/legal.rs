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

use std::collections::HashMap;

use super::attacks::is_in_check;
use super::material::Color;
use super::moves::{classify, en_passant_victim, LegalMove};
use super::position::Position;
use super::rules::pseudo_moves;
use super::square::{Mask, Square};

/// The legal moves of a single piece, keyed by destination.
#[derive(Debug, Clone)]
pub struct MoveSet {
    destinations: Mask,
    map: HashMap<Square, LegalMove>,
}

impl MoveSet {
    pub fn new() -> Self {
        Self {
            destinations: Mask::empty(),
            map: HashMap::new(),
        }
    }
    pub fn insert(&mut self, dest: Square, mv: LegalMove) {
        self.destinations |= dest;
        self.map.insert(dest, mv);
    }
    pub fn destinations(&self) -> Mask {
        self.destinations
    }
    pub fn get(&self, dest: Square) -> Option<LegalMove> {
        self.map.get(&dest).copied()
    }
    pub fn contains(&self, dest: Square) -> bool {
        self.destinations.contains(dest)
    }
    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }
    pub fn len(&self) -> usize {
        self.destinations.len()
    }
    /// Moves in destination order (row-major).
    pub fn iter(&self) -> impl Iterator<Item = LegalMove> + '_ {
        self.destinations.iter().filter_map(|dest| self.get(dest))
    }
}

impl Default for MoveSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Legal moves for whichever piece stands on `from`, on behalf of that
/// piece's color. Each pseudo-move is tried on a scratch copy and kept only
/// if the mover's king is not attacked afterwards.
pub fn legal_moves(position: &Position, from: Square) -> MoveSet {
    let mut result = MoveSet::new();
    let Some(material) = position.contents(from) else {
        return result;
    };
    let color = material.color();
    for dest in pseudo_moves(position, from) {
        match classify(position, from, dest) {
            Some(mv) if leaves_king_safe(position, mv, color) => result.insert(dest, mv),
            _ => {}
        }
    }
    result
}

/// Shorthand for the destinations of `legal_moves`.
#[inline]
pub fn legal_destinations(position: &Position, from: Square) -> Mask {
    legal_moves(position, from).destinations()
}

/// Every legal move of `color`: origins in row-major order, then
/// destinations in row-major order.
pub fn all_legal_moves(position: &Position, color: Color) -> Vec<LegalMove> {
    position
        .pieces(color)
        .flat_map(|(from, _)| legal_moves(position, from).iter().collect::<Vec<_>>())
        .collect()
}

/// Looks up `from -> to` among the legal moves of the piece on `from`.
pub fn find_legal_move(position: &Position, from: Square, to: Square) -> Option<LegalMove> {
    legal_moves(position, from).get(to)
}

fn leaves_king_safe(position: &Position, mv: LegalMove, color: Color) -> bool {
    let mut scratch = position.clone();
    if let LegalMove::EnPassant(from, to) = mv {
        // the captured pawn is not on the destination square
        scratch.remove(en_passant_victim(from, to));
    }
    scratch.relocate(mv.from(), mv.to());
    !is_in_check(&scratch, color)
}
