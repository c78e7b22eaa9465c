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
use strum_macros::Display;

use super::attacks::is_in_check;
use super::legal::legal_moves;
use super::material::Color;
use super::position::Position;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
}

impl Status {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(*self, Status::Checkmate | Status::Stalemate)
    }
}

pub fn has_legal_move(position: &Position, color: Color) -> bool {
    position
        .pieces(color)
        .any(|(from, _)| !legal_moves(position, from).is_empty())
}

/// The status of the game from the point of view of `turn`, the side about
/// to move.
pub fn evaluate(position: &Position, turn: Color) -> Status {
    assert!(
        position.king(turn).is_some() && position.king(!turn).is_some(),
        "evaluate: a king is missing\n{}",
        position
    );
    let check = is_in_check(position, turn);
    match (has_legal_move(position, turn), check) {
        (false, true) => Status::Checkmate,
        (false, false) => Status::Stalemate,
        (true, true) => Status::Check,
        (true, false) => Status::Ongoing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::material::Material;
    use crate::board::square::Square::*;
    use Color::*;

    #[test]
    fn test_start_is_ongoing() {
        let position = Position::default();
        assert_eq!(evaluate(&position, White), Status::Ongoing);
        assert_eq!(evaluate(&position, Black), Status::Ongoing);
    }
    #[test]
    fn test_check() {
        let position = Position::from_pieces(&[
            (E1, Material::WK),
            (E8, Material::BK),
            (E5, Material::BR),
        ]);
        assert_eq!(evaluate(&position, White), Status::Check);
    }
    #[test]
    fn test_back_rank_mate() {
        let position = Position::from_pieces(&[
            (G1, Material::WK),
            (F2, Material::WP),
            (G2, Material::WP),
            (H2, Material::WP),
            (A1, Material::BR),
            (G8, Material::BK),
        ]);
        assert_eq!(evaluate(&position, White), Status::Checkmate);
        assert!(evaluate(&position, White).is_terminal());
    }
    #[test]
    fn test_mate_can_be_escaped_by_capture() {
        let position = Position::from_pieces(&[
            (G1, Material::WK),
            (F2, Material::WP),
            (G2, Material::WP),
            (H2, Material::WP),
            (A1, Material::BR),
            (A4, Material::WR),
            (G8, Material::BK),
        ]);
        assert_eq!(evaluate(&position, White), Status::Check);
    }
    #[test]
    fn test_stalemate() {
        let position = Position::from_pieces(&[
            (A8, Material::BK),
            (B6, Material::WQ),
            (C1, Material::WK),
        ]);
        assert_eq!(evaluate(&position, Black), Status::Stalemate);
        assert!(!has_legal_move(&position, Black));
    }
    #[test]
    #[should_panic(expected = "a king is missing")]
    fn test_missing_king_is_loud() {
        let position = Position::from_pieces(&[(E1, Material::WK), (D8, Material::BQ)]);
        evaluate(&position, White);
    }
    #[test]
    fn test_smothered_mate() {
        let position = Position::from_pieces(&[
            (H8, Material::BK),
            (G8, Material::BR),
            (G7, Material::BP),
            (H7, Material::BP),
            (F7, Material::WN),
            (A1, Material::WK),
        ]);
        assert_eq!(evaluate(&position, Black), Status::Checkmate);
    }
}
