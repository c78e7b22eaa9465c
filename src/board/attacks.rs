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

use strum::IntoEnumIterator;

use super::material::{Color, Piece};
use super::position::Position;
use super::rules::{king_steps, knight_moves, line_moves, pawn_attacks};
use super::square::{Direction, Mask, Square};

use Piece::*;

/// Squares attacked by the piece on `from`.
///
/// This differs from the pseudo-moves in two places: pawns attack both
/// forward diagonals whether or not anything stands there, and kings never
/// attack through castling. Must not depend on the legality filter.
pub fn attacks(position: &Position, from: Square) -> Mask {
    let Some(material) = position.contents(from) else {
        return Mask::empty();
    };
    let color = material.color();
    match material.piece() {
        Pawn => pawn_attacks(color, from),
        Knight => knight_moves(position, from, color),
        Bishop => line_moves(position, from, color, Direction::diagonals()),
        Rook => line_moves(position, from, color, Direction::horizontals()),
        Queen => line_moves(position, from, color, Direction::iter()),
        King => king_steps(position, from, color),
    }
}

/// All pieces of color `by` attacking `square`.
pub fn attackers(position: &Position, square: Square, by: Color) -> Mask {
    position
        .pieces(by)
        .filter(|&(from, _)| attacks(position, from).contains(square))
        .map(|(from, _)| from)
        .collect()
}

pub fn is_attacked(position: &Position, square: Square, by: Color) -> bool {
    position
        .pieces(by)
        .any(|(from, _)| attacks(position, from).contains(square))
}

/// Whether `color`'s king is attacked. A missing king counts as in check;
/// under legal play that never happens.
pub fn is_in_check(position: &Position, color: Color) -> bool {
    match position.king(color) {
        Some(king) => is_attacked(position, king, !color),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::material::Material;
    use Color::*;
    use Square::*;

    #[test]
    fn test_initial_attacks() {
        let position = Position::default();
        assert!(is_attacked(&position, E3, White));
        assert!(is_attacked(&position, F3, White));
        assert!(!is_attacked(&position, E4, White));
        assert!(is_attacked(&position, E6, Black));
        assert!(!is_attacked(&position, E5, Black));
        assert!(!is_in_check(&position, White));
        assert!(!is_in_check(&position, Black));
    }
    #[test]
    fn test_pawn_attacks_empty_diagonals() {
        let position = Position::from_pieces(&[(D4, Material::BP)]);
        assert!(is_attacked(&position, C3, Black));
        assert!(is_attacked(&position, E3, Black));
        assert!(!is_attacked(&position, D3, Black));
    }
    #[test]
    fn test_attackers() {
        let position = Position::from_pieces(&[
            (E4, Material::WK),
            (E8, Material::BR),
            (C3, Material::BN),
            (D5, Material::BP),
            (H2, Material::BB),
        ]);
        assert_eq!(
            attackers(&position, E4, Black),
            Mask::from_squares([E8, C3, D5])
        );
        assert!(is_in_check(&position, White));
    }
    #[test]
    fn test_blocked_slider_does_not_attack() {
        let position = Position::from_pieces(&[
            (E1, Material::WK),
            (E2, Material::WP),
            (E8, Material::BR),
        ]);
        assert!(!is_in_check(&position, White));
    }
    #[test]
    fn test_king_attacks_adjacent_only() {
        let position = Position::default()
            .set_contents(F8, None)
            .set_contents(G8, None);
        assert!(attacks(&position, E8).contains(F8));
        assert!(!attacks(&position, E8).contains(G8));
        assert_eq!(attackers(&position, G8, Black), H8.to_mask());
    }
    #[test]
    fn test_missing_king_counts_as_check() {
        let position = Position::from_pieces(&[(E8, Material::BK)]);
        assert!(is_in_check(&position, White));
    }
}
