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
use thiserror::Error;

use super::castling::CastleSide;
use super::material::{Color, Material, Piece, Promotion};
use super::position::Position;
use super::square::{Mask, Square};

use Piece::*;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("Not a legal move")]
    InvalidMove,
    #[error("No piece on {0}")]
    EmptySquare(Square),
    #[error("It is not {0}'s turn")]
    WrongTurn(Color),
    #[error("The game is over")]
    GameOver,
    #[error("It is not the computer's turn")]
    NotComputerTurn,
}

/// A move known to be legal in the position it was generated for,
/// classified by the bookkeeping it needs. Every variant carries the
/// origin and destination squares of the moving piece (for castling, the
/// king's).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegalMove {
    Standard(Square, Square),
    DoubleAdvance(Square, Square),
    EnPassant(Square, Square),
    Promoting(Square, Square),
    ShortCastle(Square, Square),
    LongCastle(Square, Square),
}

impl LegalMove {
    #[inline]
    pub fn from(&self) -> Square {
        match *self {
            LegalMove::Standard(from, _)
            | LegalMove::DoubleAdvance(from, _)
            | LegalMove::EnPassant(from, _)
            | LegalMove::Promoting(from, _)
            | LegalMove::ShortCastle(from, _)
            | LegalMove::LongCastle(from, _) => from,
        }
    }
    #[inline]
    pub fn to(&self) -> Square {
        match *self {
            LegalMove::Standard(_, to)
            | LegalMove::DoubleAdvance(_, to)
            | LegalMove::EnPassant(_, to)
            | LegalMove::Promoting(_, to)
            | LegalMove::ShortCastle(_, to)
            | LegalMove::LongCastle(_, to) => to,
        }
    }
    pub fn castle_side(&self) -> Option<CastleSide> {
        match self {
            LegalMove::ShortCastle(..) => Some(CastleSide::Short),
            LegalMove::LongCastle(..) => Some(CastleSide::Long),
            _ => None,
        }
    }
}

/// Works out which kind of move `from -> to` is, assuming it is a
/// pseudo-legal move of the piece on `from`. `None` if `from` is empty.
pub fn classify(position: &Position, from: Square, to: Square) -> Option<LegalMove> {
    let material = position.contents(from)?;
    let mv = match material.piece() {
        Pawn if from.row().abs_diff(to.row()) == 2 => LegalMove::DoubleAdvance(from, to),
        Pawn if to.row() == material.color().promotion_row() => LegalMove::Promoting(from, to),
        Pawn if from.col() != to.col() && position.is_vacant(to) => LegalMove::EnPassant(from, to),
        King => match CastleSide::of_king_move(from, to) {
            Some(CastleSide::Short) => LegalMove::ShortCastle(from, to),
            Some(CastleSide::Long) => LegalMove::LongCastle(from, to),
            None => LegalMove::Standard(from, to),
        },
        _ => LegalMove::Standard(from, to),
    };
    Some(mv)
}

/// The pawn taken by an en passant capture: beside the origin, on the
/// destination's file.
#[inline]
pub fn en_passant_victim(from: Square, to: Square) -> Square {
    Square::from_index(from.row() * 8 + to.col())
}

/// Answers the promotion question raised while a move is being applied.
/// `None` means no answer was given, which promotes to a queen.
pub trait PromotionHandler {
    fn choose(&mut self, color: Color, square: Square) -> Option<Promotion>;
}

impl<F> PromotionHandler for F
where
    F: FnMut(Color, Square) -> Option<Promotion>,
{
    fn choose(&mut self, color: Color, square: Square) -> Option<Promotion> {
        self(color, square)
    }
}

/// Never answers, so every promotion is to a queen.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoQueen;

impl PromotionHandler for AutoQueen {
    fn choose(&mut self, _color: Color, _square: Square) -> Option<Promotion> {
        None
    }
}

/// What a single applied move changed. `changed` holds every square whose
/// contents differ afterwards, which is all a renderer needs to redraw.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub mv: LegalMove,
    pub material: Material,
    pub captured: Option<Material>,
    pub promotion: Option<Promotion>,
    pub changed: Mask,
}

impl Position {
    /// Applies a legal move: relocation, captures (including en passant),
    /// the rook half of a castle, castling rights, the en passant target
    /// and promotion. The turn is left alone; the owner flips it.
    ///
    /// # Panics
    ///
    /// Panics if `mv` was not generated for this position (no piece on the
    /// origin, or no rook to castle with). That is a bug in the caller.
    pub fn apply_move<P>(&mut self, mv: LegalMove, handler: &mut P) -> MoveRecord
    where
        P: PromotionHandler + ?Sized,
    {
        let (from, to) = (mv.from(), mv.to());
        let material = self
            .remove(from)
            .unwrap_or_else(|| panic!("apply_move: no piece on {} for {:?}", from, mv));
        let color = material.color();
        let mut changed = from.to_mask() | to;

        self.set_en_passant_target(None);
        if let LegalMove::DoubleAdvance(..) = mv {
            let passed = Square::from_index((from.row() + to.row()) / 2 * 8 + from.col());
            self.set_en_passant_target(Some(passed));
        }

        let mut captured = self.contents(to);
        if let LegalMove::EnPassant(..) = mv {
            let victim = en_passant_victim(from, to);
            captured = self.remove(victim);
            changed |= victim;
        }

        if let Some(side) = mv.castle_side() {
            let rook = self
                .remove(side.rook_src(color))
                .unwrap_or_else(|| panic!("apply_move: no rook to castle with for {:?}", mv));
            self.place(side.rook_dest(color), rook);
            changed |= side.rook_src(color);
            changed |= side.rook_dest(color);
        }

        self.castling_mut(color).update(from);
        if captured.is_some() {
            self.castling_mut(!color).update(to);
        }

        self.place(to, material);

        let mut promotion = None;
        if let LegalMove::Promoting(..) = mv {
            let choice = handler.choose(color, to).unwrap_or_default();
            self.place(to, Material::new(color, choice.into()));
            promotion = Some(choice);
        }

        MoveRecord {
            mv,
            material,
            captured,
            promotion,
            changed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::castling::CastleSide;
    use crate::board::legal::{find_legal_move, legal_destinations};
    use crate::board::Turn;
    use Color::*;
    use Square::*;

    fn play(position: &mut Position, from: Square, to: Square) -> MoveRecord {
        let mv = find_legal_move(position, from, to).expect("move should be legal");
        let record = position.apply_move(mv, &mut AutoQueen);
        position.toggle_turn();
        record
    }

    #[test]
    fn test_classify() {
        let position = Position::default()
            .set_contents(F1, None)
            .set_contents(G1, None)
            .set_contents(B7, Some(Material::WP))
            .set_contents(D5, Some(Material::WP))
            .set_contents(E5, Some(Material::BP))
            .set_en_passant(Some(E6));
        assert_eq!(classify(&position, E2, E4), Some(LegalMove::DoubleAdvance(E2, E4)));
        assert_eq!(classify(&position, E2, E3), Some(LegalMove::Standard(E2, E3)));
        assert_eq!(classify(&position, E1, G1), Some(LegalMove::ShortCastle(E1, G1)));
        assert_eq!(classify(&position, E1, F1), Some(LegalMove::Standard(E1, F1)));
        assert_eq!(classify(&position, B7, A8), Some(LegalMove::Promoting(B7, A8)));
        assert_eq!(classify(&position, B7, C8), Some(LegalMove::Promoting(B7, C8)));
        assert_eq!(classify(&position, D5, E6), Some(LegalMove::EnPassant(D5, E6)));
        assert_eq!(classify(&position, G1, F3), Some(LegalMove::Standard(G1, F3)));
        assert_eq!(classify(&position, E4, E5), None);
    }
    #[test]
    fn test_standard_move() {
        let mut position = Position::default();
        let record = play(&mut position, G1, F3);
        assert_eq!(position[F3], Some(Material::WN));
        assert_eq!(position[G1], None);
        assert_eq!(record.captured, None);
        assert_eq!(record.changed, Mask::from_squares([G1, F3]));
        assert_eq!(position.en_passant(), None);
    }
    #[test]
    fn test_turn_is_not_flipped() {
        let mut position = Position::default();
        let mv = find_legal_move(&position, E2, E4).unwrap();
        position.apply_move(mv, &mut AutoQueen);
        assert_eq!(position.turn(), White);
    }
    #[test]
    fn test_double_advance_sets_en_passant_for_one_move() {
        let mut position = Position::default();
        play(&mut position, E2, E4);
        assert_eq!(position.en_passant(), Some(E3));
        play(&mut position, G8, F6);
        assert_eq!(position.en_passant(), None);
        play(&mut position, D2, D4);
        assert_eq!(position.en_passant(), Some(D3));
    }
    #[test]
    fn test_en_passant_capture() {
        let mut position = Position::default();
        play(&mut position, E2, E4);
        play(&mut position, A7, A6);
        play(&mut position, E4, E5);
        play(&mut position, D7, D5);
        assert_eq!(position.en_passant(), Some(D6));
        assert!(legal_destinations(&position, E5).contains(D6));
        let record = play(&mut position, E5, D6);
        assert!(matches!(record.mv, LegalMove::EnPassant(E5, D6)));
        assert_eq!(record.captured, Some(Material::BP));
        assert_eq!(position[D6], Some(Material::WP));
        assert_eq!(position[D5], None);
        assert_eq!(position[E5], None);
        assert_eq!(record.changed, Mask::from_squares([E5, D6, D5]));
    }
    #[test]
    fn test_en_passant_expires() {
        let mut position = Position::default();
        play(&mut position, E2, E4);
        play(&mut position, A7, A6);
        play(&mut position, E4, E5);
        play(&mut position, D7, D5);
        play(&mut position, H2, H3);
        play(&mut position, A6, A5);
        assert!(!legal_destinations(&position, E5).contains(D6));
    }
    #[test]
    fn test_black_en_passant_capture() {
        let mut position = Position::default()
            .set_contents(D4, Some(Material::BP))
            .set_contents(D7, None);
        play(&mut position, E2, E4);
        let record = play(&mut position, D4, E3);
        assert_eq!(record.captured, Some(Material::WP));
        assert_eq!(position[E3], Some(Material::BP));
        assert_eq!(position[E4], None);
    }
    #[test]
    fn test_capture() {
        let mut position = Position::default().set_contents(D3, Some(Material::BN));
        let record = play(&mut position, E2, D3);
        assert_eq!(record.captured, Some(Material::BN));
        assert_eq!(position[D3], Some(Material::WP));
        assert_eq!(position.occupied_by(Black).len(), 16);
    }
    #[test]
    fn test_short_castle() {
        let mut position = Position::default()
            .set_contents(F1, None)
            .set_contents(G1, None);
        let record = play(&mut position, E1, G1);
        assert_eq!(record.mv, LegalMove::ShortCastle(E1, G1));
        assert_eq!(position[G1], Some(Material::WK));
        assert_eq!(position[F1], Some(Material::WR));
        assert_eq!(position[E1], None);
        assert_eq!(position[H1], None);
        assert_eq!(record.changed, Mask::from_squares([E1, F1, G1, H1]));
        let rights = position.castling(White);
        assert!(rights.king_moved());
        assert!(!rights.may_castle(CastleSide::Short));
        assert!(!rights.may_castle(CastleSide::Long));
    }
    #[test]
    fn test_long_castle() {
        let mut position = Position::default()
            .set_turn(Black)
            .set_contents(B8, None)
            .set_contents(C8, None)
            .set_contents(D8, None);
        let record = play(&mut position, E8, C8);
        assert_eq!(record.mv, LegalMove::LongCastle(E8, C8));
        assert_eq!(position[C8], Some(Material::BK));
        assert_eq!(position[D8], Some(Material::BR));
        assert_eq!(position[A8], None);
        assert_eq!(position[E8], None);
        assert!(position.castling(Black).king_moved());
    }
    #[test]
    fn test_rights_are_not_restored() {
        let mut position = Position::default()
            .set_contents(F1, None)
            .set_contents(G1, None)
            .set_contents(F8, None)
            .set_contents(G8, None);
        play(&mut position, H1, G1);
        play(&mut position, H8, G8);
        play(&mut position, G1, H1);
        play(&mut position, G8, H8);
        assert_eq!(position[H1], Some(Material::WR));
        assert_eq!(position[E1], Some(Material::WK));
        assert!(!legal_destinations(&position, E1).contains(G1));
        assert!(!position.castling(White).may_castle(CastleSide::Short));
        assert!(position.castling(White).may_castle(CastleSide::Long));
    }
    #[test]
    fn test_capturing_original_rook_clears_right() {
        let mut position = Position::default()
            .set_contents(G2, None)
            .set_contents(B7, Some(Material::BB))
            .set_turn(Black);
        play(&mut position, B7, H1);
        assert!(!position.castling(White).may_castle(CastleSide::Short));
        assert!(!position.castling(White).king_moved());
    }
    #[test]
    fn test_promotion_defaults_to_queen() {
        let mut position = Position::default()
            .set_contents(B7, Some(Material::WP));
        let record = play(&mut position, B7, A8);
        assert_eq!(record.captured, Some(Material::BR));
        assert_eq!(record.promotion, Some(Promotion::Queen));
        assert_eq!(position[A8], Some(Material::WQ));
        assert!(!position.castling(Black).may_castle(CastleSide::Long));
    }
    #[test]
    fn test_promotion_uses_handler_choice() {
        let mut position = Position::default()
            .set_turn(Black)
            .set_contents(B2, Some(Material::BP));
        let mv = find_legal_move(&position, B2, A1).unwrap();
        let mut asked = Vec::new();
        let mut handler = |color: Color, square: Square| {
            asked.push((color, square));
            Some(Promotion::Knight)
        };
        let record = position.apply_move(mv, &mut handler);
        assert_eq!(asked, vec![(Black, A1)]);
        assert_eq!(record.captured, Some(Material::WR));
        assert_eq!(record.promotion, Some(Promotion::Knight));
        assert_eq!(position[A1], Some(Material::BN));
        assert!(!position.castling(White).may_castle(CastleSide::Long));
    }
    #[test]
    fn test_promotion_by_name_falls_back_to_queen() {
        let mut position = Position::from_pieces(&[
            (E1, Material::WK),
            (E8, Material::BK),
            (A7, Material::WP),
        ]);
        let mv = find_legal_move(&position, A7, A8).unwrap();
        let mut handler = |_: Color, _: Square| Some(Promotion::from_name("Pawn"));
        position.apply_move(mv, &mut handler);
        assert_eq!(position[A8], Some(Material::WQ));
    }
}
