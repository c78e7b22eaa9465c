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

use std::fmt;
use std::time::Duration;

use anyhow::Result;
#[cfg(feature = "random")]
use rand::thread_rng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{
    evaluate, find_legal_move, legal_destinations, AutoQueen, Color, LegalMove, Mask, MoveError,
    MoveRecord, Position, PromotionHandler, Square, Status, Turn,
};
use crate::engine::{select_move, Difficulty};

/// Who plays against the human at the board.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum Opponent {
    /// Both sides are moved through `attempt_move`.
    #[default]
    Human,
    Computer { side: Color, difficulty: Difficulty },
}

impl Opponent {
    pub fn computer(difficulty: Difficulty) -> Self {
        Opponent::Computer {
            side: Color::Black,
            difficulty,
        }
    }
}

/// Chosen when the game is created and fixed for its lifetime.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct GameMode {
    pub opponent: Opponent,
    /// Pause the front end may insert before showing the computer's reply.
    /// Nothing in this crate waits on it.
    pub computer_delay: Duration,
}

impl GameMode {
    pub const DEFAULT_COMPUTER_DELAY: Duration = Duration::from_millis(500);

    pub fn human() -> Self {
        Self {
            opponent: Opponent::Human,
            computer_delay: Self::DEFAULT_COMPUTER_DELAY,
        }
    }
    pub fn computer(difficulty: Difficulty) -> Self {
        Self {
            opponent: Opponent::computer(difficulty),
            computer_delay: Self::DEFAULT_COMPUTER_DELAY,
        }
    }
    /// The side and strength of the computer, if there is one.
    pub fn computer_side(&self) -> Option<(Color, Difficulty)> {
        match self.opponent {
            Opponent::Human => None,
            Opponent::Computer { side, difficulty } => Some((side, difficulty)),
        }
    }
}

impl Default for GameMode {
    fn default() -> Self {
        Self::human()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Win(Color, WinReason),
    Draw(DrawReason),
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum WinReason {
    CheckMate,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    StaleMate,
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::Win(color, WinReason::CheckMate) => {
                write!(f, "{} wins by checkmate", color)
            }
            GameResult::Draw(DrawReason::StaleMate) => write!(f, "Draw by stalemate"),
        }
    }
}

/// A single game from the initial position to checkmate or stalemate.
#[derive(Debug, Clone)]
pub struct Game {
    position: Position,
    mode: GameMode,
    status: Status,
    history: Vec<MoveRecord>,
    result: Option<GameResult>,
}

impl Game {
    pub fn new(mode: GameMode) -> Self {
        Self {
            position: Position::new(),
            mode,
            status: Status::Ongoing,
            history: Vec::new(),
            result: None,
        }
    }

    pub fn mode(&self) -> &GameMode {
        &self.mode
    }
    pub fn position(&self) -> &Position {
        &self.position
    }
    pub fn status(&self) -> Status {
        self.status
    }
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }
    #[inline]
    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// Destinations for the piece on `from`. Empty unless that piece
    /// belongs to the side to move and the game is still going.
    pub fn legal_moves(&self, from: Square) -> Mask {
        if self.is_over() || !self.is_turn_of(from) {
            return Mask::empty();
        }
        legal_destinations(&self.position, from)
    }

    /// Plays `from -> to`, promoting to a queen if a pawn reaches the last
    /// row.
    pub fn attempt_move(&mut self, from: Square, to: Square) -> Result<MoveRecord> {
        self.attempt_move_with(from, to, &mut AutoQueen)
    }

    /// Plays `from -> to`, asking `handler` what to promote to. On error the
    /// game is left untouched.
    pub fn attempt_move_with<P>(
        &mut self,
        from: Square,
        to: Square,
        handler: &mut P,
    ) -> Result<MoveRecord>
    where
        P: PromotionHandler + ?Sized,
    {
        let mv = self.validate_move(from, to)?;
        Ok(self.play(mv, handler))
    }

    /// True while the computer owes a move.
    pub fn awaiting_computer(&self) -> bool {
        match self.mode.computer_side() {
            Some((side, _)) => !self.is_over() && self.turn() == side,
            None => false,
        }
    }

    /// Lets the computer choose and play its move. Promotions are always to
    /// a queen.
    pub fn play_computer_move<R>(&mut self, rng: &mut R) -> Result<MoveRecord>
    where
        R: Rng + ?Sized,
    {
        let Some((side, difficulty)) = self.mode.computer_side() else {
            return Err(MoveError::NotComputerTurn.into());
        };
        if !self.awaiting_computer() {
            return Err(MoveError::NotComputerTurn.into());
        }
        // a side to move with no legal move would have ended the game
        let mv = select_move(&self.position, side, difficulty, rng).ok_or(MoveError::GameOver)?;
        Ok(self.play(mv, &mut AutoQueen))
    }

    #[cfg(feature = "random")]
    pub fn play_computer_move_thread_rng(&mut self) -> Result<MoveRecord> {
        self.play_computer_move(&mut thread_rng())
    }

    fn is_turn_of(&self, square: Square) -> bool {
        matches!(self.position.contents(square), Some(m) if m.color() == self.turn())
    }

    fn validate_move(&self, from: Square, to: Square) -> Result<LegalMove> {
        if self.is_over() {
            return Err(MoveError::GameOver.into());
        }
        let Some(material) = self.position.contents(from) else {
            return Err(MoveError::EmptySquare(from).into());
        };
        if material.color() != self.turn() {
            return Err(MoveError::WrongTurn(material.color()).into());
        }
        find_legal_move(&self.position, from, to).ok_or_else(|| MoveError::InvalidMove.into())
    }

    fn play<P>(&mut self, mv: LegalMove, handler: &mut P) -> MoveRecord
    where
        P: PromotionHandler + ?Sized,
    {
        let record = self.position.apply_move(mv, handler);
        self.position.toggle_turn();
        self.history.push(record);
        self.update_result();
        record
    }

    fn update_result(&mut self) {
        let turn = self.turn();
        self.status = evaluate(&self.position, turn);
        self.result = match self.status {
            Status::Checkmate => Some(GameResult::Win(!turn, WinReason::CheckMate)),
            Status::Stalemate => Some(GameResult::Draw(DrawReason::StaleMate)),
            Status::Check | Status::Ongoing => None,
        };
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameMode::default())
    }
}

impl Turn for Game {
    #[inline]
    fn turn(&self) -> Color {
        self.position.turn()
    }
}

#[cfg(test)]
impl Game {
    /// A game already in progress from `position`, whose turn it records.
    fn from_position(mode: GameMode, position: Position) -> Self {
        let mut game = Self {
            position,
            ..Self::new(mode)
        };
        game.update_result();
        game
    }
}
