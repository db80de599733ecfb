//! Game state and rules: legality, captures, ko, passes and game end.
//!
//! A [`Game`] changes only through [`Game::play`] and [`Game::pass`]. Both
//! validate first and mutate second, so a rejected call leaves the game
//! exactly as it was. Two consecutive passes end the game and freeze it.
//!
//! The search engine explores hypothetical lines with an undo log
//! ([`Game::play_undoable`] / [`Game::undo`]) instead of cloning per branch.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::board::{Board, Color, Point};
use crate::constants::{DEFAULT_SIZE, SUPPORTED_SIZES};
use crate::error::{MoveError, ReplayError, SizeError};
use crate::score::{self, Score, Territory};

/// One entry of the game history. Never modified once recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveRecord {
    Place { row: usize, col: usize, color: Color },
    Pass { color: Color },
}

impl MoveRecord {
    pub fn color(&self) -> Color {
        match *self {
            MoveRecord::Place { color, .. } | MoveRecord::Pass { color } => color,
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, MoveRecord::Pass { .. })
    }
}

/// Everything needed to take back one placement.
#[derive(Debug)]
pub(crate) struct Undo {
    point: Point,
    captured: Vec<Point>,
    ko: Option<Point>,
    passes: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    board: Board,
    to_move: Color,
    /// Prisoners taken, indexed by [`Color::index`]
    captures: [u32; 2],
    history: Vec<MoveRecord>,
    ko: Option<Point>,
    passes: u8,
    /// Set once, when the second consecutive pass ends the game
    final_score: Option<Score>,
    winner: Option<Color>,
}

impl Default for Game {
    /// An empty game on the default 9×9 board.
    fn default() -> Self {
        Self {
            board: Board::new(DEFAULT_SIZE),
            to_move: Color::Black,
            captures: [0, 0],
            history: Vec::new(),
            ko: None,
            passes: 0,
            final_score: None,
            winner: None,
        }
    }
}

impl Game {
    /// Start a game on an empty `size`×`size` board with Black to move.
    pub fn new(size: usize) -> Result<Self, SizeError> {
        if !SUPPORTED_SIZES.contains(&size) {
            return Err(SizeError(size));
        }
        Ok(Self {
            board: Board::new(size),
            ..Self::default()
        })
    }

    /// A fresh game on a board of the same size.
    pub fn restart(&self) -> Self {
        Self {
            board: Board::new(self.size()),
            ..Self::default()
        }
    }

    /// Rebuild a game by playing `moves` in order on an empty board.
    pub fn replay(size: usize, moves: &[MoveRecord]) -> Result<Self, ReplayError> {
        let mut game = Game::new(size)?;
        for (index, record) in moves.iter().enumerate() {
            if record.color() != game.to_move {
                return Err(ReplayError::OutOfTurn {
                    index,
                    expected: game.to_move,
                });
            }
            let result = match *record {
                MoveRecord::Place { row, col, .. } => game.play(row, col).map(drop),
                MoveRecord::Pass { .. } => game.pass(),
            };
            result.map_err(|source| ReplayError::Rejected { index, source })?;
        }
        Ok(game)
    }

    /// The game as it stood after the first `n` history records.
    pub fn position_after(&self, n: usize) -> Result<Self, ReplayError> {
        let n = n.min(self.history.len());
        Game::replay(self.size(), &self.history[..n])
    }

    /// The game without its last history record, or `None` at the start.
    pub fn undo_last(&self) -> Option<Result<Self, ReplayError>> {
        let len = self.history.len();
        (len > 0).then(|| self.position_after(len - 1))
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.board.size()
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn to_move(&self) -> Color {
        self.to_move
    }

    /// Prisoners taken so far by `color`.
    #[inline]
    pub fn captures(&self, color: Color) -> u32 {
        self.captures[color.index()]
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    /// The point the side to move may not play this turn, as `(row, col)`.
    pub fn ko(&self) -> Option<(usize, usize)> {
        self.ko.map(|pt| self.board.row_col(pt))
    }

    pub fn consecutive_passes(&self) -> u8 {
        self.passes
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.final_score.is_some()
    }

    /// Winner of a finished game.
    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    /// Score of a finished game, komi included.
    pub fn final_score(&self) -> Option<Score> {
        self.final_score
    }

    /// In-progress score: territory plus prisoners, no komi.
    pub fn score(&self) -> Score {
        score::live_score(&self.board, self.captures)
    }

    pub fn territory(&self) -> Territory {
        score::calculate_territory(&self.board)
    }

    /// Would the side to move be allowed to play `(row, col)`?
    pub fn is_valid_move(&self, row: usize, col: usize) -> bool {
        self.check_move(row, col).is_ok()
    }

    /// Like [`Game::is_valid_move`], but says why a move is illegal.
    pub fn check_move(&self, row: usize, col: usize) -> Result<Point, MoveError> {
        let pt = self.board.point(row, col).ok_or(MoveError::OutOfBounds)?;
        self.check_point(pt)?;
        Ok(pt)
    }

    /// Legality of a packed point for the side to move. Never mutates.
    pub(crate) fn check_point(&self, pt: Point) -> Result<(), MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        if self.board.get(pt).is_some() {
            return Err(MoveError::Occupied);
        }
        if self.ko == Some(pt) {
            return Err(MoveError::Ko);
        }
        // Captures resolve before the suicide test
        let (after, _) = self.board.after_placement(pt, self.to_move);
        if !after.has_liberties(&after.find_group(pt)) {
            return Err(MoveError::Suicide);
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn is_legal(&self, pt: Point) -> bool {
        self.check_point(pt).is_ok()
    }

    /// Place a stone for the side to move.
    ///
    /// Returns the captured points as `(row, col)`.
    pub fn play(&mut self, row: usize, col: usize) -> Result<Vec<(usize, usize)>, MoveError> {
        let pt = self.check_move(row, col)?;
        let undo = self.place(pt);
        Ok(undo
            .captured
            .iter()
            .map(|&c| self.board.row_col(c))
            .collect())
    }

    /// Play the packed point `pt` and return the record that takes it back.
    pub(crate) fn play_undoable(&mut self, pt: Point) -> Result<Undo, MoveError> {
        self.check_point(pt)?;
        Ok(self.place(pt))
    }

    /// Apply a placement already known to be legal.
    fn place(&mut self, pt: Point) -> Undo {
        let color = self.to_move;
        self.board.set(pt, Some(color));
        let captured = self.board.find_captures(pt);
        for &c in &captured {
            self.board.set(c, None);
        }
        if !captured.is_empty() {
            trace!(%color, stones = captured.len(), "captured");
        }
        self.captures[color.index()] += captured.len() as u32;

        let undo = Undo {
            point: pt,
            ko: self.ko,
            passes: self.passes,
            captured,
        };

        self.ko = match undo.captured.as_slice() {
            [single] => Some(*single),
            _ => None,
        };
        let (row, col) = self.board.row_col(pt);
        self.history.push(MoveRecord::Place { row, col, color });
        self.passes = 0;
        self.to_move = color.opponent();
        undo
    }

    /// Take back the placement described by `undo`.
    ///
    /// Must be called in reverse order of the matching `play_undoable` calls.
    pub(crate) fn undo(&mut self, undo: Undo) {
        let mover = self.to_move.opponent();
        self.history.pop();
        self.board.set(undo.point, None);
        for &c in &undo.captured {
            self.board.set(c, Some(mover.opponent()));
        }
        self.captures[mover.index()] -= undo.captured.len() as u32;
        self.ko = undo.ko;
        self.passes = undo.passes;
        self.to_move = mover;
    }

    /// Pass the turn. The second consecutive pass ends the game.
    pub fn pass(&mut self) -> Result<(), MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        let color = self.to_move;
        self.passes += 1;
        self.ko = None;
        self.history.push(MoveRecord::Pass { color });
        self.to_move = color.opponent();

        if self.passes >= 2 {
            self.end_game();
        }
        Ok(())
    }

    fn end_game(&mut self) {
        let score = score::final_score(&self.board, self.captures);
        self.winner = score.leader();
        self.final_score = Some(score);
        debug!(
            black = score.black,
            white = score.white,
            winner = ?self.winner,
            "game over"
        );
    }
}
