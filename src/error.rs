//! Error types for rejected game operations.
//!
//! A rejection never mutates state: every check runs before the board is
//! touched, so callers can always retry with a different move.

use thiserror::Error;

use crate::board::Color;

/// Why a move or pass was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    /// Coordinate lies outside the board
    #[error("illegal move: point off the board")]
    OutOfBounds,
    /// Point is not empty
    #[error("illegal move: point not empty")]
    Occupied,
    /// Move retakes the ko point
    #[error("illegal move: retakes ko")]
    Ko,
    /// Move would leave its own group without liberties and captures nothing
    #[error("illegal move: suicide")]
    Suicide,
    /// Two consecutive passes already ended the game
    #[error("game is over")]
    GameOver,
}

/// Requested board size is not one of 9, 13 or 19.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unsupported board size {0}, expected 9, 13 or 19")]
pub struct SizeError(pub usize);

/// A recorded move sequence could not be replayed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    #[error(transparent)]
    Size(#[from] SizeError),
    /// Record `index` was played by the wrong color
    #[error("move {index}: expected {expected} to play")]
    OutOfTurn { index: usize, expected: Color },
    /// Record `index` was rejected by the rules
    #[error("move {index}: {source}")]
    Rejected {
        index: usize,
        #[source]
        source: MoveError,
    },
}

/// Unknown difficulty name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty {0:?}, expected easy, medium or hard")]
pub struct DifficultyError(pub String);
