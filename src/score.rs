//! Territory counting and scoring.
//!
//! Scoring is territory plus prisoners. The live score leaves out komi;
//! the final score, computed once when the game ends, adds it to White.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Color};
use crate::constants::KOMI;

/// Empty points owned by each color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Territory {
    pub black: usize,
    pub white: usize,
}

impl Territory {
    pub fn of(&self, color: Color) -> usize {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }
}

/// Points per color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub black: f32,
    pub white: f32,
}

impl Score {
    pub fn of(&self, color: Color) -> f32 {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    /// The color with the strictly greater total, `None` on a tie.
    pub fn leader(&self) -> Option<Color> {
        if self.black > self.white {
            Some(Color::Black)
        } else if self.white > self.black {
            Some(Color::White)
        } else {
            None
        }
    }

    /// Absolute point difference.
    pub fn margin(&self) -> f32 {
        (self.black - self.white).abs()
    }
}

/// Classify every empty region of the board and sum owned regions per color.
///
/// A region belongs to a color when all stones bordering it are that color.
/// Regions bordered by both colors, or by no stones at all, are neutral.
/// Each empty point is visited exactly once.
pub fn calculate_territory(board: &Board) -> Territory {
    let mut territory = Territory::default();
    let mut visited = vec![false; board.area()];
    let mut stack = Vec::new();

    for start in 0..board.area() {
        if visited[start] || board.get(start).is_some() {
            continue;
        }

        let mut points = 0;
        let mut black_border = false;
        let mut white_border = false;
        visited[start] = true;
        stack.push(start);

        while let Some(pt) = stack.pop() {
            points += 1;
            for n in board.neighbors(pt) {
                match board.get(n) {
                    Some(Color::Black) => black_border = true,
                    Some(Color::White) => white_border = true,
                    None if !visited[n] => {
                        visited[n] = true;
                        stack.push(n);
                    }
                    None => {}
                }
            }
        }

        match (black_border, white_border) {
            (true, false) => territory.black += points,
            (false, true) => territory.white += points,
            _ => {}
        }
    }
    territory
}

/// Territory plus prisoners, without komi.
pub fn live_score(board: &Board, captures: [u32; 2]) -> Score {
    let territory = calculate_territory(board);
    Score {
        black: (territory.black as u32 + captures[0]) as f32,
        white: (territory.white as u32 + captures[1]) as f32,
    }
}

/// Territory plus prisoners, with komi added to White.
pub fn final_score(board: &Board, captures: [u32; 2]) -> Score {
    let mut score = live_score(board, captures);
    score.white += KOMI;
    score
}
