//! The N×N grid, stone groups, liberties and capture detection.
//!
//! Points are packed indices (`row * size + col`) into a flat cell vector.
//! Flood fills track membership with index-addressed `Vec<bool>` maps, so
//! no hashing is involved anywhere in group or region analysis.

use std::array;
use std::fmt;
use std::iter::Flatten;

use serde::{Deserialize, Serialize};

/// Stone color. Empty cells are `None` in an `Option<Color>`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
}

impl Color {
    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Slot for per-color tallies (`[black, white]`).
    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            Color::Black => 0,
            Color::White => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => f.write_str("black"),
            Color::White => f.write_str("white"),
        }
    }
}

/// A point on the board, packed as `row * size + col`.
pub type Point = usize;

/// Orthogonal neighbors of a point, already clipped to the board.
pub type Neighbors = Flatten<array::IntoIter<Option<Point>, 4>>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Color>>,
}

impl Board {
    /// Create an empty board. Size validation happens in [`crate::game::Game::new`].
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of points on the board.
    #[inline]
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// Pack `(row, col)`, or `None` if it lies off the board.
    #[inline]
    pub fn point(&self, row: usize, col: usize) -> Option<Point> {
        (row < self.size && col < self.size).then_some(row * self.size + col)
    }

    #[inline]
    pub fn row_col(&self, pt: Point) -> (usize, usize) {
        (pt / self.size, pt % self.size)
    }

    #[inline]
    pub fn get(&self, pt: Point) -> Option<Color> {
        self.cells.get(pt).copied().flatten()
    }

    /// Stone at `(row, col)`; off-board coordinates read as empty.
    pub fn at(&self, row: usize, col: usize) -> Option<Color> {
        self.point(row, col).and_then(|pt| self.get(pt))
    }

    #[inline]
    pub(crate) fn set(&mut self, pt: Point, stone: Option<Color>) {
        self.cells[pt] = stone;
    }

    /// Read-only view of the grid, one slice per row from the top.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<Color>]> {
        self.cells.chunks(self.size)
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Up, down, left, right, skipping directions that leave the board.
    pub fn neighbors(&self, pt: Point) -> Neighbors {
        let s = self.size;
        let (row, col) = self.row_col(pt);
        [
            (row > 0).then(|| pt - s),
            (row + 1 < s).then(|| pt + s),
            (col > 0).then(|| pt - 1),
            (col + 1 < s).then(|| pt + 1),
        ]
        .into_iter()
        .flatten()
    }

    /// All stones connected to `start` through same-colored orthogonal steps.
    ///
    /// Returns an empty group when `start` is empty.
    pub fn find_group(&self, start: Point) -> Vec<Point> {
        let Some(color) = self.get(start) else {
            return Vec::new();
        };
        let mut visited = vec![false; self.area()];
        let mut stack = vec![start];
        let mut group = Vec::new();
        visited[start] = true;

        while let Some(pt) = stack.pop() {
            group.push(pt);
            for n in self.neighbors(pt) {
                if !visited[n] && self.get(n) == Some(color) {
                    visited[n] = true;
                    stack.push(n);
                }
            }
        }
        group
    }

    /// True if any stone of the group touches an empty point.
    pub fn has_liberties(&self, group: &[Point]) -> bool {
        group
            .iter()
            .any(|&pt| self.neighbors(pt).any(|n| self.get(n).is_none()))
    }

    /// Number of distinct empty points adjacent to the group.
    pub fn liberty_count(&self, group: &[Point]) -> usize {
        let mut seen = vec![false; self.area()];
        let mut libs = 0;
        for &pt in group {
            for n in self.neighbors(pt) {
                if self.get(n).is_none() && !seen[n] {
                    seen[n] = true;
                    libs += 1;
                }
            }
        }
        libs
    }

    /// Opponent stones left without liberties by the stone standing at `pt`.
    ///
    /// Every neighboring enemy group with zero liberties contributes all of
    /// its members; a group touching `pt` on several sides is counted once.
    pub fn find_captures(&self, pt: Point) -> Vec<Point> {
        let Some(color) = self.get(pt) else {
            return Vec::new();
        };
        let opp = color.opponent();
        let mut marked = vec![false; self.area()];
        let mut captured = Vec::new();

        for n in self.neighbors(pt) {
            if marked[n] || self.get(n) != Some(opp) {
                continue;
            }
            let group = self.find_group(n);
            for &g in &group {
                marked[g] = true;
            }
            if !self.has_liberties(&group) {
                captured.extend(group);
            }
        }
        captured
    }

    /// Board after `color` plays the empty point `pt`, with captures removed.
    ///
    /// Also returns the removed stones. `self` is left untouched.
    pub fn after_placement(&self, pt: Point, color: Color) -> (Board, Vec<Point>) {
        let mut next = self.clone();
        next.set(pt, Some(color));
        let captured = next.find_captures(pt);
        for &c in &captured {
            next.set(c, None);
        }
        (next, captured)
    }
}

/// Column letters as used by Go coordinates (no 'I').
pub(crate) const COLUMN_LETTERS: &[u8] = b"ABCDEFGHJKLMNOPQRST";

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header: String = COLUMN_LETTERS[..self.size]
            .iter()
            .map(|&c| format!("{} ", c as char))
            .collect();
        writeln!(f, "   {}", header.trim_end())?;
        for (row, cells) in self.rows().enumerate() {
            let label = self.size - row;
            write!(f, "{label:>2} ")?;
            for (col, cell) in cells.iter().enumerate() {
                let ch = match cell {
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                    None => '.',
                };
                if col + 1 < self.size {
                    write!(f, "{ch} ")?;
                } else {
                    write!(f, "{ch}")?;
                }
            }
            writeln!(f, " {label}")?;
        }
        Ok(())
    }
}
