//! Move selection: opening book, pass policy, and alpha-beta search.
//!
//! The search is a depth-limited negamax with alpha-beta pruning over a
//! restricted candidate set (empty points next to existing stones). It runs
//! on one private clone of the caller's game and explores lines by playing
//! and taking back moves through the game's undo log, so the caller's state
//! is never touched.
//!
//! All randomness comes from the engine's own [`fastrand::Rng`]; with a fixed
//! seed and position the chosen move is always the same.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, trace};

use crate::board::{Color, Point};
use crate::constants::{DEPTH_EASY, DEPTH_HARD, DEPTH_MEDIUM, KOMI, OPENING_MOVES, PASS_EMPTY_RATIO};
use crate::error::DifficultyError;
use crate::eval::{Weights, evaluate, ordering_score};
use crate::game::Game;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl FromStr for Difficulty {
    type Err = DifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(DifficultyError(s.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

/// Search engine configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Plies searched from the root (at least 1)
    pub depth: u32,
    pub weights: Weights,
    /// Play from the opening book while the history is shorter than this
    pub opening_moves: usize,
    /// Pass when the empty fraction of the board drops below this
    pub pass_empty_ratio: f32,
}

impl SearchConfig {
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        let depth = match difficulty {
            Difficulty::Easy => DEPTH_EASY,
            Difficulty::Medium => DEPTH_MEDIUM,
            Difficulty::Hard => DEPTH_HARD,
        };
        Self {
            depth,
            weights: Weights::default(),
            opening_moves: OPENING_MOVES,
            pass_empty_ratio: PASS_EMPTY_RATIO,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::from_difficulty(Difficulty::default())
    }
}

/// Empty points next to any stone that the side to move may legally play,
/// in row-major order.
///
/// With no such point (typically an empty board), falls back to the center
/// and the four corners, again filtered to legal points.
pub fn candidate_moves(game: &Game) -> Vec<Point> {
    let board = game.board();
    let mut near = vec![false; board.area()];
    for pt in 0..board.area() {
        if board.get(pt).is_some() {
            for n in board.neighbors(pt) {
                near[n] = true;
            }
        }
    }

    let moves: Vec<Point> = (0..board.area())
        .filter(|&pt| near[pt] && game.is_legal(pt))
        .collect();
    if !moves.is_empty() {
        return moves;
    }

    let last = board.size() - 1;
    let mid = board.size() / 2;
    [(mid, mid), (0, 0), (0, last), (last, 0), (last, last)]
        .into_iter()
        .filter_map(|(r, c)| board.point(r, c))
        .filter(|&pt| game.is_legal(pt))
        .collect()
}

/// Sort candidates best-first by [`ordering_score`]. Ties keep their order.
pub fn order_moves(game: &Game, moves: &mut [Point]) {
    let mut scored: Vec<(f32, Point)> = moves
        .iter()
        .map(|&pt| (ordering_score(game, pt), pt))
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    for (slot, (_, pt)) in moves.iter_mut().zip(scored) {
        *slot = pt;
    }
}

/// Tengen plus the four points a third of the way in from each corner.
pub fn opening_points(size: usize) -> [(usize, usize); 5] {
    let center = size / 2;
    let near = size / 3;
    let far = size - near - 1;
    [
        (center, center),
        (near, near),
        (near, far),
        (far, near),
        (far, far),
    ]
}

pub struct Engine {
    config: SearchConfig,
    rng: fastrand::Rng,
    nodes: u64,
}

impl Engine {
    /// Engine with an entropy-seeded random source.
    pub fn new(config: SearchConfig) -> Self {
        Self::with_rng(config, fastrand::Rng::new())
    }

    /// Engine whose random choices are reproducible.
    pub fn with_seed(config: SearchConfig, seed: u64) -> Self {
        Self::with_rng(config, fastrand::Rng::with_seed(seed))
    }

    pub fn with_rng(config: SearchConfig, rng: fastrand::Rng) -> Self {
        Self {
            config,
            rng,
            nodes: 0,
        }
    }

    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self::new(SearchConfig::from_difficulty(difficulty))
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Nodes visited by the last call to [`Engine::choose_move`].
    pub fn nodes_searched(&self) -> u64 {
        self.nodes
    }

    /// Pick a move for the side to move as `(row, col)`, or `None` to pass.
    pub fn choose_move(&mut self, game: &Game) -> Option<(usize, usize)> {
        self.nodes = 0;
        if game.is_over() {
            return None;
        }

        if game.history().len() < self.config.opening_moves {
            if let Some(mv) = self.opening_move(game) {
                debug!(?mv, "opening move");
                return Some(mv);
            }
        }

        let mut moves = candidate_moves(game);
        if self.should_pass(game, &moves) {
            return None;
        }
        order_moves(game, &mut moves);

        let (best, score) = self.search_root(game, &moves);
        let best = best.map(|pt| game.board().row_col(pt));
        debug!(
            ?best,
            score,
            nodes = self.nodes,
            candidates = moves.len(),
            "search finished"
        );
        best
    }

    fn opening_move(&mut self, game: &Game) -> Option<(usize, usize)> {
        let legal: Vec<(usize, usize)> = opening_points(game.size())
            .into_iter()
            .filter(|&(r, c)| game.is_valid_move(r, c))
            .collect();
        if legal.is_empty() {
            return None;
        }
        Some(legal[self.rng.usize(..legal.len())])
    }

    /// Whether passing beats searching in this position.
    ///
    /// Passes with nothing to play, on a nearly full board, or to end the
    /// game after an opponent pass when already ahead with komi counted.
    pub fn should_pass(&self, game: &Game, moves: &[Point]) -> bool {
        if moves.is_empty() {
            trace!("no candidate moves");
            return true;
        }

        let board = game.board();
        if (board.empty_count() as f32) < board.area() as f32 * self.config.pass_empty_ratio {
            trace!(empty = board.empty_count(), "board nearly full");
            return true;
        }

        if game.last_move().is_some_and(|m| m.is_pass()) {
            let score = game.score();
            let lead = score.black - (score.white + KOMI);
            let ahead = match game.to_move() {
                Color::Black => lead > 0.0,
                Color::White => lead < 0.0,
            };
            trace!(lead, ahead, "opponent passed");
            return ahead;
        }
        false
    }

    fn search_root(&mut self, game: &Game, moves: &[Point]) -> (Option<Point>, f32) {
        let mut work = game.clone();
        let depth = self.config.depth.max(1);
        let mut alpha = f32::NEG_INFINITY;
        let beta = f32::INFINITY;
        let mut best = None;
        let mut best_score = f32::NEG_INFINITY;

        for &pt in moves {
            let Ok(undo) = work.play_undoable(pt) else {
                continue;
            };
            let score = -self.negamax(&mut work, depth - 1, -beta, -alpha, pt);
            work.undo(undo);

            if best.is_none() || score > best_score {
                best = Some(pt);
                best_score = score;
            }
            alpha = alpha.max(score);
        }
        (best, best_score)
    }

    /// Score of `game` for the side to move, `last` being the stone just played.
    fn negamax(
        &mut self,
        game: &mut Game,
        depth: u32,
        mut alpha: f32,
        beta: f32,
        last: Point,
    ) -> f32 {
        self.nodes += 1;
        let weights = self.config.weights;
        if depth == 0 || game.is_over() {
            return evaluate(game, game.to_move(), Some(last), &weights);
        }

        let mut moves = candidate_moves(game);
        order_moves(game, &mut moves);

        let mut best = f32::NEG_INFINITY;
        for pt in moves {
            let Ok(undo) = game.play_undoable(pt) else {
                continue;
            };
            let score = -self.negamax(game, depth - 1, -beta, -alpha, pt);
            game.undo(undo);

            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }

        if best == f32::NEG_INFINITY {
            // Nothing playable: score the position as it stands
            return evaluate(game, game.to_move(), Some(last), &weights);
        }
        best
    }
}
