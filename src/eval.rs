//! Static evaluation and move-ordering heuristics.
//!
//! [`evaluate`] scores a position at the search horizon. [`ordering_score`]
//! is a much cheaper guess used only to sort candidates before searching
//! them; it never decides which move is finally chosen.

use crate::board::{Board, Color, Point};
use crate::constants::{
    ORDER_CAPTURE, ORDER_CENTER, ORDER_LIBERTY, WEIGHT_CAPTURES, WEIGHT_CENTER, WEIGHT_EDGE,
    WEIGHT_INFLUENCE, WEIGHT_LIBERTIES, WEIGHT_TERRITORY,
};
use crate::game::Game;
use crate::score::calculate_territory;

/// Evaluation weights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    /// Per point of territory lead
    pub territory: f32,
    /// Per prisoner of capture lead
    pub captures: f32,
    /// Per liberty of the group holding the last stone
    pub liberties: f32,
    /// Per friendly stone next to the last stone
    pub influence: f32,
    /// Per unit of distance between the last stone and the center
    pub center: f32,
    /// Added once when the last stone is on the first line
    pub edge: f32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            territory: WEIGHT_TERRITORY,
            captures: WEIGHT_CAPTURES,
            liberties: WEIGHT_LIBERTIES,
            influence: WEIGHT_INFLUENCE,
            center: WEIGHT_CENTER,
            edge: WEIGHT_EDGE,
        }
    }
}

/// Manhattan distance from `pt` to the middle of the board.
pub fn center_distance(board: &Board, pt: Point) -> f32 {
    let mid = (board.size() - 1) as f32 / 2.0;
    let (row, col) = board.row_col(pt);
    (row as f32 - mid).abs() + (col as f32 - mid).abs()
}

fn on_first_line(board: &Board, pt: Point) -> bool {
    let (row, col) = board.row_col(pt);
    let last = board.size() - 1;
    row == 0 || col == 0 || row == last || col == last
}

/// Evaluate `game` from `perspective`'s side; higher is better for it.
///
/// Territory and prisoner leads always count. When `last` names a stone on
/// the board, the local shape of that stone is added for its owner and
/// subtracted for the other side, scaled so it only separates moves that
/// win the same material.
pub fn evaluate(game: &Game, perspective: Color, last: Option<Point>, weights: &Weights) -> f32 {
    let board = game.board();
    let opp = perspective.opponent();

    let territory = calculate_territory(board);
    let mut score =
        (territory.of(perspective) as f32 - territory.of(opp) as f32) * weights.territory;
    score += (game.captures(perspective) as f32 - game.captures(opp) as f32) * weights.captures;

    if let Some(pt) = last {
        if let Some(color) = board.get(pt) {
            let local = bounded_local(stone_terms(board, pt, color, weights), weights);
            score += if color == perspective { local } else { -local };
        }
    }
    score
}

/// Squash local shape into `(-captures / 2, captures / 2)`.
///
/// The difference between any two moves' shape terms stays below one
/// prisoner, so a capture is never traded for a nicer-looking quiet move.
fn bounded_local(local: f32, weights: &Weights) -> f32 {
    weights.captures / 2.0 * local / (1.0 + local.abs())
}

fn stone_terms(board: &Board, pt: Point, color: Color, weights: &Weights) -> f32 {
    let group = board.find_group(pt);
    let liberties = board.liberty_count(&group) as f32;
    let friends = board
        .neighbors(pt)
        .filter(|&n| board.get(n) == Some(color))
        .count() as f32;

    let mut score = liberties * weights.liberties + friends * weights.influence
        - center_distance(board, pt) * weights.center;
    if on_first_line(board, pt) {
        score += weights.edge;
    }
    score
}

/// Cheap pre-search score for the side to move playing `pt`.
///
/// Rewards captures, placements that keep a liberty, and central points.
pub fn ordering_score(game: &Game, pt: Point) -> f32 {
    let board = game.board();
    let (after, captured) = board.after_placement(pt, game.to_move());

    let mut score = captured.len() as f32 * ORDER_CAPTURE;
    if after.has_liberties(&after.find_group(pt)) {
        score += ORDER_LIBERTY;
    }
    score - center_distance(board, pt) * ORDER_CENTER
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game_from(moves: &[(usize, usize)]) -> Game {
        let mut game = Game::new(9).unwrap();
        for &(r, c) in moves {
            game.play(r, c).unwrap();
        }
        game
    }

    fn pt(game: &Game, row: usize, col: usize) -> Point {
        game.board().point(row, col).unwrap()
    }

    #[test]
    fn test_center_distance() {
        let board = Board::new(9);
        assert_eq!(center_distance(&board, board.point(4, 4).unwrap()), 0.0);
        assert_eq!(center_distance(&board, board.point(0, 0).unwrap()), 8.0);
    }

    #[test]
    fn test_evaluation_is_antisymmetric() {
        let game = game_from(&[(2, 2), (6, 6), (2, 3)]);
        let w = Weights::default();
        let last = Some(pt(&game, 2, 3));
        let black = evaluate(&game, Color::Black, last, &w);
        let white = evaluate(&game, Color::White, last, &w);
        assert!((black + white).abs() < 1e-4);
    }

    #[test]
    fn test_territory_lead_raises_score() {
        // A black stone alone owns the whole board
        let game = game_from(&[(4, 4)]);
        let w = Weights {
            liberties: 0.0,
            influence: 0.0,
            center: 0.0,
            edge: 0.0,
            ..Weights::default()
        };
        assert!(evaluate(&game, Color::Black, None, &w) > 0.0);
        assert!(evaluate(&game, Color::White, None, &w) < 0.0);
    }

    #[test]
    fn test_capture_lead_raises_score() {
        let mut game = game_from(&[(3, 4), (4, 4), (5, 4), (0, 0), (4, 3), (0, 8)]);
        let w = Weights {
            territory: 0.0,
            ..Weights::default()
        };
        let before = evaluate(&game, Color::Black, None, &w);
        game.play(4, 5).unwrap();
        let after = evaluate(&game, Color::Black, None, &w);
        assert!(after > before);
    }

    #[test]
    fn test_local_shape_never_outweighs_a_prisoner() {
        let w = Weights::default();
        for local in [-50.0, -3.0, 0.0, 2.5, 50.0] {
            assert!(bounded_local(local, &w).abs() < w.captures / 2.0);
        }
        assert!(bounded_local(2.0, &w) > bounded_local(1.0, &w));
        assert_eq!(bounded_local(0.0, &w), 0.0);

        // Capturing on the first line beats a quiet move in the center
        let mut capture = game_from(&[(4, 4), (0, 0), (0, 1), (8, 8), (4, 5), (7, 7)]);
        let mut quiet = capture.clone();
        capture.play(1, 0).unwrap();
        quiet.play(4, 3).unwrap();
        let c = evaluate(&capture, Color::Black, Some(pt(&capture, 1, 0)), &w);
        let q = evaluate(&quiet, Color::Black, Some(pt(&quiet, 4, 3)), &w);
        assert!(c > q);
    }

    #[test]
    fn test_more_liberties_score_higher() {
        let w = Weights::default();
        // Same distance from center, one stone crowded by white
        let free = game_from(&[(2, 4), (8, 8)]);
        let crowded = game_from(&[(2, 4), (1, 4)]);
        let free_score = stone_terms(free.board(), pt(&free, 2, 4), Color::Black, &w);
        let crowded_score = stone_terms(crowded.board(), pt(&crowded, 2, 4), Color::Black, &w);
        assert!(free_score > crowded_score);
    }

    #[test]
    fn test_friendly_neighbors_score_higher() {
        let w = Weights {
            liberties: 0.0,
            ..Weights::default()
        };
        let alone = game_from(&[(4, 3), (8, 8), (4, 4)]);
        let joined = game_from(&[(4, 3), (8, 8), (4, 5), (8, 7), (4, 4)]);
        let a = stone_terms(alone.board(), pt(&alone, 4, 4), Color::Black, &w);
        let j = stone_terms(joined.board(), pt(&joined, 4, 4), Color::Black, &w);
        assert!(j > a);
    }

    #[test]
    fn test_center_and_edge_penalties() {
        let w = Weights {
            liberties: 0.0,
            influence: 0.0,
            ..Weights::default()
        };
        let board = Board::new(9);
        let center = stone_terms(&board, board.point(4, 4).unwrap(), Color::Black, &w);
        let middle = stone_terms(&board, board.point(2, 4).unwrap(), Color::Black, &w);
        let edge = stone_terms(&board, board.point(0, 4).unwrap(), Color::Black, &w);
        assert!(center > middle);
        assert!(middle > edge);
        // The edge term alone pushes a first-line stone down
        let no_center = Weights { center: 0.0, ..w };
        assert!(
            stone_terms(&board, board.point(0, 4).unwrap(), Color::Black, &no_center)
                < stone_terms(&board, board.point(1, 4).unwrap(), Color::Black, &no_center)
        );
    }

    #[test]
    fn test_ordering_prefers_capture() {
        // Black to move; (4,5) takes the white stone at (4,4)
        let game = game_from(&[(3, 4), (4, 4), (5, 4), (0, 0), (4, 3), (0, 8)]);
        let capture = ordering_score(&game, pt(&game, 4, 5));
        let quiet = ordering_score(&game, pt(&game, 3, 3));
        assert!(capture > quiet);
    }

    #[test]
    fn test_ordering_penalizes_self_destruction() {
        // White to move; (0,0) would have no liberties
        let game = game_from(&[(0, 1), (8, 8), (1, 0)]);
        let suicide = ordering_score(&game, pt(&game, 0, 0));
        let normal = ordering_score(&game, pt(&game, 0, 2));
        assert!(normal > suicide);
    }
}
