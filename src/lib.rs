//! go-engine: Go rules and an alpha-beta move searcher.
//!
//! This crate plays Go on 9×9, 13×13 and 19×19 boards with captures, simple
//! ko, suicide prevention, area-style territory counting and a fixed komi.
//! Moves are chosen by a depth-limited negamax search over a heuristic
//! evaluation.
//!
//! ## Modules
//!
//! - [`constants`] - Board sizes, komi and engine parameters
//! - [`board`] - Grid, colors, groups and liberties
//! - [`score`] - Territory flood fill and score totals
//! - [`game`] - Rules, turn order, passes and game end
//! - [`eval`] - Static evaluation and move ordering
//! - [`search`] - Opening book, pass policy and alpha-beta search
//! - [`record`] - JSON game records
//! - [`gtp`] - Go Text Protocol front end
//! - [`error`] - Rejection reasons
//!
//! ## Example
//!
//! ```
//! use go_engine::game::Game;
//! use go_engine::search::{Difficulty, Engine, SearchConfig};
//!
//! // Create a new game and play a move
//! let mut game = Game::new(9).unwrap();
//! game.play(2, 2).unwrap();
//!
//! // Ask the engine for White's reply
//! let mut engine = Engine::with_seed(SearchConfig::from_difficulty(Difficulty::Easy), 7);
//! if let Some((row, col)) = engine.choose_move(&game) {
//!     game.play(row, col).unwrap();
//! }
//! println!("{}", game.board());
//! ```

pub mod board;
pub mod constants;
pub mod error;
pub mod eval;
pub mod game;
pub mod gtp;
pub mod record;
pub mod score;
pub mod search;
