//! Constants for board dimensions, scoring, and engine parameters.
//!
//! Everything tunable about the engine has its default here. Runtime
//! configuration goes through [`crate::search::SearchConfig`].

// =============================================================================
// Board Geometry
// =============================================================================

/// Board sizes accepted at game start.
pub const SUPPORTED_SIZES: [usize; 3] = [9, 13, 19];

/// Default board size for the CLI and GTP server.
pub const DEFAULT_SIZE: usize = 9;

// =============================================================================
// Scoring
// =============================================================================

/// Compensation added to White's final score.
pub const KOMI: f32 = 6.5;

// =============================================================================
// Search Depth per Difficulty
// =============================================================================

pub const DEPTH_EASY: u32 = 1;
pub const DEPTH_MEDIUM: u32 = 3;
pub const DEPTH_HARD: u32 = 4;

// =============================================================================
// Engine Policies
// =============================================================================

/// Below this many history records the engine plays a canned opening point.
pub const OPENING_MOVES: usize = 5;

/// The engine passes once the empty fraction of the board drops below this.
pub const PASS_EMPTY_RATIO: f32 = 0.1;

// =============================================================================
// Evaluation Weights
// =============================================================================

pub const WEIGHT_TERRITORY: f32 = 2.0;
pub const WEIGHT_CAPTURES: f32 = 1.5;
pub const WEIGHT_LIBERTIES: f32 = 1.0;
pub const WEIGHT_INFLUENCE: f32 = 1.2;
pub const WEIGHT_CENTER: f32 = 0.8;

/// Added once for a stone on the first line (negative = penalty).
pub const WEIGHT_EDGE: f32 = -0.3;

// =============================================================================
// Move Ordering
// =============================================================================

/// Ordering bonus per stone a candidate would capture.
pub const ORDER_CAPTURE: f32 = 5.0;

/// Ordering bonus when the placed group keeps at least one liberty.
pub const ORDER_LIBERTY: f32 = 3.0;

/// Ordering penalty per unit of Manhattan distance from the center.
pub const ORDER_CENTER: f32 = 0.5;
