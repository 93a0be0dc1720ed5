//! Constants for board geometry, game limits, sampling, and evaluator weights.
//!
//! The values here match the reference 5x5 configuration. Board dimension and
//! turn limit are only defaults: both can be overridden per game through
//! [`GameConfig`](crate::game::GameConfig) and are frozen at construction.

// =============================================================================
// Board Geometry & Game Limits
// =============================================================================

/// Default board size (NxN).
pub const BOARD_SIZE: usize = 5;

/// Default maximum number of turns before the game is scored.
pub const MAX_TURNS: u32 = 30;

/// Consecutive passes that end the game.
pub const PASS_LIMIT: u32 = 2;

// =============================================================================
// Scoring Weights
// =============================================================================

/// Weight of territory (distinct empty cells adjacent to a player's stones).
pub const TERRITORY_WEIGHT: u32 = 2;

/// Weight of summed per-stone liberties. An empty cell shared by two stones
/// counts once per stone here, unlike group liberties which deduplicate.
pub const LIBERTY_WEIGHT: u32 = 1;

/// Weight of the player's largest connected group.
pub const CONNECTIVITY_WEIGHT: u32 = 3;

// =============================================================================
// Heuristic Evaluator Weights
// =============================================================================

/// Bonus per empty neighbor of a candidate move.
pub const EVAL_LIBERTY: i32 = 3;

/// Bonus per adjacent opponent stone (blocking).
pub const EVAL_BLOCK: i32 = 5;

/// Bonus per adjacent own stone (connecting).
pub const EVAL_CONNECT: i32 = 4;

/// Bonus per point of closeness to the board center.
pub const EVAL_CENTER: i32 = 2;

/// Penalty for moves on the outer edge.
pub const EVAL_EDGE_PENALTY: i32 = 2;

/// Empty-neighbor count from which a move is described as "high liberties".
pub const HIGH_LIBERTY_COUNT: usize = 3;

/// Manhattan radius around the center described as "center control".
pub const CENTER_RADIUS: usize = 2;

// =============================================================================
// Stochastic Evaluator
// =============================================================================

/// Shots sampled from the decision circuit per move.
pub const SHOTS: u32 = 1024;

/// Scale of the tanh squashing feature deltas into rotation angles.
pub const FEATURE_SCALE: f64 = 10.0;

// Aggressive scan (used when the position classifies as winning)

/// Center bonus for an on-center move; decreases with distance.
pub const ATTACK_CENTER_BASE: i32 = 10;

/// Center bonus lost per step of Manhattan distance from the center.
pub const ATTACK_CENTER_STEP: i32 = 2;

/// Bonus per adjacent own stone.
pub const ATTACK_CONNECT: i32 = 5;

/// Bonus per adjacent empty cell.
pub const ATTACK_EXPAND: i32 = 3;

// Defensive scan (used when the position classifies as losing)

/// Bonus per adjacent opponent stone.
pub const DEFEND_BLOCK: i32 = 8;

/// Bonus per adjacent empty cell.
pub const DEFEND_BREATHE: i32 = 4;

/// Penalty for moves on the outer edge.
pub const DEFEND_EDGE_PENALTY: i32 = 3;
