//! Default engine parameters.
//!
//! Board dimensions and the search/evaluation defaults live here so that
//! nothing in the engine reads hidden globals; callers override them through
//! [`crate::strategy::StrategyConfig`].

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board width (x-axis dimension).
pub const DEFAULT_DIM_X: usize = 4;

/// Default board height (y-axis dimension).
pub const DEFAULT_DIM_Y: usize = 4;

// =============================================================================
// Game Tree Search Parameters
// =============================================================================

/// Hard cap on iterative-deepening depth. The outer loop stops here even if
/// neither the time budget nor a forced win has been reached.
pub const MAX_TREE_DEPTH: u32 = 20;

/// Default thinking-time budget for the game-tree strategy, in milliseconds.
pub const DEFAULT_THINKING_TIME_MS: u64 = 1000;

/// Fraction of the thinking-time budget after which an in-flight search
/// aborts. Depth-1 searches always run to completion.
pub const TIME_BUDGET_FRACTION: f64 = 0.99;

// =============================================================================
// Static Evaluation Weights
// =============================================================================

/// Weight for opponent tokens on threatened fields.
pub const W_GAIN: f64 = 1.0;

/// Weight for own tokens on threatened fields.
pub const W_LOSS: f64 = 0.5;
