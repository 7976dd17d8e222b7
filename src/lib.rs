//! Chainreact: a chain-reaction board game engine.
//!
//! Two players place tokens on a grid. A field that collects as many tokens
//! as it has neighbors overflows, pushing one token onto each neighbor and
//! taking over whatever was there; overflows can cascade until the board
//! settles or one color owns every occupied field, which wins the game.
//!
//! ## Modules
//!
//! - [`board`] - Grid topology: positions, colors, neighbor lists, limits
//! - [`situation`] - Per-field token state and cascade resolution
//! - [`eval`] - Shared evaluator plumbing (legal moves, sorting, tie-break)
//! - [`heuristic`] - The rule-ladder scorer (medium difficulty)
//! - [`search`] - Iterative-deepening, time-bounded alphabeta (hard)
//! - [`strategy`] - Move facade selecting an evaluator per difficulty
//! - [`constants`] - Default dimensions, time budget, weights
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//!
//! use chainreact::board::{Board, Color, Pos};
//! use chainreact::situation::Situation;
//! use chainreact::strategy::{Difficulty, Strategy, StrategyConfig};
//!
//! // Start a game on the default 4x4 board.
//! let board = Board::new(4, 4);
//! let mut situation = Situation::new(&board);
//!
//! // White opens in a corner.
//! situation.add_token(Pos::new(0, 0), Color::White, None);
//!
//! // Black answers with the game-tree AI on a small time budget.
//! let cfg = StrategyConfig {
//!     thinking_time: Duration::from_millis(50),
//!     seed: Some(1),
//!     ..StrategyConfig::default()
//! };
//! let mut ai = Strategy::new(Color::Black, Difficulty::Search, cfg);
//! let reply = ai.request_move(&situation).expect("black has legal moves");
//! situation.add_token(reply, Color::Black, None);
//! ```

pub mod board;
pub mod constants;
pub mod eval;
pub mod heuristic;
pub mod search;
pub mod situation;
pub mod strategy;
