//! Move facade: difficulty selection and the blocking move request.
//!
//! A [`Strategy`] belongs to one player color and holds exactly one
//! evaluator, chosen at construction from the configured [`Difficulty`].
//! [`Strategy::request_move`] runs that evaluator synchronously on the
//! caller's thread and blocks until a move is chosen.

use std::time::{Duration, Instant};

use crate::board::{Color, Pos};
use crate::constants::{DEFAULT_THINKING_TIME_MS, MAX_TREE_DEPTH, W_GAIN, W_LOSS};
use crate::eval::RandomEvaluator;
use crate::heuristic::RuleBasedEvaluator;
use crate::search::GameTreeEvaluator;
use crate::situation::Situation;

/// The three AI difficulties and the evaluator each one selects.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Difficulty {
    /// Easy: uniformly random among all legal moves.
    Random,
    /// Medium: the rule ladder.
    Heuristic,
    /// Hard: time-bounded game-tree search.
    Search,
}

/// Explicit configuration for a strategy. Replaces the original's hidden
/// preference globals; all evaluators of a strategy read from here.
#[derive(Clone, Debug)]
pub struct StrategyConfig {
    /// Thinking-time budget for the game-tree search.
    pub thinking_time: Duration,
    /// Iterative-deepening depth cap.
    pub max_tree_depth: u32,
    /// Static-evaluation weight for threatened opponent tokens.
    pub w_gain: f64,
    /// Static-evaluation weight for threatened own tokens.
    pub w_loss: f64,
    /// Seed for the tie-break randomness; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Print per-move timing and rating diagnostics.
    pub verbose: bool,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        StrategyConfig {
            thinking_time: Duration::from_millis(DEFAULT_THINKING_TIME_MS),
            max_tree_depth: MAX_TREE_DEPTH,
            w_gain: W_GAIN,
            w_loss: W_LOSS,
            seed: None,
            verbose: false,
        }
    }
}

enum EvaluatorKind {
    Random(RandomEvaluator),
    Heuristic(RuleBasedEvaluator),
    Search(GameTreeEvaluator),
}

/// The AI of one player: a color plus the evaluator for the chosen
/// difficulty.
pub struct Strategy {
    player: Color,
    difficulty: Difficulty,
    verbose: bool,
    evaluator: EvaluatorKind,
}

impl Strategy {
    /// Builds the strategy for a player, constructing the one evaluator the
    /// difficulty calls for.
    pub fn new(player: Color, difficulty: Difficulty, cfg: StrategyConfig) -> Self {
        let rng = match cfg.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        let verbose = cfg.verbose;
        let evaluator = match difficulty {
            Difficulty::Random => EvaluatorKind::Random(RandomEvaluator::new(rng)),
            Difficulty::Heuristic => EvaluatorKind::Heuristic(RuleBasedEvaluator::new(rng)),
            Difficulty::Search => EvaluatorKind::Search(GameTreeEvaluator::new(cfg, rng)),
        };
        Strategy {
            player,
            difficulty,
            verbose,
            evaluator,
        }
    }

    pub fn player(&self) -> Color {
        self.player
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Computes the next move for this strategy's player on the given
    /// situation. Blocks until the evaluator is done. Returns `None` iff
    /// the player has no legal move.
    pub fn request_move(&mut self, situation: &Situation) -> Option<Pos> {
        if self.verbose {
            println!("calculate next move");
        }
        let start = Instant::now();

        let chosen = match &mut self.evaluator {
            EvaluatorKind::Random(eval) => eval.select_move(self.player, situation),
            EvaluatorKind::Heuristic(eval) => eval.select_move(self.player, situation),
            EvaluatorKind::Search(eval) => eval.select_move(self.player, situation),
        };

        if self.verbose {
            println!("calculation took {} ms", start.elapsed().as_millis());
        }
        chosen
    }
}
