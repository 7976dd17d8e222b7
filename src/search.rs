//! Game-tree search: iterative-deepening alphabeta under a time budget.
//!
//! The hard difficulty evaluates candidate moves by searching the game tree
//! with alphabeta pruning. The outer loop deepens the tree one ply at a time
//! and narrows the candidate frontier to the moves tied for the best rating
//! of the previous iteration. The search runs entirely on the caller's
//! thread; the time budget is enforced cooperatively by checking the clock
//! at every alphabeta call entry and unwinding with `None` once it is spent.
//! The depth-1 pass is exempt, so a move is always produced no matter how
//! small the budget is.
//!
//! Every speculative move clones the situation, so sibling branches never
//! share mutable state and the live game situation stays untouched.

use std::time::{Duration, Instant};

use crate::board::{Color, Pos};
use crate::constants::TIME_BUDGET_FRACTION;
use crate::eval::{best_positions, evaluated_positions, is_threatened, legal_positions, pick_one};
use crate::heuristic::rule_score;
use crate::situation::Situation;
use crate::strategy::StrategyConfig;

/// The hard difficulty: iterative-deepening, time-bounded alphabeta.
pub struct GameTreeEvaluator {
    cfg: StrategyConfig,
    rng: fastrand::Rng,
    /// Tree depth of the current deepening iteration.
    current_max_depth: u32,
    /// Latched as soon as any searched line reaches a win for the player.
    found_winning_situation: bool,
    start_time: Instant,
    elapsed: Duration,
}

impl GameTreeEvaluator {
    pub fn new(cfg: StrategyConfig, rng: fastrand::Rng) -> Self {
        GameTreeEvaluator {
            cfg,
            rng,
            current_max_depth: 0,
            found_winning_situation: false,
            start_time: Instant::now(),
            elapsed: Duration::ZERO,
        }
    }

    /// Searches for the best legal move of `player`. Blocks until the time
    /// budget is spent, a forced win is found, or the depth cap is reached.
    /// `None` iff there is no legal move.
    pub fn select_move(&mut self, player: Color, situation: &Situation) -> Option<Pos> {
        self.start_time = Instant::now();
        self.elapsed = Duration::ZERO;
        self.current_max_depth = 0;
        self.found_winning_situation = false;

        let legal = legal_positions(player, situation);
        if legal.is_empty() {
            return None;
        }

        // Presort once with the rule ladder; the frontier narrows from here.
        let mut frontier = presorted(player, situation, &legal, true);

        let mut time_expired = false;
        loop {
            self.current_max_depth += 1;

            let scored = evaluated_positions(&frontier, true, |pos| {
                self.evaluate_position(player, situation, pos)
            });
            let current_best = best_positions(&scored);

            if current_best.is_empty() {
                // Every root candidate aborted on time; keep the frontier of
                // the last completed iteration.
                time_expired = true;
            } else {
                frontier = current_best;
            }

            if time_expired
                || self.found_winning_situation
                || self.current_max_depth >= self.cfg.max_tree_depth
            {
                break;
            }
        }

        // Equally rated candidates are separated once more by the rule
        // ladder, then one of the remaining ties is drawn at random.
        let post = evaluated_positions(&frontier, true, |pos| {
            Some(rule_score(player, situation, pos))
        });
        let best = best_positions(&post);
        pick_one(&mut self.rng, &best)
    }

    /// Rates one root candidate: applies the move on a clone and searches
    /// the resulting situation to the current depth limit. `None` when the
    /// search aborted on time.
    fn evaluate_position(&mut self, player: Color, situation: &Situation, pos: Pos) -> Option<f64> {
        let mut copy = situation.clone();
        copy.add_token(pos, player, None);

        let rating = self.alphabeta(player, &copy, 1, f64::MIN, f64::MAX);

        if self.cfg.verbose {
            if let Some(r) = rating {
                println!(
                    "move {pos} --> rating (depth {}): {r}",
                    self.current_max_depth
                );
            }
        }

        rating
    }

    /// Depth-limited alphabeta. Even depths are the searching player's turn
    /// (maximizing), odd depths the opponent's (minimizing). Returns `None`
    /// when the time budget ran out; the abort propagates to the root
    /// without evaluating remaining siblings.
    fn alphabeta(
        &mut self,
        player: Color,
        situation: &Situation,
        depth: u32,
        mut alpha: f64,
        mut beta: f64,
    ) -> Option<f64> {
        self.elapsed = self.start_time.elapsed();
        if !self.is_in_time() {
            return None;
        }

        if let Some(winner) = situation.dominant_color() {
            if winner == player {
                self.found_winning_situation = true;
                return Some(f64::MAX);
            }
            return Some(f64::MIN);
        }

        if depth == self.current_max_depth {
            return Some(self.evaluate_situation(player, situation));
        }

        let maximizing = depth % 2 == 0;
        let active = if maximizing { player } else { player.opposite() };

        let legal = legal_positions(active, situation);
        let moves = presorted(player, situation, &legal, maximizing);

        for mv in moves {
            let mut copy = situation.clone();
            copy.add_token(mv, active, None);

            let value = self.alphabeta(player, &copy, depth + 1, alpha, beta)?;

            if maximizing {
                alpha = alpha.max(value);
                if alpha >= beta {
                    return Some(alpha); // beta cutoff
                }
            } else {
                beta = beta.min(value);
                if alpha >= beta {
                    return Some(beta); // alpha cutoff
                }
            }
        }

        Some(if maximizing { alpha } else { beta })
    }

    /// Rates a situation as a whole from the searching player's view: own
    /// tokens count positive unless threatened, opponent tokens negative
    /// unless threatened, with the configured weights on threatened fields.
    fn evaluate_situation(&self, player: Color, situation: &Situation) -> f64 {
        let mut value = 0.0;

        for pos in situation.positions() {
            let Some(color) = situation.color(pos) else {
                continue;
            };
            let tokens = situation.tokens(pos) as f64;
            let threatened = is_threatened(player, situation, pos);

            if color == player {
                if threatened {
                    value -= self.cfg.w_loss * tokens;
                } else {
                    value += tokens;
                }
            } else if threatened {
                value += self.cfg.w_gain * tokens;
            } else {
                value -= tokens;
            }
        }

        value
    }

    /// The depth-1 pass always completes; beyond that the search is over
    /// budget once the configured fraction of the thinking time has passed.
    fn is_in_time(&self) -> bool {
        self.current_max_depth <= 1
            || self.elapsed.as_secs_f64()
                < TIME_BUDGET_FRACTION * self.cfg.thinking_time.as_secs_f64()
    }
}

/// Sorts candidates by the rule ladder, best first for the searching player
/// and worst first for the opponent, and strips the scores.
fn presorted(player: Color, situation: &Situation, positions: &[Pos], descending: bool) -> Vec<Pos> {
    evaluated_positions(positions, descending, |pos| {
        Some(rule_score(player, situation, pos))
    })
    .into_iter()
    .map(|scored| scored.pos)
    .collect()
}
