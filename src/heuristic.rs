//! The rule-based scorer: a fast, fixed-order rule ladder.
//!
//! Each candidate move is matched against the rules below, first match wins:
//!
//! 1. `+5` threatened but full field (capturing back beats everything)
//! 2. `+4` occupied field with an overtaking opponent neighbor
//! 3. `+3`/`+2` non-full field overflowing sooner than all its neighbors,
//!    with/without an opponent neighbor
//! 4. `+1` empty field away from the opponent
//! 5. `-1` full field
//! 6. `-2` field next to the opponent
//! 7. `0` everything else
//!
//! The ladder serves as the medium difficulty on its own and as the cheap
//! move-ordering and tie-breaking aid inside the game-tree search.

use crate::board::{Color, Pos};
use crate::eval::{
    best_positions, evaluated_positions, has_opponents, is_threatened, legal_positions,
    opponent_neighbors, pick_one,
};
use crate::situation::Situation;

/// Scores one candidate move with the rule ladder. Pure; never aborts.
pub fn rule_score(player: Color, situation: &Situation, pos: Pos) -> f64 {
    // Threatened but full field.
    if is_threatened(player, situation, pos) && situation.is_full(pos) {
        return 5.0;
    }

    // Field which can be overtaken by a neighbor of the same rank.
    if !situation.is_empty(pos) && has_overtaking_opponents(player, situation, pos) {
        return 4.0;
    }

    // Prefer the least threatening spot, or stabilize it if threats are on
    // the way.
    if !situation.is_full(pos) && has_best_rank_among_neighbors(situation, pos) {
        if has_opponents(player, situation, pos) {
            return 3.0;
        } else {
            return 2.0;
        }
    }

    if situation.is_empty(pos) && !has_opponents(player, situation, pos) {
        return 1.0;
    }

    if situation.is_full(pos) {
        return -1.0;
    }

    // Don't place next to the opponent.
    if has_opponents(player, situation, pos) {
        return -2.0;
    }

    0.0
}

/// Whether an opponent neighbor of the same limit could overtake the field.
///
/// Disqualified as soon as any opponent neighbor has a smaller limit than
/// the candidate: that neighbor overflows sooner and is the stronger field.
fn has_overtaking_opponents(player: Color, situation: &Situation, pos: Pos) -> bool {
    let mut overtaking = false;
    for opponent in opponent_neighbors(player, situation, pos) {
        if situation.limit(pos) > situation.limit(opponent) {
            return false; // there are stronger neighbors
        }
        if situation.limit(pos) == situation.limit(opponent) {
            overtaking = true;
        }
    }
    overtaking
}

/// Whether the field overflows sooner than every one of its neighbors.
fn has_best_rank_among_neighbors(situation: &Situation, pos: Pos) -> bool {
    situation
        .neighbors(pos)
        .iter()
        .all(|&neighbor| situation.limit(pos) < situation.limit(neighbor))
}

/// The medium difficulty: picks a move by the rule ladder alone.
pub struct RuleBasedEvaluator {
    rng: fastrand::Rng,
}

impl RuleBasedEvaluator {
    pub fn new(rng: fastrand::Rng) -> Self {
        RuleBasedEvaluator { rng }
    }

    /// Picks the best-scored legal move, breaking ties at random. `None` if
    /// there is no legal move.
    pub fn select_move(&mut self, player: Color, situation: &Situation) -> Option<Pos> {
        let legal = legal_positions(player, situation);
        let scored = evaluated_positions(&legal, true, |pos| {
            Some(rule_score(player, situation, pos))
        });
        let best = best_positions(&scored);
        pick_one(&mut self.rng, &best)
    }
}
