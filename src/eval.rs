//! Shared evaluator plumbing.
//!
//! Every AI difficulty works the same way: enumerate the legal fields for
//! the moving player, score each one, sort, collect the fields tied with the
//! best score, and draw one of them uniformly at random. This module holds
//! that common machinery plus the neighbor/threat helpers the scorers use.
//!
//! A scorer returns `Option<f64>`; `None` means the scoring pass ran out of
//! thinking time and the whole candidate list for that pass is discarded.
//! Only the game-tree evaluator ever returns `None`.

use std::cmp::Ordering;

use crate::board::{Color, Pos};
use crate::situation::Situation;

/// A candidate move paired with its score. Created and discarded within one
/// evaluation pass, never persisted.
#[derive(Copy, Clone, Debug)]
pub struct ScoredPos {
    pub pos: Pos,
    pub score: f64,
}

impl ScoredPos {
    /// Ascending order by score.
    pub fn cmp_asc(a: &ScoredPos, b: &ScoredPos) -> Ordering {
        a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal)
    }

    /// Descending order by score.
    pub fn cmp_desc(a: &ScoredPos, b: &ScoredPos) -> Ordering {
        b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal)
    }
}

/// All fields the player may legally place a token on: empty fields and
/// fields already holding the player's own color.
pub fn legal_positions(player: Color, situation: &Situation) -> Vec<Pos> {
    situation
        .positions()
        .filter(|&pos| situation.color(pos).map_or(true, |c| c == player))
        .collect()
}

/// Whether the field is occupied by the opponent of `player`.
pub fn is_opponent(player: Color, situation: &Situation, pos: Pos) -> bool {
    situation.color(pos).is_some_and(|c| c != player)
}

/// The neighbors of `pos` occupied by the opponent of `player`, in the
/// board's neighbor order.
pub fn opponent_neighbors(player: Color, situation: &Situation, pos: Pos) -> Vec<Pos> {
    situation
        .neighbors(pos)
        .iter()
        .copied()
        .filter(|&n| is_opponent(player, situation, n))
        .collect()
}

/// Whether `pos` has at least one neighbor occupied by the opponent.
pub fn has_opponents(player: Color, situation: &Situation, pos: Pos) -> bool {
    situation
        .neighbors(pos)
        .iter()
        .any(|&n| is_opponent(player, situation, n))
}

/// Whether `pos` is threatened by the opponent of `player`.
///
/// Only the first opponent-occupied neighbor in the board's neighbor order
/// is inspected; later opponent neighbors are ignored even if they are full.
/// Kept bit-for-bit from the original engine.
pub fn is_threatened(player: Color, situation: &Situation, pos: Pos) -> bool {
    for &neighbor in situation.neighbors(pos) {
        if is_opponent(player, situation, neighbor) {
            return situation.is_full(neighbor);
        }
    }
    false
}

/// Scores each candidate and returns the list sorted by score, descending
/// when scoring for the requesting player and ascending for the opponent
/// (whose best outcome is the requesting player's worst).
///
/// If any single evaluation aborts (`None`), the entire pass is discarded
/// and an empty list is returned.
pub(crate) fn evaluated_positions<F>(
    positions: &[Pos],
    descending: bool,
    mut evaluate: F,
) -> Vec<ScoredPos>
where
    F: FnMut(Pos) -> Option<f64>,
{
    let mut scored = Vec::with_capacity(positions.len());
    for &pos in positions {
        match evaluate(pos) {
            Some(score) => scored.push(ScoredPos { pos, score }),
            None => return Vec::new(),
        }
    }
    if descending {
        scored.sort_by(ScoredPos::cmp_desc);
    } else {
        scored.sort_by(ScoredPos::cmp_asc);
    }
    scored
}

/// The leading positions tied with the head score of a sorted list.
pub(crate) fn best_positions(scored: &[ScoredPos]) -> Vec<Pos> {
    let Some(head) = scored.first() else {
        return Vec::new();
    };
    scored
        .iter()
        .take_while(|entry| entry.score == head.score)
        .map(|entry| entry.pos)
        .collect()
}

/// Draws one position uniformly at random, or `None` if there is nothing to
/// choose from (the explicit no-legal-move outcome).
pub(crate) fn pick_one(rng: &mut fastrand::Rng, positions: &[Pos]) -> Option<Pos> {
    if positions.is_empty() {
        None
    } else {
        Some(positions[rng.usize(0..positions.len())])
    }
}

/// The easy difficulty: every legal move scores the same, so the choice is
/// purely random.
pub struct RandomEvaluator {
    rng: fastrand::Rng,
}

impl RandomEvaluator {
    pub fn new(rng: fastrand::Rng) -> Self {
        RandomEvaluator { rng }
    }

    /// Picks a uniformly random legal move, `None` if there is none.
    pub fn select_move(&mut self, player: Color, situation: &Situation) -> Option<Pos> {
        let legal = legal_positions(player, situation);
        let scored = evaluated_positions(&legal, true, |_| Some(0.0));
        let best = best_positions(&scored);
        pick_one(&mut self.rng, &best)
    }
}
