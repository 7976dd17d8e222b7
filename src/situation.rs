//! Game situation: the mutable per-field token state and the cascade logic.
//!
//! A [`Situation`] stores, for every field of a shared [`Board`], a signed
//! token count: positive values are white tokens, negative values black,
//! zero is empty. It is the unit the AI clones for every speculative move,
//! so cloning copies the field array and shares the board by reference.
//!
//! Placing a token through [`Situation::add_token`] may overflow the target
//! field, which distributes one token to each neighbor and can set off a
//! chain of further overflows. The chain is resolved with a FIFO queue and
//! stops early once the whole board has turned one color, since further
//! overflows cannot change a decided game.

use std::collections::VecDeque;
use std::fmt;

use crate::board::{Board, Color, Pos};

/// Receives notifications while a move resolves, for animation or replay
/// queues outside the engine. The engine itself never branches on it.
pub trait CascadeObserver {
    /// Called once per move, after the triggering token has been placed but
    /// before any overflow resolves.
    fn move_placed(&mut self, situation: &Situation, pos: Pos);

    /// Called after every resolved overflow step.
    fn cascade_step(&mut self, situation: &Situation);
}

/// Initial content for one field, used to start a game from a progressed
/// position instead of an empty board.
#[derive(Copy, Clone, Debug)]
pub struct FieldSetup {
    pub pos: Pos,
    pub color: Color,
    pub tokens: u8,
}

/// The token state of a game in progress, over a shared board topology.
#[derive(Clone)]
pub struct Situation<'a> {
    board: &'a Board,
    /// Signed token count per field, row-major. Positive = white,
    /// negative = black, zero = empty.
    fields: Vec<i8>,
}

impl<'a> Situation<'a> {
    /// Creates an empty situation on the given board.
    pub fn new(board: &'a Board) -> Self {
        Situation {
            board,
            fields: vec![0; board.dim_x() * board.dim_y()],
        }
    }

    /// Creates a situation pre-populated from a setup list.
    pub fn with_setup(board: &'a Board, setup: &[FieldSetup]) -> Self {
        let mut situation = Situation::new(board);
        for entry in setup {
            let signed = match entry.color {
                Color::White => entry.tokens as i8,
                Color::Black => -(entry.tokens as i8),
            };
            let idx = board.idx(entry.pos);
            situation.fields[idx] = signed;
        }
        situation
    }

    /// The board this situation lives on.
    pub fn board(&self) -> &'a Board {
        self.board
    }

    /// See [`Board::neighbors`].
    pub fn neighbors(&self, pos: Pos) -> &[Pos] {
        self.board.neighbors(pos)
    }

    /// See [`Board::limit`].
    pub fn limit(&self, pos: Pos) -> usize {
        self.board.limit(pos)
    }

    /// All positions of the board, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        self.board.positions()
    }

    /// Number of tokens on the field, regardless of color.
    pub fn tokens(&self, pos: Pos) -> u32 {
        self.fields[self.board.idx(pos)].unsigned_abs() as u32
    }

    /// Total number of tokens on the board, regardless of color.
    pub fn total_tokens(&self) -> u32 {
        self.fields.iter().map(|v| v.unsigned_abs() as u32).sum()
    }

    /// Color of the tokens on the field, or `None` if it is empty.
    pub fn color(&self, pos: Pos) -> Option<Color> {
        match self.fields[self.board.idx(pos)] {
            v if v > 0 => Some(Color::White),
            v if v < 0 => Some(Color::Black),
            _ => None,
        }
    }

    /// Whether the field holds no tokens.
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.fields[self.board.idx(pos)] == 0
    }

    /// Whether one more token would make the field overflow.
    pub fn is_full(&self, pos: Pos) -> bool {
        self.tokens(pos) as usize + 1 == self.limit(pos)
    }

    /// Whether the field currently holds at least as many tokens as its
    /// limit. Only true transiently, while a cascade is being resolved.
    pub fn is_overflowing(&self, pos: Pos) -> bool {
        self.tokens(pos) as usize >= self.limit(pos)
    }

    /// The color of the board if it is uni-colored, else `None`.
    ///
    /// At least two fields must be occupied before a board counts as
    /// uni-colored; otherwise the very first tokens of a game would already
    /// decide it.
    pub fn dominant_color(&self) -> Option<Color> {
        let mut non_empty = 0;
        let mut white = 0;
        let mut black = 0;

        for &v in &self.fields {
            if v != 0 {
                non_empty += 1;
                if v > 0 {
                    white += 1;
                } else {
                    black += 1;
                }
            }
        }

        if non_empty < 2 {
            None
        } else if non_empty == white {
            Some(Color::White)
        } else if non_empty == black {
            Some(Color::Black)
        } else {
            None
        }
    }

    /// Whether every occupied field holds the same color — the win
    /// condition.
    pub fn is_uniform(&self) -> bool {
        self.dominant_color().is_some()
    }

    /// Places one token of `color` on `pos` and resolves all overflows this
    /// causes. This is the single entry point for real and simulated moves.
    ///
    /// Pass an observer to get notified once the token is placed and after
    /// every resolved overflow step; pass `None` for silent (search) moves.
    pub fn add_token(
        &mut self,
        pos: Pos,
        color: Color,
        mut observer: Option<&mut dyn CascadeObserver>,
    ) {
        self.relocate_token(pos, color);

        if let Some(obs) = observer.as_deref_mut() {
            obs.move_placed(self, pos);
        }

        self.resolve_overflows(pos, observer);
    }

    /// Adds one token of `color` to the field without triggering overflows.
    /// Tokens of the other color already on the field are taken over.
    pub(crate) fn relocate_token(&mut self, pos: Pos, color: Color) {
        let idx = self.board.idx(pos);
        let magnitude = self.fields[idx].unsigned_abs() as i8 + 1;
        self.fields[idx] = match color {
            Color::White => magnitude,
            Color::Black => -magnitude,
        };
    }

    /// Removes one token from the field and returns its color, or `None` if
    /// the field was already empty.
    pub(crate) fn remove_token(&mut self, pos: Pos) -> Option<Color> {
        let idx = self.board.idx(pos);
        let value = self.fields[idx];
        if value > 0 {
            self.fields[idx] = value - 1;
            Some(Color::White)
        } else if value < 0 {
            self.fields[idx] = value + 1;
            Some(Color::Black)
        } else {
            None
        }
    }

    /// Resolves all pending overflows starting from the just-filled field.
    ///
    /// Pending fields are kept in a FIFO queue without duplicates. The head
    /// is only peeked, not popped: a field can be refilled past its limit
    /// while it waits, in which case it stays at the head for another pass.
    /// Resolution is abandoned once the board is uniform, as the game is
    /// decided at that point.
    fn resolve_overflows(&mut self, start: Pos, mut observer: Option<&mut dyn CascadeObserver>) {
        let board = self.board;
        let mut pending: VecDeque<Pos> = VecDeque::new();

        if self.is_overflowing(start) {
            pending.push_back(start);
        }

        while let Some(&head) = pending.front() {
            if self.is_uniform() {
                break;
            }

            // One overflow step: the head loses one token per neighbor, each
            // neighbor gains one of the head's color.
            for &neighbor in board.neighbors(head) {
                if let Some(color) = self.remove_token(head) {
                    self.relocate_token(neighbor, color);
                }
                if self.is_overflowing(neighbor) && !pending.contains(&neighbor) {
                    pending.push_back(neighbor);
                }
            }

            if !self.is_overflowing(head) {
                pending.pop_front();
            }

            if let Some(obs) = observer.as_deref_mut() {
                obs.cascade_step(self);
            }
        }
    }
}

impl fmt::Display for Situation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.board.dim_y() {
            for x in 0..self.board.dim_x() {
                let pos = Pos::new(x, y);
                match self.color(pos) {
                    Some(Color::White) => write!(f, "w{} ", self.tokens(pos))?,
                    Some(Color::Black) => write!(f, "b{} ", self.tokens(pos))?,
                    None => write!(f, " . ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_situation() {
        let board = Board::new(4, 4);
        let situation = Situation::new(&board);
        assert_eq!(situation.total_tokens(), 0);
        for pos in board.positions() {
            assert!(situation.is_empty(pos));
            assert_eq!(situation.color(pos), None);
        }
    }

    #[test]
    fn test_with_setup() {
        let board = Board::new(4, 4);
        let setup = [
            FieldSetup {
                pos: Pos::new(1, 1),
                color: Color::Black,
                tokens: 2,
            },
            FieldSetup {
                pos: Pos::new(2, 3),
                color: Color::White,
                tokens: 1,
            },
        ];
        let situation = Situation::with_setup(&board, &setup);
        assert_eq!(situation.tokens(Pos::new(1, 1)), 2);
        assert_eq!(situation.color(Pos::new(1, 1)), Some(Color::Black));
        assert_eq!(situation.tokens(Pos::new(2, 3)), 1);
        assert_eq!(situation.color(Pos::new(2, 3)), Some(Color::White));
        assert_eq!(situation.total_tokens(), 3);
    }

    #[test]
    fn test_relocate_takes_over_opposite_tokens() {
        let board = Board::new(4, 4);
        let mut situation = Situation::new(&board);
        let pos = Pos::new(1, 1);
        situation.relocate_token(pos, Color::White);
        situation.relocate_token(pos, Color::Black);
        // The black token takes over: two tokens, both black now.
        assert_eq!(situation.tokens(pos), 2);
        assert_eq!(situation.color(pos), Some(Color::Black));
    }

    #[test]
    fn test_remove_token() {
        let board = Board::new(4, 4);
        let mut situation = Situation::new(&board);
        let pos = Pos::new(0, 0);
        assert_eq!(situation.remove_token(pos), None);
        situation.relocate_token(pos, Color::Black);
        assert_eq!(situation.remove_token(pos), Some(Color::Black));
        assert!(situation.is_empty(pos));
    }

    #[test]
    fn test_full_and_overflowing() {
        let board = Board::new(3, 3);
        let mut situation = Situation::new(&board);
        let corner = Pos::new(0, 0);
        // Corner limit is 2: one token makes it full.
        situation.relocate_token(corner, Color::White);
        assert!(situation.is_full(corner));
        assert!(!situation.is_overflowing(corner));
        situation.relocate_token(corner, Color::White);
        assert!(situation.is_overflowing(corner));
    }

    #[test]
    fn test_corner_cascade() {
        // Spec scenario: 3x3 board, two tokens into the (0,0) corner. The
        // second token overflows the field, pushing one token to each of its
        // two neighbors and leaving the corner empty.
        let board = Board::new(3, 3);
        let mut situation = Situation::new(&board);
        let corner = Pos::new(0, 0);

        situation.add_token(corner, Color::Black, None);
        assert!(situation.is_full(corner));
        assert_eq!(situation.total_tokens(), 1);

        situation.add_token(corner, Color::Black, None);
        assert!(situation.is_empty(corner));
        assert_eq!(situation.tokens(Pos::new(1, 0)), 1);
        assert_eq!(situation.tokens(Pos::new(0, 1)), 1);
        assert_eq!(situation.color(Pos::new(1, 0)), Some(Color::Black));
        assert_eq!(situation.color(Pos::new(0, 1)), Some(Color::Black));
        assert_eq!(situation.total_tokens(), 2);
    }

    #[test]
    fn test_cascade_conserves_tokens() {
        let board = Board::new(4, 4);
        let mut situation = Situation::new(&board);
        // Build a position dense enough to cascade but with both colors
        // spread out, so the uniform short-circuit does not trigger.
        let setup = [
            FieldSetup {
                pos: Pos::new(1, 1),
                color: Color::White,
                tokens: 3,
            },
            FieldSetup {
                pos: Pos::new(2, 1),
                color: Color::Black,
                tokens: 3,
            },
            FieldSetup {
                pos: Pos::new(3, 3),
                color: Color::Black,
                tokens: 1,
            },
            FieldSetup {
                pos: Pos::new(0, 3),
                color: Color::Black,
                tokens: 1,
            },
            FieldSetup {
                pos: Pos::new(0, 0),
                color: Color::Black,
                tokens: 1,
            },
        ];
        let mut situation2 = Situation::with_setup(&board, &setup);
        let before = situation2.total_tokens();
        situation2.add_token(Pos::new(1, 1), Color::White, None);
        if !situation2.is_uniform() {
            assert_eq!(situation2.total_tokens(), before + 1);
        }

        // Trivial case: no overflow at all.
        situation.add_token(Pos::new(2, 2), Color::White, None);
        assert_eq!(situation.total_tokens(), 1);
    }

    #[test]
    fn test_cascade_takes_over_neighbors() {
        let board = Board::new(3, 3);
        let setup = [FieldSetup {
            pos: Pos::new(1, 0),
            color: Color::White,
            tokens: 1,
        }];
        let mut situation = Situation::with_setup(&board, &setup);
        // Black overflows the adjacent corner; the white token at (1,0) is
        // taken over together with the incoming black one.
        situation.add_token(Pos::new(0, 0), Color::Black, None);
        situation.add_token(Pos::new(0, 0), Color::Black, None);
        assert_eq!(situation.color(Pos::new(1, 0)), Some(Color::Black));
        assert_eq!(situation.tokens(Pos::new(1, 0)), 2);
    }

    #[test]
    fn test_dominant_color_needs_two_fields() {
        let board = Board::new(4, 4);
        let mut situation = Situation::new(&board);
        assert_eq!(situation.dominant_color(), None);

        // One token: fewer than two tokens, never uniform.
        situation.relocate_token(Pos::new(1, 1), Color::White);
        assert_eq!(situation.dominant_color(), None);

        // Two tokens stacked in one field: still a single occupied field.
        situation.relocate_token(Pos::new(1, 1), Color::White);
        assert_eq!(situation.dominant_color(), None);

        // Second occupied field of the same color: uniform.
        situation.relocate_token(Pos::new(2, 2), Color::White);
        assert_eq!(situation.dominant_color(), Some(Color::White));
        assert!(situation.is_uniform());

        // A field of the other color breaks uniformity.
        situation.relocate_token(Pos::new(3, 3), Color::Black);
        assert_eq!(situation.dominant_color(), None);
        assert!(!situation.is_uniform());
    }

    #[test]
    fn test_uniform_short_circuit_ends_cascade() {
        // Once every occupied field is one color the cascade stops, even if
        // fields are still overflowing.
        let board = Board::new(3, 3);
        let setup = [
            FieldSetup {
                pos: Pos::new(0, 0),
                color: Color::White,
                tokens: 1,
            },
            FieldSetup {
                pos: Pos::new(1, 0),
                color: Color::Black,
                tokens: 2,
            },
        ];
        let mut situation = Situation::with_setup(&board, &setup);
        situation.add_token(Pos::new(0, 0), Color::White, None);
        // The corner overflow feeds (1,0) and (0,1); whatever the exact end
        // state, the board must be decided and the loop must have halted.
        assert!(situation.is_uniform());
    }

    #[test]
    fn test_clone_is_independent() {
        let board = Board::new(4, 4);
        let mut original = Situation::new(&board);
        original.add_token(Pos::new(1, 1), Color::Black, None);

        let mut copy = original.clone();
        copy.add_token(Pos::new(2, 2), Color::White, None);

        assert_eq!(original.total_tokens(), 1);
        assert_eq!(copy.total_tokens(), 2);
        assert!(original.is_empty(Pos::new(2, 2)));
    }

    #[test]
    fn test_observer_notifications() {
        struct Recorder {
            placed: Vec<Pos>,
            steps: usize,
        }
        impl CascadeObserver for Recorder {
            fn move_placed(&mut self, _situation: &Situation, pos: Pos) {
                self.placed.push(pos);
            }
            fn cascade_step(&mut self, _situation: &Situation) {
                self.steps += 1;
            }
        }

        let board = Board::new(3, 3);
        let mut situation = Situation::new(&board);
        let mut recorder = Recorder {
            placed: Vec::new(),
            steps: 0,
        };

        let corner = Pos::new(0, 0);
        situation.add_token(corner, Color::Black, Some(&mut recorder));
        assert_eq!(recorder.placed, vec![corner]);
        assert_eq!(recorder.steps, 0); // no overflow yet

        situation.add_token(corner, Color::Black, Some(&mut recorder));
        assert_eq!(recorder.placed, vec![corner, corner]);
        assert_eq!(recorder.steps, 1); // one resolved overflow step
    }
}
