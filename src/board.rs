//! Board topology: positions, colors, and the fixed neighbor graph.
//!
//! A [`Board`] is built once per game and never mutated afterwards. It
//! precomputes the neighbor list of every field, clipped at the boundaries
//! (no wraparound), and derives each field's overflow limit from it: a field
//! overflows as soon as it holds as many tokens as it has neighbors. Every
//! [`crate::situation::Situation`] created during a game, including all
//! clones made inside the game-tree search, shares one board by reference.

use std::fmt;

/// One of the two token/player colors.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Returns black for white and vice versa.
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// A field position on the board. Two positions are equal iff both
/// coordinates are equal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub fn new(x: usize, y: usize) -> Self {
        Pos { x, y }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four orthogonal directions, in the fixed iteration order used when
/// building neighbor lists. This order is observable: cascades distribute
/// tokens in it and the threat test inspects neighbors in it.
const DIRECTIONS: [(isize, isize); 4] = [
    (0, -1), // north
    (1, 0),  // east
    (0, 1),  // south
    (-1, 0), // west
];

/// The immutable layout of a game board.
///
/// Holds the dimensions and, for every field, the precomputed ordered list
/// of neighbor positions. Corner fields have 2 neighbors, edge fields 3,
/// interior fields 4.
pub struct Board {
    dim_x: usize,
    dim_y: usize,
    neighbors: Vec<Vec<Pos>>,
}

impl Board {
    /// Builds the board for the given dimensions and precomputes all
    /// neighbor lists.
    pub fn new(dim_x: usize, dim_y: usize) -> Self {
        let mut neighbors = Vec::with_capacity(dim_x * dim_y);
        for y in 0..dim_y {
            for x in 0..dim_x {
                let mut list = Vec::with_capacity(4);
                for (dx, dy) in DIRECTIONS {
                    let nx = x as isize + dx;
                    let ny = y as isize + dy;
                    if nx >= 0 && (nx as usize) < dim_x && ny >= 0 && (ny as usize) < dim_y {
                        list.push(Pos::new(nx as usize, ny as usize));
                    }
                }
                neighbors.push(list);
            }
        }
        Board {
            dim_x,
            dim_y,
            neighbors,
        }
    }

    pub fn dim_x(&self) -> usize {
        self.dim_x
    }

    pub fn dim_y(&self) -> usize {
        self.dim_y
    }

    /// Flat index of a position, row-major.
    pub(crate) fn idx(&self, pos: Pos) -> usize {
        pos.y * self.dim_x + pos.x
    }

    /// All positions of the board, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        let dim_x = self.dim_x;
        (0..self.dim_x * self.dim_y).map(move |i| Pos::new(i % dim_x, i / dim_x))
    }

    /// The neighbors of a position, in the fixed north/east/south/west order
    /// clipped at the boundaries.
    pub fn neighbors(&self, pos: Pos) -> &[Pos] {
        &self.neighbors[self.idx(pos)]
    }

    /// The number of tokens at which the field overflows. Equal to the
    /// field's neighbor count.
    pub fn limit(&self, pos: Pos) -> usize {
        self.neighbors[self.idx(pos)].len()
    }

    /// Whether the position lies within the board.
    pub fn contains(&self, pos: Pos) -> bool {
        pos.x < self.dim_x && pos.y < self.dim_y
    }
}
