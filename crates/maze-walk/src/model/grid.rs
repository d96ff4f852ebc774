use super::maze::{CellWalls, Maze};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// Row/column coordinate of a grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.row, self.col)
    }
}

/// The four sides of a cell, in probe-ring order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    North,
    East,
    South,
    West,
}

impl Side {
    /// Ring order: N -> E -> S -> W -> N.
    pub const RING: [Side; 4] = [Side::North, Side::East, Side::South, Side::West];

    pub fn next(self) -> Side {
        match self {
            Side::North => Side::East,
            Side::East => Side::South,
            Side::South => Side::West,
            Side::West => Side::North,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Side::North => 'N',
            Side::East => 'E',
            Side::South => 'S',
            Side::West => 'W',
        }
    }
}

/// Live wall flags written by Wall actors while the walk runs.
///
/// Only north and west walls are stored; a south or east wall is the north or
/// west wall of the neighbouring position. Every flag has exactly one writer
/// (the Wall actor on that side), so plain atomics are enough.
#[derive(Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    open_north: Vec<AtomicBool>,
    open_west: Vec<AtomicBool>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        let cells = rows * cols;
        Self {
            rows,
            cols,
            open_north: (0..cells).map(|_| AtomicBool::new(false)).collect(),
            open_west: (0..cells).map(|_| AtomicBool::new(false)).collect(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn index(&self, pos: Position) -> usize {
        pos.row * self.cols + pos.col
    }

    /// Marks the north wall of `pos` as open. Opening twice is a no-op.
    ///
    /// Returns `true` if the wall was closed before.
    pub fn open_north(&self, pos: Position) -> bool {
        let index = self.index(pos);
        !self.open_north[index].swap(true, Ordering::AcqRel)
    }

    /// Marks the west wall of `pos` as open. Same contract as [`open_north`](Self::open_north).
    pub fn open_west(&self, pos: Position) -> bool {
        let index = self.index(pos);
        !self.open_west[index].swap(true, Ordering::AcqRel)
    }

    /// Whether the wall on `side` of `pos` is open. Border walls are always closed.
    pub fn is_open(&self, pos: Position, side: Side) -> bool {
        let flag = match side {
            Side::North => &self.open_north[self.index(pos)],
            Side::West => &self.open_west[self.index(pos)],
            Side::South if pos.row + 1 < self.rows => {
                &self.open_north[self.index(Position::new(pos.row + 1, pos.col))]
            }
            Side::East if pos.col + 1 < self.cols => {
                &self.open_west[self.index(Position::new(pos.row, pos.col + 1))]
            }
            Side::South | Side::East => return false,
        };
        flag.load(Ordering::Acquire)
    }

    /// Copies the current flags into a plain [`Maze`].
    pub fn snapshot(&self) -> Maze {
        let cells = (0..self.rows * self.cols)
            .map(|index| CellWalls {
                open_north: self.open_north[index].load(Ordering::Acquire),
                open_west: self.open_west[index].load(Ordering::Acquire),
            })
            .collect();
        Maze::from_cells(self.rows, self.cols, cells)
    }
}
