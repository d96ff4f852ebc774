use super::grid::{Position, Side};
use crate::config::cell_count;
use crate::error::MazeError;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Wall flags owned by one position: its north and west walls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellWalls {
    pub open_north: bool,
    pub open_west: bool,
}

/// Immutable snapshot of a generated maze.
///
/// This is what the rest of the program consumes once the actors are gone: the
/// renderer, the JSON output and the structural checks.
///
/// Decoding validates the shape: `cells` must hold exactly `rows * cols`
/// entries of a non-empty grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMaze")]
pub struct Maze {
    rows: usize,
    cols: usize,
    cells: Vec<CellWalls>,
}

#[derive(Deserialize)]
struct RawMaze {
    rows: usize,
    cols: usize,
    cells: Vec<CellWalls>,
}

impl TryFrom<RawMaze> for Maze {
    type Error = MazeError;

    fn try_from(raw: RawMaze) -> Result<Self, Self::Error> {
        let expected = cell_count(raw.rows, raw.cols)?;
        if raw.cells.len() != expected {
            return Err(MazeError::CellCount {
                expected,
                actual: raw.cells.len(),
            });
        }
        Ok(Self {
            rows: raw.rows,
            cols: raw.cols,
            cells: raw.cells,
        })
    }
}

impl Maze {
    /// Builds a snapshot from row-major flags. Missing trailing cells are closed.
    pub fn from_cells(rows: usize, cols: usize, mut cells: Vec<CellWalls>) -> Self {
        cells.resize(rows * cols, CellWalls::default());
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn get(&self, row: usize, col: usize) -> Option<CellWalls> {
        (row < self.rows && col < self.cols).then(|| self.cells[row * self.cols + col])
    }

    /// Whether the wall on `side` of `pos` is open. Outer walls report closed.
    pub fn is_open(&self, pos: Position, side: Side) -> bool {
        let Some(cell) = self.get(pos.row, pos.col) else {
            return false;
        };
        match side {
            Side::North => pos.row > 0 && cell.open_north,
            Side::West => pos.col > 0 && cell.open_west,
            Side::South => self
                .get(pos.row + 1, pos.col)
                .is_some_and(|below| below.open_north),
            Side::East => self
                .get(pos.row, pos.col + 1)
                .is_some_and(|right| right.open_west),
        }
    }

    /// No flag on the outer boundary is set.
    pub fn border_is_closed(&self) -> bool {
        let top = (0..self.cols).all(|col| !self.cells[col].open_north);
        let left = (0..self.rows).all(|row| !self.cells[row * self.cols].open_west);
        top && left
    }

    /// Every open internal wall as the pair of positions it connects.
    pub fn open_walls(&self) -> Vec<(Position, Position)> {
        let mut walls = Vec::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let here = Position::new(row, col);
                if self.is_open(here, Side::North) {
                    walls.push((Position::new(row - 1, col), here));
                }
                if self.is_open(here, Side::West) {
                    walls.push((Position::new(row, col - 1), here));
                }
            }
        }
        walls
    }

    pub fn open_wall_count(&self) -> usize {
        self.open_walls().len()
    }

    /// Number of positions reachable from `start` through open walls.
    pub fn reachable_from(&self, start: Position) -> usize {
        if self.get(start.row, start.col).is_none() {
            return 0;
        }
        let mut seen = vec![false; self.rows * self.cols];
        let mut queue = VecDeque::from([start]);
        seen[start.row * self.cols + start.col] = true;
        let mut count = 0;
        while let Some(pos) = queue.pop_front() {
            count += 1;
            for side in Side::RING {
                if !self.is_open(pos, side) {
                    continue;
                }
                let next = match side {
                    Side::North => Position::new(pos.row - 1, pos.col),
                    Side::East => Position::new(pos.row, pos.col + 1),
                    Side::South => Position::new(pos.row + 1, pos.col),
                    Side::West => Position::new(pos.row, pos.col - 1),
                };
                let index = next.row * self.cols + next.col;
                if !seen[index] {
                    seen[index] = true;
                    queue.push_back(next);
                }
            }
        }
        count
    }

    /// A perfect maze: the open walls form a spanning tree over all positions.
    pub fn is_perfect(&self) -> bool {
        let total = self.rows * self.cols;
        if total == 0 || !self.border_is_closed() {
            return false;
        }
        let walls = self.open_walls();
        if walls.len() != total - 1 {
            return false;
        }
        let mut parent: Vec<usize> = (0..total).collect();
        fn find(parent: &mut [usize], mut x: usize) -> usize {
            while parent[x] != x {
                parent[x] = parent[parent[x]];
                x = parent[x];
            }
            x
        }
        for (a, b) in walls {
            let ra = find(&mut parent, a.row * self.cols + a.col);
            let rb = find(&mut parent, b.row * self.cols + b.col);
            if ra == rb {
                return false;
            }
            parent[ra] = rb;
        }
        // total - 1 acyclic edges over total nodes is connected
        true
    }

    /// Box-drawing glyph for the north-west corner of `(row, col)`.
    ///
    /// `row == rows` and `col == cols` address the south and east border corners.
    fn corner(&self, row: usize, col: usize) -> char {
        const N: u8 = 1;
        const E: u8 = 2;
        const S: u8 = 4;
        const W: u8 = 8;
        let mut mask = 0;
        if let Some(cell) = self.get(row, col) {
            if !cell.open_north {
                mask |= E;
            }
            if !cell.open_west {
                mask |= S;
            }
        }
        if let Some(above) = row.checked_sub(1).and_then(|r| self.get(r, col)) {
            if !above.open_west {
                mask |= N;
            }
        }
        if let Some(left) = col.checked_sub(1).and_then(|c| self.get(row, c)) {
            if !left.open_north {
                mask |= W;
            }
        }
        // South and east borders have no owning position but are always closed.
        if col >= self.cols {
            if row > 0 {
                mask |= N;
            }
            if row < self.rows {
                mask |= S;
            }
        }
        if row >= self.rows {
            if col > 0 {
                mask |= W;
            }
            if col < self.cols {
                mask |= E;
            }
        }
        match mask {
            m if m == N => '╵',
            m if m == E => '╶',
            m if m == S => '╷',
            m if m == W => '╴',
            m if m == E | W => '─',
            m if m == N | S => '│',
            m if m == E | S => '┌',
            m if m == S | W => '┐',
            m if m == N | E => '└',
            m if m == N | W => '┘',
            m if m == N | E | S => '├',
            m if m == N | S | W => '┤',
            m if m == E | S | W => '┬',
            m if m == N | E | W => '┴',
            m if m == N | E | S | W => '┼',
            _ => ' ',
        }
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows == 0 || self.cols == 0 {
            return Ok(());
        }
        for row in 0..self.rows {
            for col in 0..self.cols {
                let cell = self.cells[row * self.cols + col];
                let wall = if row == 0 || !cell.open_north { '─' } else { ' ' };
                write!(f, "{}{}", self.corner(row, col), wall)?;
            }
            writeln!(f, "{}", self.corner(row, self.cols))?;
            for col in 0..self.cols {
                let cell = self.cells[row * self.cols + col];
                let wall = if col == 0 || !cell.open_west { "│ " } else { "  " };
                f.write_str(wall)?;
            }
            writeln!(f, "│")?;
        }
        for col in 0..self.cols {
            write!(f, "{}─", self.corner(self.rows, col))?;
        }
        writeln!(f, "{}", self.corner(self.rows, self.cols))
    }
}
