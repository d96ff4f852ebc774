//! Pure data structures for maze state.
//!
//! - [`Grid`] - live, atomically written wall flags shared with Wall actors
//! - [`Maze`] - an immutable snapshot used for rendering and checks

pub mod grid;
pub mod maze;

pub use grid::{Grid, Position, Side};
pub use maze::{CellWalls, Maze};
