//! # Maze Errors
//!
//! Errors surfaced by the maze layer. Protocol faults inside actors arrive as
//! [`RuntimeError`]s and are wrapped, so callers match on one type.

use actor_runtime::RuntimeError;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum MazeError {
    #[error("Maze must be at least 1x1, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },
    #[error("Mailbox capacity must be at least 1")]
    InvalidCapacity,
    #[error("Maze has {actual} cells, expected {expected}")]
    CellCount { expected: usize, actual: usize },
    #[error("Actor runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}
