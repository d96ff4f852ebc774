//! Run configuration for maze generation.

use crate::draw::DrawPlan;
use crate::error::MazeError;
use actor_runtime::DEFAULT_MAILBOX_CAPACITY;
use serde::{Deserialize, Serialize};

/// Everything a [`MazeSystem`](crate::lifecycle::MazeSystem) needs to build and run a walk.
///
/// Deserializable so embedders can load it from their own config files; all
/// fields fall back to [`Default`] when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    pub rows: usize,
    pub cols: usize,
    pub mailbox_capacity: usize,
    pub draws: DrawPlan,
    /// Keep a journal of every delivery for a sequence diagram.
    pub journal: bool,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            rows: 5,
            cols: 5,
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
            draws: DrawPlan::default(),
            journal: false,
        }
    }
}

impl MazeConfig {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Self::default()
        }
    }

    pub fn with_draws(mut self, draws: DrawPlan) -> Self {
        self.draws = draws;
        self
    }

    pub fn with_mailbox_capacity(mut self, capacity: usize) -> Self {
        self.mailbox_capacity = capacity;
        self
    }

    pub fn with_journal(mut self, journal: bool) -> Self {
        self.journal = journal;
        self
    }

    pub fn validate(&self) -> Result<(), MazeError> {
        cell_count(self.rows, self.cols)?;
        if self.mailbox_capacity == 0 {
            return Err(MazeError::InvalidCapacity);
        }
        Ok(())
    }
}

/// Number of positions in a `rows` x `cols` grid. Rejects empty grids and
/// sizes that do not fit in `usize`.
pub(crate) fn cell_count(rows: usize, cols: usize) -> Result<usize, MazeError> {
    rows.checked_mul(cols)
        .filter(|&cells| cells > 0)
        .ok_or(MazeError::InvalidDimensions { rows, cols })
}
