//! # Draw Sources
//!
//! The only randomness in the walk is the ring offset each Cell draws when it
//! starts a neighbor scan. Everything else is a deterministic function of the
//! events exchanged, so swapping the [`OffsetSource`] is all it takes to make a
//! run reproducible.
//!
//! Every Cell owns its own source, derived from the [`DrawPlan`] and the Cell's
//! grid index. No source is ever shared between actors.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Number of probe-ring positions an offset can select.
pub const RING_SIZE: u8 = 4;

/// Supplies one ring offset in `0..4` per scan.
pub trait OffsetSource: Send + 'static {
    fn next_offset(&mut self) -> u8;
}

/// Uniform offsets from a `StdRng`.
pub struct RandomOffsets {
    rng: StdRng,
}

impl RandomOffsets {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl OffsetSource for RandomOffsets {
    fn next_offset(&mut self) -> u8 {
        self.rng.random_range(0..RING_SIZE)
    }
}

/// Replays a fixed sequence (mod 4), starting over when exhausted. An empty
/// sequence always yields 0.
pub struct FixedOffsets {
    sequence: Arc<[u8]>,
    cursor: usize,
}

impl FixedOffsets {
    pub fn new(sequence: impl Into<Arc<[u8]>>) -> Self {
        Self {
            sequence: sequence.into(),
            cursor: 0,
        }
    }
}

impl OffsetSource for FixedOffsets {
    fn next_offset(&mut self) -> u8 {
        if self.sequence.is_empty() {
            return 0;
        }
        let value = self.sequence[self.cursor % self.sequence.len()];
        self.cursor += 1;
        value % RING_SIZE
    }
}

/// How each Cell's [`OffsetSource`] is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawPlan {
    /// Fresh OS entropy per Cell.
    #[default]
    Entropy,
    /// Reproducible: Cell `i` is seeded from the base seed and `i`.
    Seeded(u64),
    /// Every Cell replays the same sequence.
    Fixed(Vec<u8>),
}

impl DrawPlan {
    pub fn source_for(&self, cell_index: usize) -> Box<dyn OffsetSource> {
        match self {
            DrawPlan::Entropy => Box::new(RandomOffsets::from_entropy()),
            DrawPlan::Seeded(seed) => {
                let mixed = seed.wrapping_add((cell_index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
                Box::new(RandomOffsets::seeded(mixed))
            }
            DrawPlan::Fixed(sequence) => Box::new(FixedOffsets::new(sequence.clone())),
        }
    }
}
