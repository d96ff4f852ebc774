//! # Walk Protocol
//!
//! The behaviors that carry out a randomized depth-first walk purely through
//! message passing. Five actor kinds take part:
//!
//! - [`Cell`]: one grid position, holds `visited` and the backtrack reference
//! - [`Probe`]: one side of a cell; the four probes form a ring
//! - [`Wall`]: relays between the probes of two adjacent cells and opens on visit
//! - [`Terminator`]: the shared outer border, always reports "visited"
//! - [`Controller`]: origin of the walk, notified when it finishes
//!
//! A single token is in flight at any time, so the walk is sequential even
//! though every actor runs in its own task.

mod cell;
mod controller;
mod probe;
mod signal;
mod terminator;
mod wall;

pub use cell::Cell;
pub use controller::Controller;
pub use probe::Probe;
pub use signal::{role, Signal};
pub use terminator::Terminator;
pub use wall::{OnOpen, Wall};
