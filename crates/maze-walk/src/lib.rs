//! # Maze Walk
//!
//! Perfect-maze generation by a randomized depth-first walk, carried out
//! entirely by message-passing actors on top of [`actor_runtime`].
//!
//! Every grid position is a [`Cell`](protocol::Cell) with four
//! [`Probe`](protocol::Probe)s, and every internal wall is its own
//! [`Wall`](protocol::Wall) actor. A single scan token moves through them; a
//! wall opens when a visit passes through it. The walls opened by the time the
//! walk returns to its origin form a spanning tree of the grid.
//!
//! ## Modules
//!
//! - [`config`]: [`MazeConfig`] and validation
//! - [`draw`]: where each Cell's random ring offsets come from
//! - [`model`]: live wall flags ([`Grid`](model::Grid)) and the finished [`Maze`]
//! - [`protocol`]: the actor behaviors and their [`Signal`](protocol::Signal) events
//! - [`topology`]: spawning and wiring an R x C grid of actors
//! - [`lifecycle`]: [`MazeSystem`], one generation run end to end

pub mod config;
pub mod draw;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod protocol;
pub mod topology;

pub use config::MazeConfig;
pub use draw::DrawPlan;
pub use error::MazeError;
pub use lifecycle::{cancel_after, MazeSystem, Outcome};
pub use model::Maze;
