//! # Maze Topology
//!
//! Spawns every actor of an R x C walk into an [`ActorSystem`] and wires them:
//!
//! - per position: one [`Cell`] and four [`Probe`]s (N, E, S, W)
//! - per internal wall: one [`Wall`], owned by the south or east position
//! - one shared [`Terminator`] for the outer border
//!
//! Walls only exist as the north wall of rows `> 0` and the west wall of
//! columns `> 0`. A position's south and east walls are its neighbors' north
//! and west walls.

use crate::draw::DrawPlan;
use crate::model::{Grid, Position, Side};
use crate::protocol::{role, Cell, Probe, Signal, Terminator, Wall};
use actor_runtime::{ActorId, ActorSystem, RuntimeError, Wiring};
use std::sync::Arc;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy)]
struct Site {
    cell: ActorId,
    /// Indexed in [`Side::RING`] order.
    probes: [ActorId; 4],
    north_wall: Option<ActorId>,
    west_wall: Option<ActorId>,
}

/// Handles of every actor in one maze.
#[derive(Debug)]
pub struct Topology {
    rows: usize,
    cols: usize,
    sites: Vec<Site>,
    border: ActorId,
}

fn ring_index(side: Side) -> usize {
    match side {
        Side::North => 0,
        Side::East => 1,
        Side::South => 2,
        Side::West => 3,
    }
}

impl Topology {
    /// Spawns and wires the whole grid. Walls record openings in `grid`.
    pub fn build(
        system: &mut ActorSystem<Signal>,
        grid: &Arc<Grid>,
        draws: &DrawPlan,
    ) -> Result<Self, RuntimeError> {
        let (rows, cols) = (grid.rows(), grid.cols());
        let border = system.spawn("border", Terminator);

        let mut sites = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let pos = Position::new(row, col);
                let cell = system.spawn(
                    format!("cell{pos}"),
                    Cell::new(draws.source_for(grid.index(pos))),
                );
                let probes = Side::RING
                    .map(|side| system.spawn(format!("probe{pos}{}", side.letter()), Probe::new()));
                let north_wall = (row > 0).then(|| {
                    let grid = Arc::clone(grid);
                    system.spawn(
                        format!("wall{pos}N"),
                        Wall::new(move || {
                            if grid.open_north(pos) {
                                debug!(%pos, side = "N", "Wall opened");
                            }
                        }),
                    )
                });
                let west_wall = (col > 0).then(|| {
                    let grid = Arc::clone(grid);
                    system.spawn(
                        format!("wall{pos}W"),
                        Wall::new(move || {
                            if grid.open_west(pos) {
                                debug!(%pos, side = "W", "Wall opened");
                            }
                        }),
                    )
                });
                sites.push(Site {
                    cell,
                    probes,
                    north_wall,
                    west_wall,
                });
            }
        }

        let topology = Self {
            rows,
            cols,
            sites,
            border,
        };
        topology.wire(system)?;
        debug!(rows, cols, actors = system.len(), "Topology built");
        Ok(topology)
    }

    fn wire(&self, system: &mut ActorSystem<Signal>) -> Result<(), RuntimeError> {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let pos = Position::new(row, col);
                let site = self.site(pos);
                system.wire(
                    site.cell,
                    Wiring::new().with(role::PROBE, self.probe(pos, Side::North)),
                )?;
                for side in Side::RING {
                    system.wire(
                        self.probe(pos, side),
                        Wiring::new()
                            .with(role::CELL, site.cell)
                            .with(role::NEXT, self.probe(pos, side.next()))
                            .with(role::WALL, self.wall(pos, side)),
                    )?;
                }
                if let Some(wall) = site.north_wall {
                    let above = Position::new(row - 1, col);
                    system.wire(
                        wall,
                        Wiring::new()
                            .with(role::PROBE1, self.probe(pos, Side::North))
                            .with(role::PROBE2, self.probe(above, Side::South)),
                    )?;
                }
                if let Some(wall) = site.west_wall {
                    let left = Position::new(row, col - 1);
                    system.wire(
                        wall,
                        Wiring::new()
                            .with(role::PROBE1, self.probe(pos, Side::West))
                            .with(role::PROBE2, self.probe(left, Side::East)),
                    )?;
                }
                trace!(%pos, "Position wired");
            }
        }
        Ok(())
    }

    fn site(&self, pos: Position) -> &Site {
        &self.sites[pos.row * self.cols + pos.col]
    }

    /// The cell where the walk starts, at `(0, 0)`.
    pub fn origin(&self) -> ActorId {
        self.cell(Position::new(0, 0))
    }

    pub fn cell(&self, pos: Position) -> ActorId {
        self.site(pos).cell
    }

    pub fn probe(&self, pos: Position, side: Side) -> ActorId {
        self.site(pos).probes[ring_index(side)]
    }

    pub fn border(&self) -> ActorId {
        self.border
    }

    /// The actor guarding `side` of `pos`: a [`Wall`], or the border.
    pub fn wall(&self, pos: Position, side: Side) -> ActorId {
        let wall = match side {
            Side::North => self.site(pos).north_wall,
            Side::West => self.site(pos).west_wall,
            Side::South if pos.row + 1 < self.rows => {
                self.site(Position::new(pos.row + 1, pos.col)).north_wall
            }
            Side::East if pos.col + 1 < self.cols => {
                self.site(Position::new(pos.row, pos.col + 1)).west_wall
            }
            Side::South | Side::East => None,
        };
        wall.unwrap_or(self.border)
    }

    /// Number of [`Wall`] actors, excluding the border.
    pub fn wall_count(&self) -> usize {
        self.sites
            .iter()
            .map(|site| site.north_wall.iter().count() + site.west_wall.iter().count())
            .sum()
    }
}
