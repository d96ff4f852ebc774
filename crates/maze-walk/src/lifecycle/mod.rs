//! # Lifecycle
//!
//! [`MazeSystem`] owns one generation run from start to finish: it builds the
//! actors, waits for their wiring, injects the first `visit`, and tears
//! everything down again once the walk completes, fails or is cancelled.

use crate::config::MazeConfig;
use crate::error::MazeError;
use crate::model::{Grid, Maze};
use crate::protocol::{Controller, Signal};
use crate::topology::Topology;
use actor_runtime::journal::diagram;
use actor_runtime::{ActorSystem, Delivery, Journal, RuntimeError};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument};

/// Result of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Wall flags at the moment the actors stopped.
    pub maze: Maze,
    /// `true` only if the walk returned to its origin before cancellation.
    pub completed: bool,
    /// Total number of protocol events handled by all actors.
    pub events: u64,
    /// Every delivery in order. Empty unless [`MazeConfig::journal`] was set.
    pub journal: Vec<Delivery>,
}

impl Outcome {
    /// The journal as `src -> dst: event(arg)` lines.
    pub fn diagram(&self) -> String {
        diagram(&self.journal)
    }
}

enum Finish {
    Completed,
    Cancelled,
    Fault(RuntimeError),
}

/// The lifecycle controller for one maze generation.
///
/// # Run Sequence
///
/// 1. Spawn the controller (`init`) and the grid topology
/// 2. Start every actor and wait for all `_wire` events to be processed
/// 3. Send `visit(init)` to the cell at `(0, 0)`
/// 4. Wait for the root backtrack, an actor fault, or external cancellation
/// 5. Stop all actors and snapshot the wall flags
///
/// # Example
///
/// ```ignore
/// let system = MazeSystem::new(MazeConfig::new(8, 8))?;
/// let outcome = system.run(CancellationToken::new()).await?;
/// assert!(outcome.completed);
/// println!("{}", outcome.maze);
/// ```
pub struct MazeSystem {
    config: MazeConfig,
}

impl MazeSystem {
    /// Validates `config`. Nothing is spawned until [`run`](Self::run).
    pub fn new(config: MazeConfig) -> Result<Self, MazeError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Generates one maze.
    ///
    /// Cancelling `cancel` stops the run early; the outcome then reports
    /// `completed == false` with whatever walls were opened so far. An actor
    /// fault (a wiring or protocol bug) is returned as an error.
    #[instrument(name = "maze", skip_all, fields(rows = self.config.rows, cols = self.config.cols))]
    pub async fn run(self, cancel: CancellationToken) -> Result<Outcome, MazeError> {
        let MazeConfig {
            rows,
            cols,
            mailbox_capacity,
            draws,
            journal: record,
        } = self.config;
        let token = cancel.child_token();
        let grid = Arc::new(Grid::new(rows, cols));

        // =====================================================================
        // Step 1: Spawn and wire
        // =====================================================================

        let mut system = ActorSystem::new(mailbox_capacity)?;
        let (done_tx, mut done_rx) = oneshot::channel();
        let init = system.spawn("init", Controller::new(done_tx, token.clone()));
        let topology = Topology::build(&mut system, &grid, &draws)?;
        let journal = Journal::new();
        if record {
            system.record(&journal);
        }
        let mut running = system.start(token.clone());

        let wired = tokio::select! {
            biased;
            _ = token.cancelled() => None,
            wired = running.wait_wired() => Some(wired),
        };
        let finish = match wired {
            None => Finish::Cancelled,
            Some(Err(e)) => {
                // A dropped ack means an actor died; prefer its own error.
                let fault = running.shutdown().await.err().unwrap_or(e);
                return Err(fault.into());
            }
            Some(Ok(())) => {
                info!(rows, cols, walls = topology.wall_count(), "Wired");

                // =============================================================
                // Step 2: Seed the walk and wait for it to finish
                // =============================================================

                let origin = topology.origin();
                let seeded = running
                    .postbox()
                    .send(init, origin, Signal::Visit { from: init })
                    .await;
                match seeded {
                    Err(RuntimeError::Cancelled) => Finish::Cancelled,
                    Err(e) => Finish::Fault(e),
                    Ok(()) => {
                        info!(origin = running.postbox().name_of(origin), "Seeded");
                        tokio::select! {
                            biased;
                            done = &mut done_rx => match done {
                                Ok(()) => Finish::Completed,
                                Err(_) => Finish::Cancelled,
                            },
                            fault = running.next_fault() => Finish::Fault(fault),
                            _ = token.cancelled() => Finish::Cancelled,
                        }
                    }
                }
            }
        };

        // =====================================================================
        // Step 3: Stop every actor and snapshot
        // =====================================================================

        let stopped = running.shutdown().await;
        let events = match (finish, stopped) {
            (Finish::Fault(e), _) | (_, Err(e)) => {
                error!(error = %e, "Generation failed");
                return Err(e.into());
            }
            (Finish::Completed, Ok(events)) => {
                info!(events, "Completed");
                return Ok(Outcome {
                    maze: grid.snapshot(),
                    completed: true,
                    events,
                    journal: journal.collect(),
                });
            }
            (Finish::Cancelled, Ok(events)) => events,
        };
        // The walk may have finished in the same instant the caller cancelled.
        let completed = done_rx.try_recv().is_ok();
        if !completed {
            info!(events, "Cancelled before completion");
        }
        Ok(Outcome {
            maze: grid.snapshot(),
            completed,
            events,
            journal: journal.collect(),
        })
    }
}

/// Cancels `token` once `after` has elapsed, unless it was cancelled first.
pub fn cancel_after(token: CancellationToken, after: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            _ = token.cancelled() => {}
            _ = tokio::time::sleep(after) => {
                info!(?after, "Deadline reached");
                token.cancel();
            }
        }
    })
}
