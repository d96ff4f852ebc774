//! # Actor System
//!
//! The [`ActorSystem`] is the arena: it allocates an [`ActorId`] and a bounded
//! mailbox per actor, collects the `_wire` deliveries and, once everything is
//! registered, starts one Tokio task per actor.
//!
//! ## Usage Pattern
//!
//! 1.  **Create**: `spawn()` every actor, keeping the returned handles.
//! 2.  **Wire**: `wire()` each actor that addresses peers.
//! 3.  **Run**: `start()` the loops, then `wait_wired()` before injecting the
//!     first protocol event.
//!
//! ```rust
//! use actor_runtime::{ActorSystem, Behavior, Context, Event, Message, RuntimeError, Wiring};
//! use async_trait::async_trait;
//! use tokio_util::sync::CancellationToken;
//!
//! #[derive(Debug)]
//! struct Ping;
//! impl Message for Ping {
//!     fn name(&self) -> &'static str { "ping" }
//! }
//!
//! struct Echo;
//! #[async_trait]
//! impl Behavior<Ping> for Echo {
//!     async fn handle(&mut self, _: Event<Ping>, ctx: &Context<Ping>) -> Result<(), RuntimeError> {
//!         let _peer = ctx.peer("peer")?;
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), RuntimeError> {
//!     let mut system = ActorSystem::new(10)?;
//!     let a = system.spawn("a", Echo);
//!     let b = system.spawn("b", Echo);
//!     system.wire(a, Wiring::new().with("peer", b))?;
//!     system.wire(b, Wiring::new().with("peer", a))?;
//!
//!     let mut running = system.start(CancellationToken::new());
//!     running.wait_wired().await?;
//!     running.postbox().send(a, b, Ping).await?;
//!     running.shutdown().await?;
//!     Ok(())
//! }
//! ```

use crate::actor::Actor;
use crate::behavior::Behavior;
use crate::error::RuntimeError;
use crate::journal::{Journal, JournalSender};
use crate::message::{ActorId, Mail, Message};
use crate::postbox::Postbox;
use crate::wiring::{Wiring, WiringBarrier};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn, Instrument, Span};

/// Mailbox capacity used when nothing else is configured.
pub const DEFAULT_MAILBOX_CAPACITY: usize = 10;

/// Builder half of the arena. Nothing runs until [`start`](Self::start).
pub struct ActorSystem<M: Message> {
    capacity: usize,
    slots: Vec<(Arc<str>, mpsc::Sender<Mail<M>>)>,
    actors: Vec<Actor<M>>,
    barrier: WiringBarrier,
    journal: Option<JournalSender>,
}

impl<M: Message> ActorSystem<M> {
    /// Creates an empty system whose mailboxes hold `capacity` events each.
    pub fn new(capacity: usize) -> Result<Self, RuntimeError> {
        if capacity == 0 {
            return Err(RuntimeError::ZeroCapacity);
        }
        Ok(Self {
            capacity,
            slots: Vec::new(),
            actors: Vec::new(),
            barrier: WiringBarrier::new(),
            journal: None,
        })
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Registers a new actor and returns its handle.
    pub fn spawn(&mut self, name: impl Into<String>, behavior: impl Behavior<M>) -> ActorId {
        let id = ActorId::new(self.slots.len());
        let (sender, receiver) = mpsc::channel(self.capacity);
        self.slots.push((Arc::from(name.into()), sender));
        self.actors.push(Actor::new(id, receiver, Box::new(behavior)));
        id
    }

    /// Enqueues the `_wire` event for `id` and counts it in the barrier.
    pub fn wire(&mut self, id: ActorId, table: Wiring) -> Result<(), RuntimeError> {
        let (name, sender) = self
            .slots
            .get(id.index())
            .ok_or(RuntimeError::UnknownActor(id))?;
        let ack = self.barrier.register(name.to_string());
        sender
            .try_send(Mail::Wire { table, ack })
            .map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => RuntimeError::MailboxFull {
                    actor: name.to_string(),
                },
                mpsc::error::TrySendError::Closed(_) => RuntimeError::MailboxClosed {
                    actor: name.to_string(),
                },
            })
    }

    /// Records every delivery of this system into `journal`.
    pub fn record(&mut self, journal: &Journal) {
        self.journal = Some(journal.sender());
    }

    /// Spawns every actor's dispatch loop. All loops stop when `cancel` fires.
    ///
    /// The loops run inside the caller's current span.
    pub fn start(self, cancel: CancellationToken) -> RunningSystem<M> {
        let postbox = Postbox::new(self.slots, cancel.clone());
        let mut tasks = JoinSet::new();
        for actor in self.actors {
            let id = actor.id();
            let run = actor.run(postbox.clone(), cancel.clone(), self.journal.clone());
            tasks.spawn(async move { (id, run.await) }.instrument(Span::current()));
        }
        info!(actors = postbox.len(), wires = self.barrier.pending(), "System started");

        RunningSystem {
            postbox,
            barrier: Some(self.barrier),
            tasks,
            cancel,
            handled: 0,
        }
    }
}

/// Started half of the arena: the running tasks and their shared postbox.
pub struct RunningSystem<M: Message> {
    postbox: Postbox<M>,
    barrier: Option<WiringBarrier>,
    tasks: JoinSet<(ActorId, Result<u64, RuntimeError>)>,
    cancel: CancellationToken,
    handled: u64,
}

impl<M: Message> RunningSystem<M> {
    pub fn postbox(&self) -> &Postbox<M> {
        &self.postbox
    }

    /// Blocks until every `_wire` registered before `start` was processed.
    ///
    /// Calling it again afterwards returns immediately.
    pub async fn wait_wired(&mut self) -> Result<(), RuntimeError> {
        match self.barrier.take() {
            Some(barrier) => barrier.wait().await,
            None => Ok(()),
        }
    }

    /// Resolves with the first actor failure. Never resolves while all actors
    /// are healthy.
    pub async fn next_fault(&mut self) -> RuntimeError {
        while let Some(joined) = self.tasks.join_next().await {
            match joined {
                Ok((_, Ok(handled))) => self.handled += handled,
                Ok((id, Err(e))) => {
                    warn!(actor = self.postbox.name_of(id), error = %e, "Actor failed");
                    return e;
                }
                Err(e) => return RuntimeError::ActorPanicked(e.to_string()),
            }
        }
        std::future::pending().await
    }

    /// Cancels every loop and waits for all of them to exit.
    ///
    /// Returns the total number of events handled, or the first failure that
    /// was not caused by the shutdown itself.
    pub async fn shutdown(mut self) -> Result<u64, RuntimeError> {
        self.cancel.cancel();
        let mut first_fault = None;
        while let Some(joined) = self.tasks.join_next().await {
            let fault = match joined {
                Ok((_, Ok(handled))) => {
                    self.handled += handled;
                    None
                }
                Ok((_, Err(e))) => Some(e),
                Err(e) => Some(RuntimeError::ActorPanicked(e.to_string())),
            };
            if first_fault.is_none() {
                first_fault = fault;
            }
        }
        debug!(handled = self.handled, "System stopped");
        match first_fault {
            Some(e) => Err(e),
            None => Ok(self.handled),
        }
    }
}
