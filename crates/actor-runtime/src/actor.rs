//! # Dispatch Loop
//!
//! This module defines the [`Actor`]: one bounded mailbox plus one behavior,
//! driven by a loop that runs in its own Tokio task.
//!
//! **Concurrency Model**:
//! Even though a large grid spawns thousands of actors, each one processes its
//! own mailbox *sequentially*. A handler runs to completion before the next
//! event is popped, so behavior state is never touched by two tasks at once.
//! Cancellation is observed between events, never in the middle of a handler.

use crate::behavior::Behavior;
use crate::error::RuntimeError;
use crate::journal::{self, JournalSender};
use crate::message::{ActorId, Mail, Message};
use crate::postbox::{Context, Postbox};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, trace};

/// Receiving half of an actor: its mailbox and its behavior.
pub struct Actor<M: Message> {
    id: ActorId,
    mailbox: mpsc::Receiver<Mail<M>>,
    behavior: Box<dyn Behavior<M>>,
}

impl<M: Message> Actor<M> {
    pub(crate) fn new(
        id: ActorId,
        mailbox: mpsc::Receiver<Mail<M>>,
        behavior: Box<dyn Behavior<M>>,
    ) -> Self {
        Self {
            id,
            mailbox,
            behavior,
        }
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    /// Runs the actor's event loop until `cancel` fires.
    ///
    /// With a `journal`, every event is recorded right before it is handled.
    /// Returns the number of events handled. A handler error stops the loop and
    /// is returned, unless the system was already cancelled: an aborted send
    /// during shutdown is not a fault.
    pub async fn run(
        mut self,
        postbox: Postbox<M>,
        cancel: CancellationToken,
        journal: Option<JournalSender>,
    ) -> Result<u64, RuntimeError> {
        let mut ctx = Context::new(self.id, postbox);
        let mut handled = 0u64;
        debug!(actor = ctx.name(), "Actor started");

        loop {
            let mail = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                mail = self.mailbox.recv() => match mail {
                    Some(mail) => mail,
                    None => break,
                },
            };

            match mail {
                Mail::Wire { table, ack } => {
                    trace!(actor = ctx.name(), peers = table.len(), "_wire");
                    if let Err(e) = ctx.install(table) {
                        error!(actor = ctx.name(), error = %e, "Wiring rejected");
                        return Err(e);
                    }
                    // The barrier may already be gone if the system is shutting down.
                    let _ = ack.send(());
                }
                Mail::Event(event) => {
                    trace!(
                        from = ctx.postbox().name_of(event.sender),
                        event = event.name(),
                        to = ctx.name(),
                        arg = ?event.body,
                        "Deliver"
                    );
                    if let Some(journal) = &journal {
                        let postbox = ctx.postbox();
                        journal::record(
                            journal,
                            postbox.name_of(event.sender),
                            ctx.name(),
                            event.name(),
                            || event.body.arg(&|id| postbox.name_of(id).to_string()),
                        );
                    }
                    if let Err(e) = self.behavior.handle(event, &ctx).await {
                        if cancel.is_cancelled() {
                            debug!(actor = ctx.name(), error = %e, "Handler aborted by shutdown");
                            break;
                        }
                        error!(actor = ctx.name(), error = %e, "Handler failed");
                        return Err(e);
                    }
                    handled += 1;
                }
            }
        }

        debug!(actor = ctx.name(), handled, "Shutdown");
        Ok(handled)
    }
}
