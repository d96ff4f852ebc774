//! # Postbox & Handler Context
//!
//! The [`Postbox`] is the shared address book of an actor system: one bounded
//! mailbox sender per [`ActorId`]. It is cheap to clone and is the only way
//! events move between actors.
//!
//! A [`Context`] is what a behavior sees while handling an event: its own
//! identity, its wiring table and a postbox to send through.

use crate::error::RuntimeError;
use crate::message::{ActorId, Event, Mail, Message};
use crate::wiring::Wiring;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

struct Slot<M> {
    name: Arc<str>,
    sender: mpsc::Sender<Mail<M>>,
}

/// Shared, immutable table of mailbox senders indexed by [`ActorId`].
pub struct Postbox<M> {
    slots: Arc<[Slot<M>]>,
    cancel: CancellationToken,
}

impl<M> Clone for Postbox<M> {
    fn clone(&self) -> Self {
        Self {
            slots: Arc::clone(&self.slots),
            cancel: self.cancel.clone(),
        }
    }
}

impl<M: Message> Postbox<M> {
    pub(crate) fn new(
        slots: Vec<(Arc<str>, mpsc::Sender<Mail<M>>)>,
        cancel: CancellationToken,
    ) -> Self {
        let slots = slots
            .into_iter()
            .map(|(name, sender)| Slot { name, sender })
            .collect();
        Self { slots, cancel }
    }

    /// Number of addressable actors.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Diagnostic name of an actor, or `"?"` for a handle from another system.
    pub fn name_of(&self, id: ActorId) -> &str {
        self.slots.get(id.index()).map_or("?", |slot| slot.name.as_ref())
    }

    fn slot(&self, id: ActorId) -> Result<&Slot<M>, RuntimeError> {
        self.slots
            .get(id.index())
            .ok_or(RuntimeError::UnknownActor(id))
    }

    /// Enqueues `body` on `to`'s mailbox on behalf of `from`.
    ///
    /// Waits while the mailbox is full. If the system is cancelled during that
    /// wait the send is abandoned with [`RuntimeError::Cancelled`].
    pub async fn send(&self, from: ActorId, to: ActorId, body: M) -> Result<(), RuntimeError> {
        let slot = self.slot(to)?;
        let mail = Mail::Event(Event::new(from, body));
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(RuntimeError::Cancelled),
            sent = slot.sender.send(mail) => sent.map_err(|_| RuntimeError::MailboxClosed {
                actor: slot.name.to_string(),
            }),
        }
    }

    /// Non-blocking variant of [`send`](Self::send).
    pub fn try_send(&self, from: ActorId, to: ActorId, body: M) -> Result<(), RuntimeError> {
        let slot = self.slot(to)?;
        slot.sender
            .try_send(Mail::Event(Event::new(from, body)))
            .map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => RuntimeError::MailboxFull {
                    actor: slot.name.to_string(),
                },
                mpsc::error::TrySendError::Closed(_) => RuntimeError::MailboxClosed {
                    actor: slot.name.to_string(),
                },
            })
    }
}

/// Per-actor view handed to [`Behavior::handle`](crate::Behavior::handle).
pub struct Context<M> {
    id: ActorId,
    peers: Option<Wiring>,
    postbox: Postbox<M>,
}

impl<M: Message> Context<M> {
    pub(crate) fn new(id: ActorId, postbox: Postbox<M>) -> Self {
        Self {
            id,
            peers: None,
            postbox,
        }
    }

    /// Stores the wiring table. Only the dispatch loop (and the test harness)
    /// calls this; a second call is an invariant violation.
    pub(crate) fn install(&mut self, table: Wiring) -> Result<(), RuntimeError> {
        if self.peers.is_some() {
            return Err(RuntimeError::AlreadyWired {
                actor: self.name().to_string(),
            });
        }
        self.peers = Some(table);
        Ok(())
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.postbox.name_of(self.id)
    }

    pub fn postbox(&self) -> &Postbox<M> {
        &self.postbox
    }

    /// Looks up the peer wired under `role`.
    pub fn peer(&self, role: &str) -> Result<ActorId, RuntimeError> {
        let peers = self.peers.as_ref().ok_or_else(|| RuntimeError::NotWired {
            actor: self.name().to_string(),
        })?;
        peers.get(role).ok_or_else(|| RuntimeError::MissingPeer {
            actor: self.name().to_string(),
            role: role.to_string(),
        })
    }

    /// Sends `body` to `to` with this actor as the sender.
    pub async fn send(&self, to: ActorId, body: M) -> Result<(), RuntimeError> {
        self.postbox.send(self.id, to, body).await
    }

    /// Builds the error for an event this actor has no handler for.
    pub fn unexpected(&self, event: &Event<M>) -> RuntimeError {
        RuntimeError::UnexpectedEvent {
            actor: self.name().to_string(),
            event: event.name(),
            sender: self.postbox.name_of(event.sender).to_string(),
        }
    }
}
