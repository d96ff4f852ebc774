//! # Test Harness
//!
//! Utilities for testing a single [`Behavior`] without spawning any tasks.
//!
//! A [`Harness`] owns a set of captured mailboxes. Register the actors your
//! behavior talks to with [`add`](Harness::add), build a [`Context`] for the
//! actor under test with [`context`](Harness::context), call
//! [`Behavior::handle`] directly and then assert on what landed in each
//! mailbox.
//!
//! # Example
//! ```ignore
//! let mut harness = Harness::<Signal>::new();
//! let probe = harness.add("probe");
//! let asker = harness.add("asker");
//! let ctx = harness.context(probe, Wiring::new().with("cell", cell));
//!
//! behavior.handle(Event::new(asker, Signal::Check { asker }), &ctx).await?;
//! assert_eq!(harness.drain(cell).len(), 1);
//! ```

use crate::behavior::Behavior;
use crate::message::{ActorId, Event, Mail, Message};
use crate::postbox::{Context, Postbox};
use crate::wiring::Wiring;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Capacity of every captured mailbox. Large enough that a handler under test
/// never blocks.
const CAPTURE_CAPACITY: usize = 64;

/// Captured mailboxes for driving behaviors by hand.
pub struct Harness<M: Message> {
    slots: Vec<(Arc<str>, mpsc::Sender<Mail<M>>)>,
    inboxes: Vec<mpsc::Receiver<Mail<M>>>,
    cancel: CancellationToken,
}

impl<M: Message> Default for Harness<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Message> Harness<M> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            inboxes: Vec::new(),
            cancel: CancellationToken::new(),
        }
    }

    /// Registers a captured mailbox and returns its handle.
    pub fn add(&mut self, name: impl Into<String>) -> ActorId {
        let id = ActorId::new(self.slots.len());
        let (sender, receiver) = mpsc::channel(CAPTURE_CAPACITY);
        self.slots.push((Arc::from(name.into()), sender));
        self.inboxes.push(receiver);
        id
    }

    fn postbox(&self) -> Postbox<M> {
        Postbox::new(self.slots.clone(), self.cancel.clone())
    }

    /// Context for `id`, already wired with `table`.
    pub fn context(&self, id: ActorId, table: Wiring) -> Context<M> {
        let mut ctx = self.unwired_context(id);
        // A fresh context has no table yet, so installing cannot fail.
        let _ = ctx.install(table);
        ctx
    }

    /// Context for `id` that never received its `_wire`.
    pub fn unwired_context(&self, id: ActorId) -> Context<M> {
        Context::new(id, self.postbox())
    }

    /// Delivers one event straight into `behavior`.
    pub async fn deliver<B: Behavior<M>>(
        &self,
        behavior: &mut B,
        ctx: &Context<M>,
        sender: ActorId,
        body: M,
    ) -> Result<(), crate::RuntimeError> {
        behavior.handle(Event::new(sender, body), ctx).await
    }

    /// Takes every event currently queued for `id`, oldest first.
    pub fn drain(&mut self, id: ActorId) -> Vec<Event<M>> {
        let mut events = Vec::new();
        if let Some(inbox) = self.inboxes.get_mut(id.index()) {
            while let Ok(mail) = inbox.try_recv() {
                if let Mail::Event(event) = mail {
                    events.push(event);
                }
            }
        }
        events
    }

    /// Asserts that `id` received exactly one event and returns it.
    pub fn expect_one(&mut self, id: ActorId) -> Event<M> {
        let mut events = self.drain(id);
        if events.len() != 1 {
            panic!(
                "Expected exactly one event for {}, got {}: {:?}",
                id,
                events.len(),
                events
            );
        }
        events.remove(0)
    }

    /// Asserts that nothing is queued for any captured mailbox.
    pub fn verify_quiet(&mut self) {
        for index in 0..self.inboxes.len() {
            let id = ActorId::new(index);
            let events = self.drain(id);
            if !events.is_empty() {
                panic!("Unexpected events for {}: {:?}", id, events);
            }
        }
    }
}
