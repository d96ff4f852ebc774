//! # Events & Mail
//!
//! This module defines what travels through a mailbox: protocol [`Event`]s
//! carrying a typed payload, and the distinguished wiring delivery that installs
//! an actor's peer table.

use crate::wiring::Wiring;
use std::fmt::{self, Debug, Display};
use tokio::sync::oneshot;

/// Stable handle of an actor inside one [`ActorSystem`](crate::ActorSystem).
///
/// Handles are plain indexes into the system's arena, so wiring tables can
/// reference peers in any shape (rings, back-references) without owning them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(usize);

impl ActorId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of this actor in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Payload type carried by events.
///
/// Implementors are usually a closed enum with one variant per event name and a
/// fixed argument shape, so a mismatched argument is a compile error rather than
/// a failed cast at runtime.
pub trait Message: Debug + Send + 'static {
    /// Event name, used for diagnostics only.
    fn name(&self) -> &'static str;

    /// Argument as shown in the delivery journal. Actor handles inside the
    /// payload are resolved with `name_of`. Empty by default.
    fn arg(&self, _name_of: NameOf<'_>) -> String {
        String::new()
    }
}

/// Resolves an actor handle to its diagnostic name.
pub type NameOf<'a> = &'a dyn Fn(ActorId) -> String;

/// An immutable message delivered to exactly one actor.
#[derive(Debug)]
pub struct Event<M> {
    pub sender: ActorId,
    pub body: M,
}

impl<M: Message> Event<M> {
    pub fn new(sender: ActorId, body: M) -> Self {
        Self { sender, body }
    }

    pub fn name(&self) -> &'static str {
        self.body.name()
    }
}

/// Type alias for the acknowledgment sent back once a wiring table is installed.
pub type WireAck = oneshot::Sender<()>;

/// Item stored in an actor's mailbox.
///
/// `Wire` is the `_wire` event: the dispatch loop consumes it itself, stores the
/// table in the actor's context and acknowledges it. Behaviors only ever see
/// `Event`s.
#[derive(Debug)]
pub enum Mail<M> {
    Wire { table: Wiring, ack: WireAck },
    Event(Event<M>),
}

impl<M: Message> Mail<M> {
    pub fn name(&self) -> &'static str {
        match self {
            Mail::Wire { .. } => "_wire",
            Mail::Event(event) => event.name(),
        }
    }
}
