//! # Delivery Journal
//!
//! An optional, in-order record of every event an actor system delivers. Each
//! dispatch loop appends one [`Delivery`] right before its handler runs, so a
//! system with a single event in flight produces a totally ordered log.
//!
//! The journal renders as a sequence diagram, one `src -> dst: event(arg)`
//! line per delivery.

use std::fmt;
use tokio::sync::mpsc;

/// One delivered event, with actor handles already resolved to names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub from: String,
    pub to: String,
    pub event: &'static str,
    pub arg: String,
}

impl fmt::Display for Delivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}: {}({})", self.from, self.to, self.event, self.arg)
    }
}

/// Writing half handed to every dispatch loop.
pub type JournalSender = mpsc::UnboundedSender<Delivery>;

/// Collects [`Delivery`] records from all actors of one system.
///
/// Attach it with [`ActorSystem::record`](crate::ActorSystem::record) before
/// starting, and [`collect`](Self::collect) after shutdown.
#[derive(Debug)]
pub struct Journal {
    sender: JournalSender,
    receiver: mpsc::UnboundedReceiver<Delivery>,
}

impl Default for Journal {
    fn default() -> Self {
        Self::new()
    }
}

impl Journal {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self { sender, receiver }
    }

    pub(crate) fn sender(&self) -> JournalSender {
        self.sender.clone()
    }

    /// Everything recorded so far, in delivery order.
    pub fn collect(mut self) -> Vec<Delivery> {
        let mut deliveries = Vec::new();
        while let Ok(delivery) = self.receiver.try_recv() {
            deliveries.push(delivery);
        }
        deliveries
    }
}

/// Renders deliveries as diagram lines joined by newlines.
pub fn diagram(deliveries: &[Delivery]) -> String {
    deliveries
        .iter()
        .map(Delivery::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn record<F>(journal: &JournalSender, from: &str, to: &str, event: &'static str, arg: F)
where
    F: FnOnce() -> String,
{
    // A closed journal only means nobody is collecting any more.
    let _ = journal.send(Delivery {
        from: from.to_string(),
        to: to.to_string(),
        event,
        arg: arg(),
    });
}
