//! # Wiring Registry
//!
//! An actor addresses its peers through a [`Wiring`] table: role name to
//! [`ActorId`]. The table is delivered as a `_wire` mailbox item rather than set
//! directly, so every mutation of actor state still happens inside that actor's
//! own task.
//!
//! The price is an ordering hazard: a protocol event could overtake the wiring of
//! a peer it is forwarded to. [`WiringBarrier`] closes that gap. Every `_wire`
//! send registers an acknowledgment, and callers must await the barrier before
//! injecting the first protocol event.

use crate::error::RuntimeError;
use crate::message::ActorId;
use std::collections::HashMap;
use tokio::sync::oneshot;
use tracing::debug;

/// Named references from one actor to its peers. Keys are unique; order is
/// irrelevant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wiring {
    peers: HashMap<String, ActorId>,
}

impl Wiring {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the peer for `role`.
    pub fn with(mut self, role: impl Into<String>, peer: ActorId) -> Self {
        self.peers.insert(role.into(), peer);
        self
    }

    pub fn get(&self, role: &str) -> Option<ActorId> {
        self.peers.get(role).copied()
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}

impl<R: Into<String>> FromIterator<(R, ActorId)> for Wiring {
    fn from_iter<I: IntoIterator<Item = (R, ActorId)>>(iter: I) -> Self {
        Self {
            peers: iter
                .into_iter()
                .map(|(role, peer)| (role.into(), peer))
                .collect(),
        }
    }
}

/// Join over all pending `_wire` deliveries.
#[derive(Debug, Default)]
pub struct WiringBarrier {
    pending: Vec<(String, oneshot::Receiver<()>)>,
}

impl WiringBarrier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one outstanding wiring and returns the sender its actor must
    /// fire after installing the table.
    pub fn register(&mut self, actor: impl Into<String>) -> oneshot::Sender<()> {
        let (ack, done) = oneshot::channel();
        self.pending.push((actor.into(), done));
        ack
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Resolves once every registered actor has processed its `_wire`.
    ///
    /// Fails with [`RuntimeError::WiringAborted`] if an actor dropped its mailbox
    /// (stopped or was cancelled) before acknowledging.
    pub async fn wait(self) -> Result<(), RuntimeError> {
        let total = self.pending.len();
        for (actor, done) in self.pending {
            done.await
                .map_err(|_| RuntimeError::WiringAborted { actor })?;
        }
        debug!(total, "Wiring complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wiring_lookup() {
        let wiring = Wiring::new()
            .with("next", ActorId::new(3))
            .with("cell", ActorId::new(1));
        assert_eq!(wiring.get("next"), Some(ActorId::new(3)));
        assert_eq!(wiring.get("cell"), Some(ActorId::new(1)));
        assert_eq!(wiring.get("wall"), None);
        assert_eq!(wiring.len(), 2);
    }

    #[test]
    fn test_wiring_keys_are_unique() {
        let wiring: Wiring = [("probe", ActorId::new(1)), ("probe", ActorId::new(2))]
            .into_iter()
            .collect();
        assert_eq!(wiring.len(), 1);
        assert_eq!(wiring.get("probe"), Some(ActorId::new(2)));
    }

    #[tokio::test]
    async fn test_barrier_waits_for_every_ack() {
        let mut barrier = WiringBarrier::new();
        let first = barrier.register("a");
        let second = barrier.register("b");
        assert_eq!(barrier.pending(), 2);

        let waiter = tokio::spawn(barrier.wait());
        first.send(()).unwrap();
        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());

        second.send(()).unwrap();
        assert_eq!(waiter.await.unwrap(), Ok(()));
    }

    #[tokio::test]
    async fn test_barrier_reports_dropped_ack() {
        let mut barrier = WiringBarrier::new();
        drop(barrier.register("lost"));
        assert_eq!(
            barrier.wait().await,
            Err(RuntimeError::WiringAborted {
                actor: "lost".into()
            })
        );
    }

    #[tokio::test]
    async fn test_empty_barrier_is_ready() {
        assert_eq!(WiringBarrier::new().wait().await, Ok(()));
    }
}
