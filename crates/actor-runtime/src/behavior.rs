//! # Behavior Trait
//!
//! The `Behavior` trait is the contract every actor implements: a single
//! handler invoked once per delivered [`Event`]. The implementing struct *is*
//! the actor's private state. The dispatch loop hands it over by `&mut` borrow
//! for exactly one invocation at a time, so handler code never needs a lock.
//!
//! # Why a trait object?
//! Every actor of a system shares one payload type `M` but may have a completely
//! different behavior (a maze has cells, probes, walls, ...). Storing them as
//! `Box<dyn Behavior<M>>` lets the system keep a single homogeneous arena
//! addressed by [`ActorId`](crate::ActorId).

use crate::error::RuntimeError;
use crate::message::{Event, Message};
use crate::postbox::Context;
use async_trait::async_trait;

/// Event handler attached to an actor.
///
/// # Async & Context
/// The handler is `async` only so that it can await mailbox backpressure while
/// sending. It must not block on anything else: once started it is expected
/// to run to completion.
///
/// The [`Context`] gives access to the wiring table installed by the `_wire`
/// event. Looking up a peer before wiring fails with
/// [`RuntimeError::NotWired`], which stops the actor.
#[async_trait]
pub trait Behavior<M: Message>: Send + 'static {
    /// Handle one event. Returning an error stops this actor's dispatch loop.
    async fn handle(&mut self, event: Event<M>, ctx: &Context<M>) -> Result<(), RuntimeError>;
}
