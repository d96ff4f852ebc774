//! # Actor Runtime
//!
//! This crate provides a minimal actor runtime: isolated, independently
//! scheduled actors that communicate only through asynchronous, named events.
//! No actor reads or writes another actor's memory.
//!
//! ## Architecture Overview
//!
//! 1. **Mailbox & Actor** ([`Actor`]) - a bounded FIFO mailbox plus a [`Behavior`],
//!    driven by a dispatch loop in its own Tokio task
//! 2. **Wiring** ([`Wiring`], [`WiringBarrier`]) - named peer tables delivered
//!    as a `_wire` event, and the join that guarantees they are in place
//! 3. **Arena** ([`ActorSystem`], [`RunningSystem`]) - handle allocation,
//!    startup, fault monitoring and shutdown
//! 4. **Addressing** ([`Postbox`], [`Context`]) - how handlers send events
//! 5. **Journal** ([`Journal`]) - optional ordered record of every delivery
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task
//! - Events are processed **sequentially** within an actor (no locks needed)
//! - Ordering is FIFO per mailbox only; there is no global order
//! - Sending waits when the target mailbox is full (backpressure)
//! - Cancellation is cooperative and observed between events
//!
//! ## Testing
//!
//! The [`mock`] module drives a single behavior against captured mailboxes,
//! without spawning tasks.

pub mod actor;
pub mod behavior;
pub mod error;
pub mod journal;
pub mod message;
pub mod mock;
pub mod postbox;
pub mod system;
pub mod telemetry;
pub mod wiring;

pub use actor::Actor;
pub use behavior::Behavior;
pub use error::RuntimeError;
pub use journal::{Delivery, Journal};
pub use message::{ActorId, Event, Mail, Message, NameOf};
pub use postbox::{Context, Postbox};
pub use system::{ActorSystem, RunningSystem, DEFAULT_MAILBOX_CAPACITY};
pub use wiring::{Wiring, WiringBarrier};
