//! # Runtime Errors
//!
//! This module defines the error type shared by the dispatch loop, the handler
//! context and the system lifecycle. Nearly every variant describes a wiring or
//! protocol bug: the runtime fails fast on these instead of recovering.

use crate::message::ActorId;

/// Errors that can occur within the actor runtime itself.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RuntimeError {
    #[error("Mailbox capacity must be at least 1")]
    ZeroCapacity,
    #[error("Unknown actor {0}")]
    UnknownActor(ActorId),
    #[error("Mailbox of {actor} is closed")]
    MailboxClosed { actor: String },
    #[error("Mailbox of {actor} is full")]
    MailboxFull { actor: String },
    #[error("{actor} was wired twice")]
    AlreadyWired { actor: String },
    #[error("{actor} needs its wiring before handling events")]
    NotWired { actor: String },
    #[error("{actor} has no peer wired as `{role}`")]
    MissingPeer { actor: String, role: String },
    #[error("{actor} cannot handle `{event}` from {sender}")]
    UnexpectedEvent {
        actor: String,
        event: &'static str,
        sender: String,
    },
    #[error("{actor} stopped before acknowledging its wiring")]
    WiringAborted { actor: String },
    #[error("Cancelled")]
    Cancelled,
    #[error("Actor task panicked: {0}")]
    ActorPanicked(String),
}
