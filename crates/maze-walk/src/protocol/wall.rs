use super::signal::{role, Signal};
use actor_runtime::{ActorId, Behavior, Context, Event, RuntimeError};
use async_trait::async_trait;

/// Hook run when a visit passes through a wall. Must be idempotent.
pub type OnOpen = Box<dyn Fn() + Send>;

/// Internal wall between two adjacent cells.
///
/// A wall relays `check` and `visit` to the probe on the other side. Which side
/// is "other" follows from the event argument, not from the transport sender.
pub struct Wall {
    on_open: OnOpen,
}

impl Wall {
    pub fn new(on_open: impl Fn() + Send + 'static) -> Self {
        Self {
            on_open: Box::new(on_open),
        }
    }

    fn opposite(
        ctx: &Context<Signal>,
        event: &Event<Signal>,
        origin: ActorId,
    ) -> Result<ActorId, RuntimeError> {
        let probe1 = ctx.peer(role::PROBE1)?;
        let probe2 = ctx.peer(role::PROBE2)?;
        if origin == probe1 {
            Ok(probe2)
        } else if origin == probe2 {
            Ok(probe1)
        } else {
            Err(ctx.unexpected(event))
        }
    }
}

#[async_trait]
impl Behavior<Signal> for Wall {
    async fn handle(&mut self, event: Event<Signal>, ctx: &Context<Signal>) -> Result<(), RuntimeError> {
        match event.body {
            Signal::Check { asker } => {
                let to = Self::opposite(ctx, &event, asker)?;
                ctx.send(to, event.body).await
            }
            Signal::Visit { from } => {
                let to = Self::opposite(ctx, &event, from)?;
                (self.on_open)();
                ctx.send(to, event.body).await
            }
            _ => Err(ctx.unexpected(&event)),
        }
    }
}
