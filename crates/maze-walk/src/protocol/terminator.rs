use super::signal::Signal;
use actor_runtime::{Behavior, Context, Event, RuntimeError};
use async_trait::async_trait;
use tracing::trace;

/// Stands in for every wall on the outer border.
///
/// It answers `check` as if the far side were already visited, so no probe
/// ever tries to leave the grid. One instance is shared by the whole border.
#[derive(Debug, Default)]
pub struct Terminator;

#[async_trait]
impl Behavior<Signal> for Terminator {
    async fn handle(&mut self, event: Event<Signal>, ctx: &Context<Signal>) -> Result<(), RuntimeError> {
        match event.body {
            Signal::Check { asker } => ctx.send(asker, Signal::CheckResult { visited: true }).await,
            _ => {
                trace!(event = event.name(), "Border ignores event");
                Ok(())
            }
        }
    }
}
