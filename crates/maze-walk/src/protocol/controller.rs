use super::signal::Signal;
use actor_runtime::{Behavior, Context, Event, RuntimeError};
use async_trait::async_trait;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// The walk's origin. It seeds the first visit's `back` reference, so the
/// root cell's final backtrack lands here and marks the walk complete.
pub struct Controller {
    done: Option<oneshot::Sender<()>>,
    cancel: CancellationToken,
}

impl Controller {
    pub fn new(done: oneshot::Sender<()>, cancel: CancellationToken) -> Self {
        Self {
            done: Some(done),
            cancel,
        }
    }
}

#[async_trait]
impl Behavior<Signal> for Controller {
    async fn handle(&mut self, event: Event<Signal>, ctx: &Context<Signal>) -> Result<(), RuntimeError> {
        match event.body {
            Signal::BackTrack => {
                if let Some(done) = self.done.take() {
                    info!(from = ctx.postbox().name_of(event.sender), "Walk complete");
                    let _ = done.send(());
                    self.cancel.cancel();
                }
                Ok(())
            }
            _ => Err(ctx.unexpected(&event)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_runtime::mock::Harness;

    #[tokio::test]
    async fn test_backtrack_completes_once() {
        let mut harness = Harness::new();
        let init = harness.add("init");
        let root = harness.add("cell[0,0]");
        let ctx = harness.unwired_context(init);
        let cancel = CancellationToken::new();
        let (done_tx, mut done_rx) = oneshot::channel();
        let mut controller = Controller::new(done_tx, cancel.clone());

        harness
            .deliver(&mut controller, &ctx, root, Signal::BackTrack)
            .await
            .unwrap();
        assert!(done_rx.try_recv().is_ok());
        assert!(cancel.is_cancelled());

        harness
            .deliver(&mut controller, &ctx, root, Signal::BackTrack)
            .await
            .unwrap();
        harness.verify_quiet();
    }

    #[tokio::test]
    async fn test_other_events_are_faults() {
        let mut harness = Harness::new();
        let init = harness.add("init");
        let root = harness.add("cell[0,0]");
        let ctx = harness.unwired_context(init);
        let (done_tx, _done_rx) = oneshot::channel();
        let mut controller = Controller::new(done_tx, CancellationToken::new());

        let result = harness
            .deliver(&mut controller, &ctx, root, Signal::DeadEnd)
            .await;
        assert_eq!(
            result,
            Err(RuntimeError::UnexpectedEvent {
                actor: "init".into(),
                event: "deadEnd",
                sender: "cell[0,0]".into(),
            })
        );
    }
}
