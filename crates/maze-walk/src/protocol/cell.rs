use super::signal::{role, Signal};
use crate::draw::OffsetSource;
use actor_runtime::{ActorId, Behavior, Context, Event, RuntimeError};
use async_trait::async_trait;
use tracing::debug;

/// One position of the maze.
///
/// The walk's call stack lives in the `back` references: each Cell remembers
/// who entered it, and a dead end is reported back along that chain.
pub struct Cell {
    draws: Box<dyn OffsetSource>,
    visited: bool,
    back: Option<ActorId>,
}

impl Cell {
    pub fn new(draws: Box<dyn OffsetSource>) -> Self {
        Self {
            draws,
            visited: false,
            back: None,
        }
    }

    /// Starts a ring scan at a random offset.
    async fn scan(&mut self, ctx: &Context<Signal>) -> Result<(), RuntimeError> {
        let offset = self.draws.next_offset();
        ctx.send(ctx.peer(role::PROBE)?, Signal::VisitRand(offset)).await
    }
}

#[async_trait]
impl Behavior<Signal> for Cell {
    async fn handle(&mut self, event: Event<Signal>, ctx: &Context<Signal>) -> Result<(), RuntimeError> {
        match event.body {
            Signal::Visit { from } => {
                if self.visited {
                    debug!(cell = ctx.name(), "Already visited, ignoring visit");
                    return Ok(());
                }
                self.visited = true;
                self.back = Some(from);
                self.scan(ctx).await
            }
            Signal::Check { asker } => {
                ctx.send(asker, Signal::CheckResult { visited: self.visited }).await
            }
            Signal::DeadEnd => match self.back {
                Some(back) => ctx.send(back, Signal::BackTrack).await,
                None => Err(ctx.unexpected(&event)),
            },
            // Same as re-entering with the first `back`: scan again, this
            // time the exhausted child reports visited.
            Signal::BackTrack if self.visited => self.scan(ctx).await,
            _ => Err(ctx.unexpected(&event)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::FixedOffsets;
    use actor_runtime::mock::Harness;
    use actor_runtime::Wiring;

    struct Setup {
        harness: Harness<Signal>,
        cell: ActorId,
        probe: ActorId,
        parent: ActorId,
        ctx: Context<Signal>,
    }

    fn setup(offsets: Vec<u8>) -> (Cell, Setup) {
        let mut harness = Harness::new();
        let cell = harness.add("cell");
        let probe = harness.add("probe");
        let parent = harness.add("parent");
        let ctx = harness.context(cell, Wiring::new().with(role::PROBE, probe));
        (
            Cell::new(Box::new(FixedOffsets::new(offsets))),
            Setup {
                harness,
                cell,
                probe,
                parent,
                ctx,
            },
        )
    }

    #[tokio::test]
    async fn test_first_visit_starts_scan() {
        let (mut cell, mut s) = setup(vec![2]);
        s.harness
            .deliver(&mut cell, &s.ctx, s.probe, Signal::Visit { from: s.parent })
            .await
            .unwrap();

        let event = s.harness.expect_one(s.probe);
        assert_eq!(event.sender, s.cell);
        assert_eq!(event.body, Signal::VisitRand(2));
        assert!(cell.visited);
        assert_eq!(cell.back, Some(s.parent));
    }

    #[tokio::test]
    async fn test_second_visit_is_ignored() {
        let (mut cell, mut s) = setup(vec![0, 3]);
        let stranger = s.harness.add("stranger");
        s.harness
            .deliver(&mut cell, &s.ctx, s.probe, Signal::Visit { from: s.parent })
            .await
            .unwrap();
        s.harness
            .deliver(&mut cell, &s.ctx, s.probe, Signal::Visit { from: stranger })
            .await
            .unwrap();

        assert_eq!(s.harness.expect_one(s.probe).body, Signal::VisitRand(0));
        assert!(cell.visited);
        assert_eq!(cell.back, Some(s.parent));
        s.harness.verify_quiet();
    }

    #[tokio::test]
    async fn test_check_reports_visited_flag() {
        let (mut cell, mut s) = setup(vec![0]);
        let asker = s.harness.add("asker");

        s.harness
            .deliver(&mut cell, &s.ctx, s.probe, Signal::Check { asker })
            .await
            .unwrap();
        assert_eq!(
            s.harness.expect_one(asker).body,
            Signal::CheckResult { visited: false }
        );

        s.harness
            .deliver(&mut cell, &s.ctx, s.probe, Signal::Visit { from: s.parent })
            .await
            .unwrap();
        s.harness.drain(s.probe);
        s.harness
            .deliver(&mut cell, &s.ctx, s.probe, Signal::Check { asker })
            .await
            .unwrap();
        assert_eq!(
            s.harness.expect_one(asker).body,
            Signal::CheckResult { visited: true }
        );
    }

    #[tokio::test]
    async fn test_dead_end_backtracks_to_parent() {
        let (mut cell, mut s) = setup(vec![1]);
        s.harness
            .deliver(&mut cell, &s.ctx, s.probe, Signal::Visit { from: s.parent })
            .await
            .unwrap();
        s.harness.drain(s.probe);

        s.harness
            .deliver(&mut cell, &s.ctx, s.probe, Signal::DeadEnd)
            .await
            .unwrap();
        let event = s.harness.expect_one(s.parent);
        assert_eq!(event.sender, s.cell);
        assert_eq!(event.body, Signal::BackTrack);
    }

    #[tokio::test]
    async fn test_backtrack_rescans_with_fresh_offset() {
        let (mut cell, mut s) = setup(vec![1, 3]);
        s.harness
            .deliver(&mut cell, &s.ctx, s.probe, Signal::Visit { from: s.parent })
            .await
            .unwrap();
        assert_eq!(s.harness.expect_one(s.probe).body, Signal::VisitRand(1));

        s.harness
            .deliver(&mut cell, &s.ctx, s.probe, Signal::BackTrack)
            .await
            .unwrap();
        assert_eq!(s.harness.expect_one(s.probe).body, Signal::VisitRand(3));
        assert_eq!(cell.back, Some(s.parent));
    }

    #[tokio::test]
    async fn test_dead_end_before_visit_is_a_protocol_error() {
        let (mut cell, s) = setup(vec![0]);
        let result = s
            .harness
            .deliver(&mut cell, &s.ctx, s.probe, Signal::DeadEnd)
            .await;
        assert!(matches!(
            result,
            Err(RuntimeError::UnexpectedEvent { event: "deadEnd", .. })
        ));
    }

    #[tokio::test]
    async fn test_unwired_cell_cannot_scan() {
        let (mut cell, s) = setup(vec![0]);
        let ctx = s.harness.unwired_context(s.cell);
        let result = s
            .harness
            .deliver(&mut cell, &ctx, s.parent, Signal::Visit { from: s.parent })
            .await;
        assert_eq!(
            result,
            Err(RuntimeError::NotWired {
                actor: "cell".into()
            })
        );
    }
}
