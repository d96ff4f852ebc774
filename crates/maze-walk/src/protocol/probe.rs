use super::signal::{role, Signal};
use actor_runtime::{ActorId, Behavior, Context, Event, RuntimeError};
use async_trait::async_trait;

/// One side of a cell. The four probes of a cell form a ring N -> E -> S -> W.
///
/// A scan token enters the ring at the north probe, rotates `k` steps and then
/// asks each side in turn whether the neighbor is free. The probe where asking
/// started is the scan's terminator: when the token comes back to it, every
/// side has been tried.
#[derive(Debug, Default)]
pub struct Probe {
    terminator: Option<ActorId>,
}

impl Probe {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Behavior<Signal> for Probe {
    async fn handle(&mut self, event: Event<Signal>, ctx: &Context<Signal>) -> Result<(), RuntimeError> {
        match event.body {
            Signal::VisitRand(0) => {
                let next = ctx.peer(role::NEXT)?;
                ctx.send(next, Signal::TryVisit { terminator: ctx.id() }).await
            }
            Signal::VisitRand(steps) => {
                let next = ctx.peer(role::NEXT)?;
                ctx.send(next, Signal::VisitRand(steps - 1)).await
            }
            Signal::TryVisit { terminator } => {
                self.terminator = Some(terminator);
                let wall = ctx.peer(role::WALL)?;
                ctx.send(wall, Signal::Check { asker: ctx.id() }).await
            }
            Signal::CheckResult { visited: false } => {
                let wall = ctx.peer(role::WALL)?;
                ctx.send(wall, Signal::Visit { from: ctx.id() }).await
            }
            Signal::CheckResult { visited: true } => match self.terminator {
                Some(terminator) if terminator == ctx.id() => {
                    ctx.send(ctx.peer(role::CELL)?, Signal::DeadEnd).await
                }
                Some(terminator) => {
                    let next = ctx.peer(role::NEXT)?;
                    ctx.send(next, Signal::TryVisit { terminator }).await
                }
                None => Err(ctx.unexpected(&event)),
            },
            // Relayed from the neighbor's side: hand it to the owning cell.
            body @ (Signal::Check { .. } | Signal::Visit { .. } | Signal::BackTrack) => {
                ctx.send(ctx.peer(role::CELL)?, body).await
            }
            Signal::DeadEnd => Err(ctx.unexpected(&event)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_runtime::mock::Harness;
    use actor_runtime::Wiring;

    struct Ring {
        harness: Harness<Signal>,
        me: ActorId,
        cell: ActorId,
        next: ActorId,
        wall: ActorId,
        ctx: Context<Signal>,
    }

    fn ring() -> Ring {
        let mut harness = Harness::new();
        let me = harness.add("probe");
        let cell = harness.add("cell");
        let next = harness.add("next");
        let wall = harness.add("wall");
        let ctx = harness.context(
            me,
            Wiring::new()
                .with(role::CELL, cell)
                .with(role::NEXT, next)
                .with(role::WALL, wall),
        );
        Ring {
            harness,
            me,
            cell,
            next,
            wall,
            ctx,
        }
    }

    #[tokio::test]
    async fn test_visit_rand_counts_down() {
        let mut r = ring();
        let mut probe = Probe::new();
        r.harness
            .deliver(&mut probe, &r.ctx, r.cell, Signal::VisitRand(3))
            .await
            .unwrap();
        assert_eq!(r.harness.expect_one(r.next).body, Signal::VisitRand(2));
    }

    #[tokio::test]
    async fn test_visit_rand_zero_starts_trying_here() {
        let mut r = ring();
        let mut probe = Probe::new();
        r.harness
            .deliver(&mut probe, &r.ctx, r.cell, Signal::VisitRand(0))
            .await
            .unwrap();
        assert_eq!(
            r.harness.expect_one(r.next).body,
            Signal::TryVisit { terminator: r.me }
        );
    }

    #[tokio::test]
    async fn test_try_visit_asks_the_wall() {
        let mut r = ring();
        let mut probe = Probe::new();
        r.harness
            .deliver(&mut probe, &r.ctx, r.next, Signal::TryVisit { terminator: r.next })
            .await
            .unwrap();
        let event = r.harness.expect_one(r.wall);
        assert_eq!(event.sender, r.me);
        assert_eq!(event.body, Signal::Check { asker: r.me });
    }

    #[tokio::test]
    async fn test_free_neighbor_is_visited_through_the_wall() {
        let mut r = ring();
        let mut probe = Probe::new();
        r.harness
            .deliver(&mut probe, &r.ctx, r.next, Signal::TryVisit { terminator: r.next })
            .await
            .unwrap();
        r.harness.drain(r.wall);
        r.harness
            .deliver(&mut probe, &r.ctx, r.wall, Signal::CheckResult { visited: false })
            .await
            .unwrap();
        assert_eq!(
            r.harness.expect_one(r.wall).body,
            Signal::Visit { from: r.me }
        );
        r.harness.verify_quiet();
    }

    #[tokio::test]
    async fn test_taken_neighbor_moves_on_with_same_terminator() {
        let mut r = ring();
        let mut probe = Probe::new();
        r.harness
            .deliver(&mut probe, &r.ctx, r.next, Signal::TryVisit { terminator: r.next })
            .await
            .unwrap();
        r.harness.drain(r.wall);
        r.harness
            .deliver(&mut probe, &r.ctx, r.wall, Signal::CheckResult { visited: true })
            .await
            .unwrap();
        assert_eq!(
            r.harness.expect_one(r.next).body,
            Signal::TryVisit { terminator: r.next }
        );
    }

    #[tokio::test]
    async fn test_full_circle_reports_dead_end() {
        let mut r = ring();
        let mut probe = Probe::new();
        r.harness
            .deliver(&mut probe, &r.ctx, r.next, Signal::TryVisit { terminator: r.me })
            .await
            .unwrap();
        r.harness.drain(r.wall);
        r.harness
            .deliver(&mut probe, &r.ctx, r.wall, Signal::CheckResult { visited: true })
            .await
            .unwrap();
        assert_eq!(r.harness.expect_one(r.cell).body, Signal::DeadEnd);
        r.harness.verify_quiet();
    }

    #[tokio::test]
    async fn test_relayed_events_reach_the_cell() {
        let mut r = ring();
        let mut probe = Probe::new();
        let remote = r.harness.add("remote");
        for body in [
            Signal::Check { asker: remote },
            Signal::Visit { from: remote },
            Signal::BackTrack,
        ] {
            r.harness
                .deliver(&mut probe, &r.ctx, r.wall, body)
                .await
                .unwrap();
            let event = r.harness.expect_one(r.cell);
            assert_eq!(event.sender, r.me);
            assert_eq!(event.body, body);
        }
    }

    #[tokio::test]
    async fn test_check_result_without_scan_is_rejected() {
        let r = ring();
        let mut probe = Probe::new();
        let result = r
            .harness
            .deliver(&mut probe, &r.ctx, r.wall, Signal::CheckResult { visited: true })
            .await;
        assert_eq!(
            result,
            Err(RuntimeError::UnexpectedEvent {
                actor: "probe".into(),
                event: "checkResult",
                sender: "wall".into(),
            })
        );
    }
}
