use actor_runtime::{ActorId, Message, NameOf};

/// Events exchanged by the random-walk actors.
///
/// Each variant has one fixed argument shape. Actor references are
/// [`ActorId`] handles, never owned actors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Enter a cell. `from` is where a later backtrack must go.
    Visit { from: ActorId },
    /// Rotate the scan start this many more positions along the probe ring.
    VisitRand(u8),
    /// Try this probe's side; `terminator` is the probe where the scan began.
    TryVisit { terminator: ActorId },
    /// "Has your cell been visited?" Answered directly to `asker`.
    Check { asker: ActorId },
    CheckResult { visited: bool },
    /// The ring scan found no unvisited neighbor.
    DeadEnd,
    /// A child cell is exhausted; resume scanning from here.
    BackTrack,
}

impl Message for Signal {
    fn name(&self) -> &'static str {
        match self {
            Signal::Visit { .. } => "visit",
            Signal::VisitRand(_) => "visitRand",
            Signal::TryVisit { .. } => "tryVisit",
            Signal::Check { .. } => "check",
            Signal::CheckResult { .. } => "checkResult",
            Signal::DeadEnd => "deadEnd",
            Signal::BackTrack => "backTrack",
        }
    }

    fn arg(&self, name_of: NameOf<'_>) -> String {
        match *self {
            Signal::Visit { from: actor }
            | Signal::TryVisit { terminator: actor }
            | Signal::Check { asker: actor } => name_of(actor),
            Signal::VisitRand(steps) => steps.to_string(),
            Signal::CheckResult { visited } => visited.to_string(),
            Signal::DeadEnd | Signal::BackTrack => String::new(),
        }
    }
}

/// Wiring role names.
pub mod role {
    /// Cell -> its north probe, the entry into its ring.
    pub const PROBE: &str = "probe";
    /// Probe -> owning cell.
    pub const CELL: &str = "cell";
    /// Probe -> next probe in the ring.
    pub const NEXT: &str = "next";
    /// Probe -> wall (or border) on its side.
    pub const WALL: &str = "wall";
    /// Wall -> probe on either side.
    pub const PROBE1: &str = "probe1";
    pub const PROBE2: &str = "probe2";
}
