//! # Observability
//!
//! Structured logging for actor systems, built on `tracing`.
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle** (`debug`): start, shutdown and the number of events handled
//! - **Every delivery** (`trace`): `from`, `event`, `to` and the payload as `arg`
//! - **System milestones** (`info`): started, wired
//! - **Faults** (`error`/`warn`): rejected wiring, failed handlers
//!
//! ## Usage Examples
//!
//! ```bash
//! # Milestones only
//! RUST_LOG=info cargo run
//!
//! # Full event log, one line per delivery
//! RUST_LOG=actor_runtime=trace cargo run
//! ```

use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` wins when set. Otherwise the filter is `debug` when `verbose`
/// and `warn` when not, so a plain run prints nothing but its own output.
pub fn setup_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    // Tests and embedders may have installed a subscriber already.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
