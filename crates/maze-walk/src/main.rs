//! Maze generator CLI.
//!
//! Builds one maze with the actor walk and prints it as box drawing, or as
//! JSON wall flags with `--json`.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use actor_runtime::telemetry::setup_tracing;
use anyhow::{bail, Context, Result};
use clap::Parser;
use maze_walk::{cancel_after, DrawPlan, MazeConfig, MazeSystem};
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Parser)]
#[command(name = "maze-walk")]
#[command(version)]
#[command(about = "Generate a perfect maze with a network of message-passing actors")]
struct Cli {
    /// Number of rows
    #[arg(short, long, default_value = "5")]
    rows: usize,

    /// Number of columns
    #[arg(short, long, default_value = "5")]
    cols: usize,

    /// Seed for reproducible mazes (fresh entropy when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Give up after this many milliseconds
    #[arg(long = "timeout-ms")]
    timeout_ms: Option<u64>,

    /// Mailbox capacity per actor
    #[arg(long, default_value = "10")]
    mailbox: usize,

    /// Print the wall flags as JSON instead of drawing the maze
    #[arg(long)]
    json: bool,

    /// Write the event sequence diagram to this file
    #[arg(long)]
    diagram: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    let draws = cli.seed.map_or(DrawPlan::Entropy, DrawPlan::Seeded);
    let config = MazeConfig::new(cli.rows, cli.cols)
        .with_mailbox_capacity(cli.mailbox)
        .with_draws(draws)
        .with_journal(cli.diagram.is_some());
    let system = MazeSystem::new(config)?;

    let cancel = CancellationToken::new();
    if let Some(ms) = cli.timeout_ms {
        cancel_after(cancel.clone(), Duration::from_millis(ms));
    }

    let started = Instant::now();
    let outcome = system.run(cancel).await?;
    let elapsed = started.elapsed();
    info!(events = outcome.events, ?elapsed, "Run finished");

    if !outcome.completed {
        bail!(
            "Generation of {}x{} maze did not complete after {:?} ({} events)",
            cli.rows,
            cli.cols,
            elapsed,
            outcome.events
        );
    }

    println!("Generated {}x{} maze in {:?}", cli.rows, cli.cols, elapsed);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome.maze)?);
    } else {
        print!("{}", outcome.maze);
    }
    if let Some(path) = &cli.diagram {
        std::fs::write(path, outcome.diagram())
            .with_context(|| format!("Failed to write diagram to {}", path.display()))?;
        info!(path = %path.display(), lines = outcome.journal.len(), "Diagram written");
    }
    Ok(())
}
