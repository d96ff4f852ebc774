use maze_walk::model::{Position, Side};
use maze_walk::{cancel_after, DrawPlan, MazeConfig, MazeError, MazeSystem, Outcome};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

// --- Helpers ---

async fn generate(config: MazeConfig) -> Outcome {
    let system = MazeSystem::new(config).unwrap();
    tokio::time::timeout(Duration::from_secs(30), system.run(CancellationToken::new()))
        .await
        .expect("generation timed out")
        .expect("generation failed")
}

fn seeded(rows: usize, cols: usize, seed: u64) -> MazeConfig {
    MazeConfig::new(rows, cols).with_draws(DrawPlan::Seeded(seed))
}

fn assert_perfect(outcome: &Outcome) {
    let maze = &outcome.maze;
    let total = maze.rows() * maze.cols();
    assert!(outcome.completed, "walk did not complete");
    assert!(maze.border_is_closed());
    assert_eq!(maze.open_wall_count(), total - 1);
    assert_eq!(maze.reachable_from(Position::new(0, 0)), total);
    assert!(maze.is_perfect(), "not a spanning tree:\n{}", maze);
}

// --- Tests ---

#[tokio::test]
async fn test_mazes_are_spanning_trees() {
    for (rows, cols, seed) in [(2, 2, 1), (3, 5, 2), (5, 5, 3), (8, 3, 4), (1, 7, 5), (6, 1, 6)] {
        let outcome = generate(seeded(rows, cols, seed)).await;
        assert_perfect(&outcome);
    }
}

#[tokio::test]
async fn test_entropy_draws_also_produce_perfect_mazes() {
    for _ in 0..5 {
        let outcome = generate(MazeConfig::new(4, 4)).await;
        assert_perfect(&outcome);
    }
}

#[tokio::test]
async fn test_single_cell_completes_with_no_walls() {
    let outcome = generate(seeded(1, 1, 0)).await;
    assert!(outcome.completed);
    assert_eq!(outcome.maze.open_wall_count(), 0);
    assert!(outcome.maze.is_perfect());
    assert_eq!(outcome.maze.to_string(), "┌─┐\n│ │\n└─┘\n");
}

#[tokio::test]
async fn test_pair_opens_its_only_wall() {
    let outcome = generate(seeded(1, 2, 9)).await;
    assert_perfect(&outcome);
    assert!(outcome.maze.is_open(Position::new(0, 0), Side::East));
    assert_eq!(outcome.maze.to_string(), "┌───┐\n│   │\n└───┘\n");
}

#[tokio::test]
async fn test_fixed_offsets_give_known_maze() {
    // Offset 0 always: every scan tries E, S, W and finally N.
    let outcome = generate(MazeConfig::new(2, 2).with_draws(DrawPlan::Fixed(vec![0]))).await;
    assert_perfect(&outcome);

    let maze = &outcome.maze;
    assert!(maze.is_open(Position::new(0, 1), Side::West));
    assert!(maze.is_open(Position::new(1, 1), Side::North));
    assert!(maze.is_open(Position::new(1, 1), Side::West));
    assert!(!maze.is_open(Position::new(1, 0), Side::North));
    assert_eq!(maze.to_string(), "┌───┐\n│   │\n├─╴ │\n│   │\n└───┘\n");
}

#[tokio::test]
async fn test_same_seed_same_maze() {
    let first = generate(seeded(6, 7, 1234)).await;
    let second = generate(seeded(6, 7, 1234)).await;
    assert_eq!(first.maze, second.maze);
    assert_eq!(first.events, second.events);
}

#[tokio::test]
async fn test_tiny_mailboxes_still_complete() {
    let outcome = generate(seeded(5, 5, 77).with_mailbox_capacity(1)).await;
    assert_perfect(&outcome);
}

#[tokio::test]
async fn test_event_count_is_bounded() {
    for (rows, cols, seed) in [(1, 1, 0), (3, 3, 11), (7, 4, 12)] {
        let outcome = generate(seeded(rows, cols, seed)).await;
        let bound = 100 * (rows * cols) as u64 + 10;
        assert!(outcome.events > 0);
        assert!(
            outcome.events <= bound,
            "{} events for {}x{}",
            outcome.events,
            rows,
            cols
        );
    }
}

#[tokio::test]
async fn test_cancelled_run_keeps_a_partial_tree() {
    let cancel = CancellationToken::new();
    cancel_after(cancel.clone(), Duration::from_millis(1));
    let system = MazeSystem::new(seeded(40, 40, 5)).unwrap();
    let outcome = system.run(cancel).await.unwrap();

    // Whatever was opened so far is a tree hanging off the origin.
    let maze = &outcome.maze;
    assert!(maze.border_is_closed());
    assert_eq!(
        maze.reachable_from(Position::new(0, 0)),
        maze.open_wall_count() + 1
    );
    if !outcome.completed {
        assert!(!maze.is_perfect());
    }
}

#[tokio::test]
async fn test_cancelled_before_start_is_incomplete() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let system = MazeSystem::new(seeded(4, 4, 1)).unwrap();
    let outcome = system.run(cancel).await.unwrap();
    assert!(!outcome.completed);
    assert_eq!(outcome.maze.open_wall_count(), 0);
}

#[tokio::test]
async fn test_invalid_configs_are_rejected() {
    assert!(matches!(
        MazeSystem::new(MazeConfig::new(3, 0)),
        Err(MazeError::InvalidDimensions { rows: 3, cols: 0 })
    ));
    assert!(matches!(
        MazeSystem::new(MazeConfig::new(3, 3).with_mailbox_capacity(0)),
        Err(MazeError::InvalidCapacity)
    ));
}

#[tokio::test]
async fn test_json_snapshot_roundtrips() {
    let outcome = generate(seeded(3, 3, 21)).await;
    let json = serde_json::to_string(&outcome.maze).unwrap();
    let parsed: maze_walk::Maze = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, outcome.maze);
}

#[tokio::test]
async fn test_diagram_traces_the_pair_walk() {
    let config = MazeConfig::new(1, 2)
        .with_draws(DrawPlan::Fixed(vec![0]))
        .with_journal(true);
    let outcome = generate(config).await;
    assert_perfect(&outcome);

    let diagram = outcome.diagram();
    let lines: Vec<&str> = diagram.lines().collect();
    assert_eq!(
        lines[..10],
        [
            "init -> cell[0,0]: visit(init)",
            "cell[0,0] -> probe[0,0]N: visitRand(0)",
            "probe[0,0]N -> probe[0,0]E: tryVisit(probe[0,0]N)",
            "probe[0,0]E -> wall[0,1]W: check(probe[0,0]E)",
            "wall[0,1]W -> probe[0,1]W: check(probe[0,0]E)",
            "probe[0,1]W -> cell[0,1]: check(probe[0,0]E)",
            "cell[0,1] -> probe[0,0]E: checkResult(false)",
            "probe[0,0]E -> wall[0,1]W: visit(probe[0,0]E)",
            "wall[0,1]W -> probe[0,1]W: visit(probe[0,0]E)",
            "probe[0,1]W -> cell[0,1]: visit(probe[0,0]E)",
        ]
    );
    assert!(lines.contains(&"border -> probe[0,1]E: checkResult(true)"));
    assert!(lines.contains(&"cell[0,1] -> probe[0,0]E: backTrack()"));
    assert_eq!(lines.last(), Some(&"cell[0,0] -> init: backTrack()"));
    assert_eq!(lines.len() as u64, outcome.events);
}
