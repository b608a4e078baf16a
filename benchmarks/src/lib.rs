//! Shared regimes for waypoint benchmark suites.
//!
//! Each regime pairs a grid maze with a policy, chosen to stress one part of
//! the engine: wide frontiers, long corridors, exhaustive dead ends, or an
//! expansion cap.

use waypoint_harness::worlds::grid_maze::GridMaze;
use waypoint_search::policy::SearchPolicy;

pub struct Regime {
    pub name: &'static str,
    pub maze: GridMaze,
    pub policy: SearchPolicy<u32>,
}

fn parse(name: &str, rows: &[String]) -> GridMaze {
    GridMaze::parse(name, &rows.join("\n")).expect("generated maze is well formed")
}

/// Back-and-forth corridor: every odd row is a wall with a single gap,
/// alternating between the right and left edges.
#[must_use]
pub fn serpentine(width: usize, height: usize) -> GridMaze {
    let rows: Vec<String> = (0..height)
        .map(|r| {
            (0..width)
                .map(|c| match (r, c) {
                    (0, 0) => 'S',
                    _ if r == height - 1 && c == width - 1 => 'G',
                    _ if r % 2 == 0 => '.',
                    _ if (r / 2) % 2 == 0 && c == width - 1 => '.',
                    _ if (r / 2) % 2 == 1 && c == 0 => '.',
                    _ => '#',
                })
                .collect()
        })
        .collect();
    parse("serpentine", &rows)
}

/// Open room whose goal corner is sealed off, so search must exhaust.
#[must_use]
pub fn sealed_goal(size: usize) -> GridMaze {
    let rows: Vec<String> = (0..size)
        .map(|r| {
            (0..size)
                .map(|c| match (r, c) {
                    (0, 0) => 'S',
                    _ if r == size - 1 && c == size - 1 => 'G',
                    _ if (r == size - 2 && c == size - 1) || (r == size - 1 && c == size - 2) => {
                        '#'
                    }
                    _ => '.',
                })
                .collect()
        })
        .collect();
    parse("sealed_goal", &rows)
}

#[must_use]
pub fn regimes() -> Vec<Regime> {
    vec![
        Regime {
            name: "open_room",
            maze: GridMaze::open_room(64, 64),
            policy: SearchPolicy::default(),
        },
        Regime {
            name: "serpentine",
            maze: serpentine(64, 63),
            policy: SearchPolicy::default(),
        },
        Regime {
            name: "sealed_goal",
            maze: sealed_goal(48),
            policy: SearchPolicy::default(),
        },
        Regime {
            name: "budget_limited",
            maze: GridMaze::open_room(256, 256),
            policy: SearchPolicy::default().with_max_expansions(2_000),
        },
        Regime {
            name: "traced_room",
            maze: GridMaze::open_room(32, 32),
            policy: SearchPolicy::default().with_trace(true),
        },
    ]
}
