//! Four-connected grid maze parsed from ASCII art.
//!
//! `#` is a wall, `S` the start, `G` a goal; everything else is open floor.
//! Each move costs 1.

use waypoint_kernel::heuristic::Heuristic;
use waypoint_kernel::problem::{GraphProblem, OperatorResult, ProblemError, Successors};

/// Grid cell, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MazeError {
    #[error("maze has no rows")]
    Empty,
    #[error("row {row} has width {width}, expected {expected}")]
    Ragged { row: u32, width: u32, expected: u32 },
    #[error("maze has {count} start cells, expected exactly one")]
    Start { count: usize },
    #[error("maze dimension {dim} does not fit in u32")]
    TooLarge { dim: usize },
}

const MOVES: [(&str, i64, i64); 4] = [("N", -1, 0), ("E", 0, 1), ("S", 1, 0), ("W", 0, -1)];

#[derive(Debug, Clone)]
pub struct GridMaze {
    name: String,
    width: u32,
    height: u32,
    walls: Vec<bool>,
    start: Cell,
    goals: Vec<Cell>,
}

impl GridMaze {
    /// Parse rows of ASCII art. Leading and trailing blank lines are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError`] if the maze is empty, ragged, or does not have
    /// exactly one start cell.
    pub fn parse(name: impl Into<String>, art: &str) -> Result<Self, MazeError> {
        let rows: Vec<&str> = art
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let first = rows.first().ok_or(MazeError::Empty)?;
        let width = to_u32(first.chars().count())?;
        let height = to_u32(rows.len())?;

        let mut walls = Vec::with_capacity(rows.len() * first.len());
        let mut starts = Vec::new();
        let mut goals = Vec::new();
        for (r, line) in (0u32..).zip(&rows) {
            let row_width = to_u32(line.chars().count())?;
            if row_width != width {
                return Err(MazeError::Ragged {
                    row: r,
                    width: row_width,
                    expected: width,
                });
            }
            for (c, ch) in (0u32..).zip(line.chars()) {
                let cell = Cell { row: r, col: c };
                match ch {
                    'S' => starts.push(cell),
                    'G' => goals.push(cell),
                    _ => {}
                }
                walls.push(ch == '#');
            }
        }
        if starts.len() != 1 {
            return Err(MazeError::Start {
                count: starts.len(),
            });
        }
        Ok(Self {
            name: name.into(),
            width,
            height,
            walls,
            start: starts[0],
            goals,
        })
    }

    /// An open `width` x `height` room, start top-left, goal bottom-right.
    #[must_use]
    pub fn open_room(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let cells = (width as usize) * (height as usize);
        Self {
            name: format!("OpenRoom({width}x{height})"),
            width,
            height,
            walls: vec![false; cells],
            start: Cell { row: 0, col: 0 },
            goals: vec![Cell {
                row: height - 1,
                col: width - 1,
            }],
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn goals(&self) -> &[Cell] {
        &self.goals
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        (cell.row < self.height && cell.col < self.width)
            .then(|| cell.row as usize * self.width as usize + cell.col as usize)
    }

    /// Whether `cell` is inside the maze and not a wall.
    #[must_use]
    pub fn is_open(&self, cell: Cell) -> bool {
        self.index(cell).is_some_and(|i| !self.walls[i])
    }

    fn check(&self, cell: Cell) -> Result<(), ProblemError> {
        if self.is_open(cell) {
            Ok(())
        } else {
            Err(ProblemError::InvalidState {
                problem: self.name.clone(),
                detail: format!("cell ({}, {}) is a wall or off the grid", cell.row, cell.col),
            })
        }
    }

    fn step(&self, cell: Cell, dr: i64, dc: i64) -> Option<Cell> {
        let row = u32::try_from(i64::from(cell.row) + dr).ok()?;
        let col = u32::try_from(i64::from(cell.col) + dc).ok()?;
        let next = Cell { row, col };
        self.is_open(next).then_some(next)
    }
}

fn to_u32(dim: usize) -> Result<u32, MazeError> {
    u32::try_from(dim).map_err(|_| MazeError::TooLarge { dim })
}

impl GraphProblem for GridMaze {
    type State = Cell;
    type Cost = u32;

    fn name(&self) -> &str {
        &self.name
    }

    fn initial_state(&self) -> Cell {
        self.start
    }

    fn is_goal(&self, state: &Cell) -> Result<bool, ProblemError> {
        self.check(*state)?;
        Ok(self.goals.contains(state))
    }

    fn expand_state_with_costs<'a>(
        &'a self,
        state: &'a Cell,
    ) -> Result<Successors<'a, Cell, u32>, ProblemError> {
        self.check(*state)?;
        let here = *state;
        Ok(Box::new(MOVES.iter().filter_map(move |&(name, dr, dc)| {
            self.step(here, dr, dc)
                .map(|next| Ok(OperatorResult::new(next, 1).with_name(name)))
        })))
    }
}

/// Manhattan distance to the nearest goal. Admissible for unit moves.
#[derive(Debug, Clone)]
pub struct ManhattanHeuristic {
    goals: Vec<Cell>,
}

impl ManhattanHeuristic {
    #[must_use]
    pub fn new(maze: &GridMaze) -> Self {
        Self {
            goals: maze.goals().to_vec(),
        }
    }
}

impl Heuristic<Cell, u32> for ManhattanHeuristic {
    fn estimate(&self, state: &Cell) -> u32 {
        self.goals
            .iter()
            .map(|g| state.row.abs_diff(g.row) + state.col.abs_diff(g.col))
            .min()
            .unwrap_or(0)
    }
}
