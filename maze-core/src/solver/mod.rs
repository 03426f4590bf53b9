//! Path finding from the entrance to the exit of a carved grid.
//!
//! All solvers move only through open wall pairs (see [`Grid::can_move`]),
//! use the grid's visited flags as their closed set and report progress as
//! [`MazeEvent::CellVisited`](crate::events::MazeEvent::CellVisited) and
//! [`MazeEvent::Move`](crate::events::MazeEvent::Move) events.
//!
//! Solvers are step-driven: [`Solver::step`] does one unit of work and
//! returns the [`Solution`] once the search is over.

mod astar;
mod breadth_first;
mod depth_first;

use std::{fmt, str::FromStr};

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::{dims::Pos, error::ParseError, events::EventSink, grid::Grid};
pub use astar::AStar;
pub use breadth_first::BreadthFirst;
pub use depth_first::DepthFirst;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SolveMethod {
    #[default]
    Dfs,
    Bfs,
    AStar,
}

impl SolveMethod {
    pub const ALL: [SolveMethod; 3] = [SolveMethod::Dfs, SolveMethod::Bfs, SolveMethod::AStar];

    pub fn title(self) -> &'static str {
        match self {
            Self::Dfs => "Depth First Search",
            Self::Bfs => "Breadth First Search",
            Self::AStar => "A* Pathing",
        }
    }
}

impl fmt::Display for SolveMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Dfs => "dfs",
            Self::Bfs => "bfs",
            Self::AStar => "astar",
        };
        f.write_str(name)
    }
}

impl FromStr for SolveMethod {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dfs" | "depth-first" => Ok(Self::Dfs),
            "bfs" | "breadth-first" => Ok(Self::Bfs),
            "astar" | "a*" => Ok(Self::AStar),
            _ => Err(ParseError {
                kind: "solve method",
                value: s.to_string(),
                expected: "dfs, bfs, astar",
            }),
        }
    }
}

/// Which cell the A* distance estimate aims at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Heuristic {
    /// Aims at `(rows - 1, cols - 2)`, one column short of the exit.
    #[default]
    Legacy,
    /// Aims at the exit itself.
    Manhattan,
}

impl Heuristic {
    pub fn target(self, grid: &Grid) -> Pos {
        let exit = grid.exit();
        match self {
            Self::Legacy => Pos(exit.0, exit.1 - 1),
            Self::Manhattan => exit,
        }
    }
}

impl FromStr for Heuristic {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "manhattan" => Ok(Self::Manhattan),
            _ => Err(ParseError {
                kind: "heuristic",
                value: s.to_string(),
                expected: "legacy, manhattan",
            }),
        }
    }
}

/// Outcome of a search. An unreachable exit is a normal result, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Solution {
    pub reached: bool,
    /// Cells from the entrance to the exit, empty when the exit was not reached.
    pub path: Vec<Pos>,
    /// How many cells the search expanded.
    pub visited: usize,
}

impl Solution {
    pub fn found(path: Vec<Pos>, visited: usize) -> Self {
        Self {
            reached: true,
            path,
            visited,
        }
    }

    pub fn not_found(visited: usize) -> Self {
        Self {
            reached: false,
            path: Vec::new(),
            visited,
        }
    }

    /// Path length in steps.
    pub fn len(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

pub trait Solver: fmt::Debug {
    /// Does one unit of search work.
    ///
    /// Returns `None` while the search goes on and the final [`Solution`] once
    /// it is over. Calling it again after that returns the same solution.
    fn step(&mut self, grid: &mut Grid, sink: &mut dyn EventSink) -> Option<Solution>;
}

pub fn solver_for(method: SolveMethod, grid: &Grid, heuristic: Heuristic) -> Box<dyn Solver> {
    match method {
        SolveMethod::Dfs => Box::new(DepthFirst::new()),
        SolveMethod::Bfs => Box::new(BreadthFirst::new()),
        SolveMethod::AStar => Box::new(AStar::new(heuristic.target(grid))),
    }
}

/// Drives `solver` until it finishes.
pub fn run_solver(solver: &mut dyn Solver, grid: &mut Grid, sink: &mut dyn EventSink) -> Solution {
    loop {
        if let Some(solution) = solver.step(grid, sink) {
            return solution;
        }
    }
}

/// Solves `grid` with the default heuristic.
pub fn solve(grid: &mut Grid, method: SolveMethod, sink: &mut dyn EventSink) -> Solution {
    solve_with(grid, method, Heuristic::default(), sink)
}

/// Clears the visited flags, then runs `method` to completion.
pub fn solve_with(
    grid: &mut Grid,
    method: SolveMethod,
    heuristic: Heuristic,
    sink: &mut dyn EventSink,
) -> Solution {
    grid.reset_visited();
    let mut solver = solver_for(method, grid, heuristic);
    let solution = run_solver(solver.as_mut(), grid, sink);
    log::debug!(
        "{} finished: reached {}, path of {} steps, {} cells visited",
        method.title(),
        solution.reached,
        solution.len(),
        solution.visited
    );
    solution
}

/// Walks a predecessor map back from `to` and returns the path in forward order.
fn reconstruct_path(came_from: &HashMap<Pos, Pos>, from: Pos, to: Pos) -> Vec<Pos> {
    let mut path = vec![to];
    let mut current = to;
    while current != from {
        match came_from.get(&current) {
            Some(&prev) => {
                path.push(prev);
                current = prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}
