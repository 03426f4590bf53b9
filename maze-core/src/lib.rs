//! Perfect maze generation and solving.
//!
//! A [`Grid`](grid::Grid) is carved into a spanning tree by a stack-driven
//! randomized backtracker and then searched from the top-left entrance to the
//! bottom-right exit by depth-first, breadth-first or A* search. Every
//! mutation is reported through an [`EventSink`](events::EventSink), so a
//! renderer can follow along without the algorithms knowing about it.
//!
//! [`Maze`](maze::Maze) ties it together with a small state machine that
//! runs at most one job at a time.

pub mod array;
pub mod dims;
pub mod error;
pub mod events;
pub mod generator;
pub mod grid;
pub mod maze;
pub mod solver;

pub use error::{MazeError, Result};
pub use maze::{Maze, MazeState, StepOutcome};
