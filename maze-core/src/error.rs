use thiserror::Error;

use crate::{dims::Pos, grid::Direction, maze::MazeState};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("Invalid maze dimensions {rows}x{cols}, both must be at least 1")]
    InvalidDimensions { rows: i32, cols: i32 },
    #[error("Illegal wall break from {from} to {to} going {direction:?}")]
    IllegalWallBreak {
        from: Pos,
        to: Pos,
        direction: Direction,
    },
    #[error("Grid already has open passages, carving needs a fresh grid")]
    AlreadyCarved,
    #[error("Maze is busy ({0:?}), wait until it is idle")]
    Busy(MazeState),
}

pub type Result<T, E = MazeError> = std::result::Result<T, E>;

/// Failure to parse one of the named options (solve method, heuristic).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind} '{value}', expected one of: {expected}")]
pub struct ParseError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}
