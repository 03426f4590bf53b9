use serde::{Deserialize, Serialize};

use crate::dims::Pos;

/// Which wall of a cell, or equivalently which way to step out of it.
///
/// `Up`/`Down` change the row, `Left`/`Right` change the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Fixed enumeration order shared by neighbor lookup and all solvers.
    pub const fn get_in_order() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    pub fn offset(self) -> Pos {
        match self {
            Self::Up => Pos(-1, 0),
            Self::Down => Pos(1, 0),
            Self::Left => Pos(0, -1),
            Self::Right => Pos(0, 1),
        }
    }

    pub fn reverse(self) -> Direction {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Snapshot of the four wall flags of one cell, `true` meaning the wall stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Walls {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl Walls {
    pub const CLOSED: Walls = Walls {
        top: true,
        bottom: true,
        left: true,
        right: true,
    };

    pub fn get(&self, dir: Direction) -> bool {
        match dir {
            Direction::Up => self.top,
            Direction::Down => self.bottom,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub fn count(&self) -> usize {
        Direction::get_in_order()
            .into_iter()
            .filter(|&dir| self.get(dir))
            .count()
    }
}

impl Default for Walls {
    fn default() -> Self {
        Self::CLOSED
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    walls: Walls,
    visited: bool,
}

impl Cell {
    pub fn new() -> Cell {
        Cell {
            walls: Walls::CLOSED,
            visited: false,
        }
    }

    pub fn remove_wall(&mut self, wall: Direction) {
        match wall {
            Direction::Up => self.walls.top = false,
            Direction::Down => self.walls.bottom = false,
            Direction::Left => self.walls.left = false,
            Direction::Right => self.walls.right = false,
        }
    }

    pub fn get_wall(&self, wall: Direction) -> bool {
        self.walls.get(wall)
    }

    pub fn has_top_wall(&self) -> bool {
        self.walls.top
    }

    pub fn has_bottom_wall(&self) -> bool {
        self.walls.bottom
    }

    pub fn has_left_wall(&self) -> bool {
        self.walls.left
    }

    pub fn has_right_wall(&self) -> bool {
        self.walls.right
    }

    pub fn walls(&self) -> Walls {
        self.walls
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cell_is_closed_and_unvisited() {
        let cell = Cell::new();
        for dir in Direction::get_in_order() {
            assert!(cell.get_wall(dir));
        }
        assert!(!cell.is_visited());
        assert_eq!(cell.walls().count(), 4);
    }

    #[test]
    fn remove_wall_touches_one_flag() {
        let mut cell = Cell::new();
        cell.remove_wall(Direction::Left);
        assert!(!cell.has_left_wall());
        assert!(cell.has_right_wall());
        assert!(cell.has_top_wall());
        assert!(cell.has_bottom_wall());
    }

    #[test]
    fn reverse_offsets_cancel() {
        for dir in Direction::get_in_order() {
            assert_eq!(dir.offset() + dir.reverse().offset(), Pos::ZERO);
            assert_eq!(dir.reverse().reverse(), dir);
            assert_eq!(dir.offset().abs_sum(), 1);
        }
    }
}
