pub mod cell;
pub use cell::{Cell, Direction, Walls};

use smallvec::SmallVec;

use crate::{
    array::Array2D,
    dims::Pos,
    error::{MazeError, Result},
};

/// Neighbor list of a single cell, never longer than 4.
pub type Neighbors = SmallVec<[(Pos, Direction); 4]>;

/// Rectangular grid of cells with paired walls.
///
/// Entrance is always the top-left cell and exit the bottom-right one. The
/// dimensions are fixed, a differently sized maze needs a new `Grid`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Array2D<Cell>,
}

impl Grid {
    pub fn new(rows: i32, cols: i32) -> Result<Self> {
        if rows < 1 || cols < 1 {
            return Err(MazeError::InvalidDimensions { rows, cols });
        }

        Ok(Grid {
            cells: Array2D::new(Cell::new(), rows as usize, cols as usize),
        })
    }

    pub fn rows(&self) -> usize {
        self.cells.rows()
    }

    pub fn cols(&self) -> usize {
        self.cells.cols()
    }

    /// `(rows, cols)`
    pub fn size(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn entrance(&self) -> Pos {
        Pos::ZERO
    }

    pub fn exit(&self) -> Pos {
        Pos(self.rows() as i32 - 1, self.cols() as i32 - 1)
    }

    pub fn is_in_bounds(&self, pos: Pos) -> bool {
        self.cells.pos_to_idx(pos).is_some()
    }

    pub fn cells(&self) -> &Array2D<Cell> {
        &self.cells
    }

    pub fn cell(&self, pos: Pos) -> Option<&Cell> {
        self.cells.get(pos)
    }

    /// The in-bounds cell next to `pos` in direction `dir`.
    pub fn neighbor(&self, pos: Pos, dir: Direction) -> Option<Pos> {
        let next = pos + dir.offset();
        (self.is_in_bounds(pos) && self.is_in_bounds(next)).then_some(next)
    }

    /// Returns the direction leading from `from` to `to`, if they are adjacent.
    pub fn direction_between(from: Pos, to: Pos) -> Option<Direction> {
        match (to.0 - from.0, to.1 - from.1) {
            (-1, 0) => Some(Direction::Up),
            (1, 0) => Some(Direction::Down),
            (0, -1) => Some(Direction::Left),
            (0, 1) => Some(Direction::Right),
            _ => None,
        }
    }

    /// Unvisited orthogonal neighbors, in the order up, down, left, right.
    pub fn neighbors_unvisited(&self, pos: Pos) -> Neighbors {
        Direction::get_in_order()
            .into_iter()
            .filter_map(|dir| self.neighbor(pos, dir).map(|next| (next, dir)))
            .filter(|&(next, _)| !self.cells[next].is_visited())
            .collect()
    }

    /// Whether a step from `pos` towards `dir` is open: both walls of the pair
    /// are gone and the target is inside the grid.
    pub fn can_move(&self, pos: Pos, dir: Direction) -> bool {
        match self.neighbor(pos, dir) {
            Some(next) => {
                !self.cells[pos].get_wall(dir) && !self.cells[next].get_wall(dir.reverse())
            }
            None => false,
        }
    }

    /// All legal moves from `pos`, in the order up, down, left, right.
    pub fn open_neighbors(&self, pos: Pos) -> Neighbors {
        Direction::get_in_order()
            .into_iter()
            .filter(|&dir| self.can_move(pos, dir))
            .map(|dir| (pos + dir.offset(), dir))
            .collect()
    }

    pub fn try_break_wall(&mut self, from: Pos, to: Pos, dir: Direction) -> Result<()> {
        let adjacent = self.neighbor(from, dir) == Some(to);
        if !adjacent {
            return Err(MazeError::IllegalWallBreak {
                from,
                to,
                direction: dir,
            });
        }

        self.cells[from].remove_wall(dir);
        self.cells[to].remove_wall(dir.reverse());
        Ok(())
    }

    /// Breaks the wall pair between two adjacent cells.
    ///
    /// # Panics
    /// When `to` is not the neighbor of `from` in direction `dir`.
    pub fn break_wall(&mut self, from: Pos, to: Pos, dir: Direction) {
        if let Err(err) = self.try_break_wall(from, to, dir) {
            panic!("{}", err);
        }
    }

    pub fn try_open_boundary(&mut self, pos: Pos, dir: Direction) -> Result<()> {
        let outside = pos + dir.offset();
        if !self.is_in_bounds(pos) || self.is_in_bounds(outside) {
            return Err(MazeError::IllegalWallBreak {
                from: pos,
                to: outside,
                direction: dir,
            });
        }

        self.cells[pos].remove_wall(dir);
        Ok(())
    }

    /// Removes a single outer wall, it has no pair.
    ///
    /// # Panics
    /// When `pos` is out of bounds or the wall faces another cell.
    pub fn open_boundary(&mut self, pos: Pos, dir: Direction) {
        if let Err(err) = self.try_open_boundary(pos, dir) {
            panic!("{}", err);
        }
    }

    pub fn mark_visited(&mut self, pos: Pos) {
        self.cells[pos].set_visited(true);
    }

    pub fn is_visited(&self, pos: Pos) -> bool {
        self.cells.get(pos).is_some_and(|cell| cell.is_visited())
    }

    pub fn visited_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_visited()).count()
    }

    pub fn reset_visited(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.set_visited(false);
        }
    }

    /// Number of interior wall pairs that are open. Outer walls are not counted.
    pub fn broken_wall_count(&self) -> usize {
        self.cells
            .iter_pos()
            .map(|pos| {
                [Direction::Down, Direction::Right]
                    .into_iter()
                    .filter(|&dir| self.can_move(pos, dir))
                    .count()
            })
            .sum()
    }

    /// Every interior wall is either standing on both sides or gone on both.
    pub fn walls_consistent(&self) -> bool {
        self.cells.iter_pos().all(|pos| {
            [Direction::Down, Direction::Right].into_iter().all(|dir| {
                match self.neighbor(pos, dir) {
                    Some(next) => {
                        self.cells[pos].get_wall(dir) == self.cells[next].get_wall(dir.reverse())
                    }
                    None => true,
                }
            })
        })
    }

    /// Whether every cell can be reached from the entrance through open passages.
    pub fn is_connected(&self) -> bool {
        let mut seen = Array2D::new(false, self.rows(), self.cols());
        let mut stack = vec![self.entrance()];
        seen[self.entrance()] = true;
        let mut reached = 1;

        while let Some(current) = stack.pop() {
            for (next, _) in self.open_neighbors(current) {
                if !seen[next] {
                    seen[next] = true;
                    reached += 1;
                    stack.push(next);
                }
            }
        }

        reached == self.cell_count()
    }

    /// Spanning tree check: consistent walls, connected, `n - 1` passages.
    pub fn is_perfect(&self) -> bool {
        self.walls_consistent()
            && self.broken_wall_count() == self.cell_count() - 1
            && self.is_connected()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_cells() {
        let grid = Grid::new(10, 12).unwrap();
        assert_eq!(grid.rows(), 10);
        assert_eq!(grid.cols(), 12);
        assert_eq!(grid.exit(), Pos(9, 11));
        assert!(grid.cells().iter().all(|c| c.walls() == Walls::CLOSED));
        assert!(grid.cells().iter().all(|c| !c.is_visited()));

        let grid = Grid::new(1000, 100).unwrap();
        assert_eq!(grid.size(), (1000, 100));
    }

    #[test]
    fn invalid_dimensions() {
        assert_eq!(
            Grid::new(0, 5),
            Err(MazeError::InvalidDimensions { rows: 0, cols: 5 })
        );
        assert!(Grid::new(5, -1).is_err());
        assert!(Grid::new(1, 1).is_ok());
    }

    #[test]
    fn unvisited_neighbors_order() {
        let mut grid = Grid::new(3, 3).unwrap();
        let center = Pos(1, 1);
        let dirs: Vec<_> = grid
            .neighbors_unvisited(center)
            .into_iter()
            .map(|(_, d)| d)
            .collect();
        assert_eq!(dirs, Direction::get_in_order().to_vec());

        grid.mark_visited(Pos(0, 1));
        grid.mark_visited(Pos(1, 2));
        let left: Vec<_> = grid.neighbors_unvisited(center).into_iter().collect();
        assert_eq!(
            left,
            vec![(Pos(2, 1), Direction::Down), (Pos(1, 0), Direction::Left)]
        );

        let corner: Vec<_> = grid.neighbors_unvisited(Pos(0, 0)).into_iter().collect();
        assert_eq!(corner, vec![(Pos(1, 0), Direction::Down)]);
    }

    #[test]
    fn break_wall_is_paired() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.break_wall(Pos(0, 0), Pos(0, 1), Direction::Right);

        assert!(!grid.cell(Pos(0, 0)).unwrap().has_right_wall());
        assert!(!grid.cell(Pos(0, 1)).unwrap().has_left_wall());
        assert!(grid.can_move(Pos(0, 0), Direction::Right));
        assert!(grid.can_move(Pos(0, 1), Direction::Left));
        assert!(!grid.can_move(Pos(0, 0), Direction::Down));
        assert_eq!(grid.broken_wall_count(), 1);
        assert!(grid.walls_consistent());
    }

    #[test]
    fn illegal_wall_break() {
        let mut grid = Grid::new(3, 3).unwrap();
        assert!(matches!(
            grid.try_break_wall(Pos(0, 0), Pos(2, 2), Direction::Right),
            Err(MazeError::IllegalWallBreak { .. })
        ));
        assert!(grid
            .try_break_wall(Pos(0, 0), Pos(0, 1), Direction::Down)
            .is_err());
        assert!(grid
            .try_break_wall(Pos(0, 0), Pos(-1, 0), Direction::Up)
            .is_err());
        assert_eq!(grid.broken_wall_count(), 0);
    }

    #[test]
    #[should_panic(expected = "Illegal wall break")]
    fn break_wall_panics_on_non_adjacent() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.break_wall(Pos(0, 0), Pos(1, 1), Direction::Down);
    }

    #[test]
    fn open_boundary_only_on_edges() {
        let mut grid = Grid::new(2, 3).unwrap();
        grid.open_boundary(Pos(0, 0), Direction::Up);
        assert!(!grid.cell(Pos(0, 0)).unwrap().has_top_wall());
        // no passage leads outside
        assert!(!grid.can_move(Pos(0, 0), Direction::Up));

        assert!(grid.try_open_boundary(Pos(0, 0), Direction::Down).is_err());
        assert!(grid.try_open_boundary(Pos(5, 5), Direction::Down).is_err());
        assert!(grid.try_open_boundary(Pos(1, 2), Direction::Down).is_ok());
        assert_eq!(grid.broken_wall_count(), 0);
    }

    #[test]
    fn reset_visited() {
        let mut grid = Grid::new(10, 10).unwrap();
        for pos in [Pos(0, 0), Pos(3, 7), Pos(9, 9), Pos(5, 5)] {
            grid.mark_visited(pos);
        }
        assert_eq!(grid.visited_count(), 4);

        grid.break_wall(Pos(0, 0), Pos(1, 0), Direction::Down);
        grid.reset_visited();

        assert_eq!(grid.visited_count(), 0);
        assert!(grid.can_move(Pos(0, 0), Direction::Down));
    }

    #[test]
    fn connectivity() {
        let mut grid = Grid::new(2, 2).unwrap();
        assert!(!grid.is_connected());

        grid.break_wall(Pos(0, 0), Pos(0, 1), Direction::Right);
        grid.break_wall(Pos(0, 1), Pos(1, 1), Direction::Down);
        assert!(!grid.is_connected());

        grid.break_wall(Pos(1, 1), Pos(1, 0), Direction::Left);
        assert!(grid.is_connected());
        assert!(grid.is_perfect());

        // closing the loop breaks the tree property
        grid.break_wall(Pos(1, 0), Pos(0, 0), Direction::Up);
        assert!(grid.is_connected());
        assert!(!grid.is_perfect());
    }

    #[test]
    fn direction_between() {
        assert_eq!(
            Grid::direction_between(Pos(1, 1), Pos(0, 1)),
            Some(Direction::Up)
        );
        assert_eq!(
            Grid::direction_between(Pos(1, 1), Pos(1, 2)),
            Some(Direction::Right)
        );
        assert_eq!(Grid::direction_between(Pos(1, 1), Pos(2, 2)), None);
        assert_eq!(Grid::direction_between(Pos(1, 1), Pos(1, 1)), None);
    }
}
