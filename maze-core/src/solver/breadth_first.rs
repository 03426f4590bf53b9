use std::collections::VecDeque;

use hashbrown::HashMap;

use crate::{
    dims::Pos,
    events::{EventSink, MazeEvent},
    grid::Grid,
};

use super::{reconstruct_path, Solution, Solver};

/// Level-order search, shortest path by number of steps.
///
/// Cells are marked visited when queued, so each is queued at most once.
/// One step dequeues one cell.
#[derive(Debug, Default)]
pub struct BreadthFirst {
    queue: VecDeque<Pos>,
    came_from: HashMap<Pos, Pos>,
    started: bool,
    visited: usize,
    result: Option<Solution>,
}

impl BreadthFirst {
    pub fn new() -> Self {
        Self::default()
    }

    fn finish(&mut self, solution: Solution) -> Option<Solution> {
        self.queue.clear();
        self.result = Some(solution);
        self.result.clone()
    }
}

impl Solver for BreadthFirst {
    fn step(&mut self, grid: &mut Grid, sink: &mut dyn EventSink) -> Option<Solution> {
        if self.result.is_some() {
            return self.result.clone();
        }

        let (start, exit) = (grid.entrance(), grid.exit());

        if !self.started {
            self.started = true;
            grid.mark_visited(start);
            self.queue.push_back(start);
        }

        let Some(current) = self.queue.pop_front() else {
            return self.finish(Solution::not_found(self.visited));
        };

        self.visited += 1;
        sink.emit(MazeEvent::CellVisited { pos: current });

        if current == exit {
            let path = reconstruct_path(&self.came_from, start, exit);
            return self.finish(Solution::found(path, self.visited));
        }

        for (next, _) in grid.open_neighbors(current) {
            if grid.is_visited(next) {
                continue;
            }

            grid.mark_visited(next);
            self.came_from.insert(next, current);
            sink.emit(MazeEvent::Move {
                from: current,
                to: next,
                backtrack: false,
            });
            self.queue.push_back(next);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{events::NoopSink, grid::Direction, solver::run_solver};

    #[test]
    fn finds_shortest_in_open_room() {
        // fully open 3x3 room, many paths, shortest has 4 steps
        let mut grid = Grid::new(3, 3).unwrap();
        for pos in Pos::iter_fill(3, 3) {
            for dir in [Direction::Down, Direction::Right] {
                if let Some(next) = grid.neighbor(pos, dir) {
                    grid.break_wall(pos, next, dir);
                }
            }
        }

        let solution = run_solver(&mut BreadthFirst::new(), &mut grid, &mut NoopSink);
        assert!(solution.reached);
        assert_eq!(solution.len(), 4);
        assert_eq!(solution.path.first(), Some(&Pos(0, 0)));
        assert_eq!(solution.path.last(), Some(&Pos(2, 2)));
        for pair in solution.path.windows(2) {
            assert_eq!(pair[0].manhattan(pair[1]), 1);
        }
    }

    #[test]
    fn visits_in_level_order() {
        let mut grid = Grid::new(1, 4).unwrap();
        for c in 0..3 {
            grid.break_wall(Pos(0, c), Pos(0, c + 1), Direction::Right);
        }

        let mut events: Vec<MazeEvent> = Vec::new();
        let solution = run_solver(&mut BreadthFirst::new(), &mut grid, &mut events);
        assert_eq!(solution.visited, 4);

        let visited: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                MazeEvent::CellVisited { pos } => Some(*pos),
                _ => None,
            })
            .collect();
        assert_eq!(visited, vec![Pos(0, 0), Pos(0, 1), Pos(0, 2), Pos(0, 3)]);
        assert!(!events
            .iter()
            .any(|e| matches!(e, MazeEvent::Move { backtrack: true, .. })));
    }

    #[test]
    fn single_cell_maze() {
        let mut grid = Grid::new(1, 1).unwrap();
        let solution = run_solver(&mut BreadthFirst::new(), &mut grid, &mut NoopSink);
        assert_eq!(solution, Solution::found(vec![Pos(0, 0)], 1));
    }
}
