use crate::{
    dims::Pos,
    events::{EventSink, MazeEvent},
    grid::{Direction, Grid},
};

use super::{Solution, Solver};

#[derive(Debug, Clone, Copy)]
struct Frame {
    pos: Pos,
    /// Index into [`Direction::get_in_order`] of the next direction to try.
    next_dir: usize,
}

/// Depth-first walk with an explicit frame stack instead of recursion.
///
/// Each step either advances into the first open unvisited neighbor of the
/// top frame, or pops the frame and reports a backtracking move. When the exit
/// is reached the frames on the stack are the path.
#[derive(Debug, Default)]
pub struct DepthFirst {
    stack: Vec<Frame>,
    started: bool,
    visited: usize,
    result: Option<Solution>,
}

impl DepthFirst {
    pub fn new() -> Self {
        Self::default()
    }

    fn visit(&mut self, grid: &mut Grid, pos: Pos, sink: &mut dyn EventSink) {
        grid.mark_visited(pos);
        self.visited += 1;
        sink.emit(MazeEvent::CellVisited { pos });
    }

    fn finish(&mut self, solution: Solution) -> Option<Solution> {
        self.stack.clear();
        self.result = Some(solution);
        self.result.clone()
    }

    fn path_to(&self, last: Pos) -> Vec<Pos> {
        self.stack
            .iter()
            .map(|frame| frame.pos)
            .chain(Some(last))
            .collect()
    }
}

impl Solver for DepthFirst {
    fn step(&mut self, grid: &mut Grid, sink: &mut dyn EventSink) -> Option<Solution> {
        if self.result.is_some() {
            return self.result.clone();
        }

        let exit = grid.exit();

        if !self.started {
            self.started = true;
            let start = grid.entrance();
            self.visit(grid, start, sink);
            if start == exit {
                return self.finish(Solution::found(vec![start], self.visited));
            }
            self.stack.push(Frame {
                pos: start,
                next_dir: 0,
            });
            return None;
        }

        let Some(frame) = self.stack.last_mut() else {
            return self.finish(Solution::not_found(self.visited));
        };

        let current = frame.pos;
        let mut advance = None;
        let dirs = Direction::get_in_order();
        while frame.next_dir < dirs.len() {
            let dir = dirs[frame.next_dir];
            frame.next_dir += 1;

            if grid.can_move(current, dir) {
                let next = current + dir.offset();
                if !grid.is_visited(next) {
                    advance = Some(next);
                    break;
                }
            }
        }

        match advance {
            Some(next) => {
                sink.emit(MazeEvent::Move {
                    from: current,
                    to: next,
                    backtrack: false,
                });
                self.visit(grid, next, sink);

                if next == exit {
                    let path = self.path_to(next);
                    return self.finish(Solution::found(path, self.visited));
                }

                self.stack.push(Frame {
                    pos: next,
                    next_dir: 0,
                });
                None
            }
            None => {
                self.stack.pop();
                match self.stack.last() {
                    Some(parent) => {
                        sink.emit(MazeEvent::Move {
                            from: current,
                            to: parent.pos,
                            backtrack: true,
                        });
                        None
                    }
                    None => self.finish(Solution::not_found(self.visited)),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        events::NoopSink,
        solver::{run_solver, tests::snake},
    };

    #[test]
    fn single_cell_maze() {
        let mut grid = Grid::new(1, 1).unwrap();
        let solution = run_solver(&mut DepthFirst::new(), &mut grid, &mut NoopSink);
        assert_eq!(solution, Solution::found(vec![Pos(0, 0)], 1));
    }

    #[test]
    fn backtracks_out_of_dead_ends() {
        // (0,0) -> (1,0) is a dead end, exit reached through (0,1)
        let mut grid = Grid::new(2, 2).unwrap();
        grid.break_wall(Pos(0, 0), Pos(1, 0), Direction::Down);
        grid.break_wall(Pos(0, 0), Pos(0, 1), Direction::Right);
        grid.break_wall(Pos(0, 1), Pos(1, 1), Direction::Down);

        let mut events: Vec<MazeEvent> = Vec::new();
        let solution = run_solver(&mut DepthFirst::new(), &mut grid, &mut events);

        assert!(solution.reached);
        assert_eq!(solution.path, vec![Pos(0, 0), Pos(0, 1), Pos(1, 1)]);
        assert_eq!(
            events,
            vec![
                MazeEvent::CellVisited { pos: Pos(0, 0) },
                MazeEvent::Move {
                    from: Pos(0, 0),
                    to: Pos(1, 0),
                    backtrack: false
                },
                MazeEvent::CellVisited { pos: Pos(1, 0) },
                MazeEvent::Move {
                    from: Pos(1, 0),
                    to: Pos(0, 0),
                    backtrack: true
                },
                MazeEvent::Move {
                    from: Pos(0, 0),
                    to: Pos(0, 1),
                    backtrack: false
                },
                MazeEvent::CellVisited { pos: Pos(0, 1) },
                MazeEvent::Move {
                    from: Pos(0, 1),
                    to: Pos(1, 1),
                    backtrack: false
                },
                MazeEvent::CellVisited { pos: Pos(1, 1) },
            ]
        );
    }

    #[test]
    fn exhaustion_without_exit() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.break_wall(Pos(0, 0), Pos(0, 1), Direction::Right);

        let mut solver = DepthFirst::new();
        let solution = run_solver(&mut solver, &mut grid, &mut NoopSink);
        assert_eq!(solution, Solution::not_found(2));
        assert_eq!(solver.step(&mut grid, &mut NoopSink), Some(solution));
    }

    #[test]
    fn one_step_per_edge() {
        let mut grid = snake();
        let mut solver = DepthFirst::new();
        let mut steps = 1;
        while solver.step(&mut grid, &mut NoopSink).is_none() {
            steps += 1;
        }
        // start + 8 advances
        assert_eq!(steps, 9);
    }
}
