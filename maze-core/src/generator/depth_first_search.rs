use rand::seq::SliceRandom as _;

use crate::{
    dims::Pos,
    events::{EventSink, MazeEvent},
    grid::Grid,
};

use super::{MazeGenerator, Random};

/// Randomized depth-first carving driven by an explicit stack.
///
/// Each step pops a cell and marks it visited. A cell without unvisited
/// neighbors is a dead end and is dropped. Otherwise one unvisited neighbor is
/// picked at random, the wall pair between them is broken and every unvisited
/// neighbor is pushed, in the fixed up, down, left, right order. A cell can sit
/// on the stack more than once; only its first pop counts as finalizing it.
#[derive(Debug, Default)]
pub struct DepthFirstSearch {
    stack: Vec<Pos>,
    started: bool,
    finalized: usize,
}

impl DepthFirstSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stack_len(&self) -> usize {
        self.stack.len()
    }
}

impl MazeGenerator for DepthFirstSearch {
    fn carve_step(&mut self, grid: &mut Grid, rng: &mut Random, sink: &mut dyn EventSink) -> bool {
        if !self.started {
            self.started = true;
            self.stack.reserve(grid.cell_count());
            self.stack.push(grid.entrance());
        }

        let Some(current) = self.stack.pop() else {
            return false;
        };

        let first_visit = !grid.is_visited(current);
        grid.mark_visited(current);

        let unvisited = grid.neighbors_unvisited(current);
        if let Some(&(next, dir)) = unvisited.choose(rng) {
            grid.break_wall(current, next, dir);
            sink.emit(MazeEvent::WallBroken {
                from: current,
                to: next,
                direction: dir,
            });
            self.stack.extend(unvisited.iter().map(|&(pos, _)| pos));
        }

        if first_visit {
            self.finalized += 1;
            sink.emit(MazeEvent::CellFinalized {
                pos: current,
                walls: grid.cells()[current].walls(),
            });
        }

        !self.stack.is_empty()
    }

    fn finalized(&self) -> usize {
        self.finalized
    }
}
