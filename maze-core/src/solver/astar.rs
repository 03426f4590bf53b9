use std::{cmp::Ordering, collections::BinaryHeap};

use hashbrown::HashMap;

use crate::{
    dims::Pos,
    events::{EventSink, MazeEvent},
    grid::Grid,
};

use super::{reconstruct_path, Solution, Solver};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenNode {
    f: i32,
    /// Insertion counter, breaks `f` ties in favour of older entries.
    order: u64,
    pos: Pos,
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap (max-heap) pops smallest f first, then the
        // oldest entry.
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* search with unit step cost and a Manhattan estimate towards `target`.
///
/// The open set is a real min-heap on `f = g + h` with ties popped in
/// insertion order. Visited flags act as the closed set and stale heap
/// entries are skipped.
#[derive(Debug)]
pub struct AStar {
    target: Pos,
    open: BinaryHeap<OpenNode>,
    g: HashMap<Pos, i32>,
    came_from: HashMap<Pos, Pos>,
    counter: u64,
    started: bool,
    visited: usize,
    result: Option<Solution>,
}

impl AStar {
    /// `target` is the cell the heuristic measures distance to, see
    /// [`Heuristic::target`](super::Heuristic::target).
    pub fn new(target: Pos) -> Self {
        Self {
            target,
            open: BinaryHeap::new(),
            g: HashMap::new(),
            came_from: HashMap::new(),
            counter: 0,
            started: false,
            visited: 0,
            result: None,
        }
    }

    pub fn estimate(&self, pos: Pos) -> i32 {
        pos.manhattan(self.target)
    }

    fn push(&mut self, pos: Pos, g: i32) {
        self.open.push(OpenNode {
            f: g + self.estimate(pos),
            order: self.counter,
            pos,
        });
        self.counter += 1;
    }

    fn finish(&mut self, solution: Solution) -> Option<Solution> {
        self.open.clear();
        self.result = Some(solution);
        self.result.clone()
    }
}

impl Solver for AStar {
    fn step(&mut self, grid: &mut Grid, sink: &mut dyn EventSink) -> Option<Solution> {
        if self.result.is_some() {
            return self.result.clone();
        }

        let (start, exit) = (grid.entrance(), grid.exit());

        if !self.started {
            self.started = true;
            self.g.insert(start, 0);
            self.push(start, 0);
        }

        let current = loop {
            match self.open.pop() {
                Some(node) if grid.is_visited(node.pos) => continue,
                Some(node) => break node.pos,
                None => return self.finish(Solution::not_found(self.visited)),
            }
        };

        grid.mark_visited(current);
        self.visited += 1;
        sink.emit(MazeEvent::CellVisited { pos: current });

        if current == exit {
            let path = reconstruct_path(&self.came_from, start, exit);
            return self.finish(Solution::found(path, self.visited));
        }

        let current_g = self.g.get(&current).copied().unwrap_or(0);
        for (next, _) in grid.open_neighbors(current) {
            if grid.is_visited(next) {
                continue;
            }

            let tentative = current_g + 1;
            if self.g.get(&next).is_some_and(|&g| g <= tentative) {
                continue;
            }

            self.g.insert(next, tentative);
            self.came_from.insert(next, current);
            sink.emit(MazeEvent::Move {
                from: current,
                to: next,
                backtrack: false,
            });
            self.push(next, tentative);
        }

        None
    }
}
