mod depth_first_search;

use std::fmt;

use rand::{thread_rng, Rng as _, SeedableRng as _};

use crate::{
    events::{EventSink, MazeEvent},
    grid::{Direction, Grid},
    MazeError, Result,
};
pub use depth_first_search::DepthFirstSearch;

/// Random number generator used for anything, where determinism is required.
pub type Random = rand_xoshiro::Xoshiro256StarStar;

/// Creates the generator RNG, drawing a fresh seed when none is given.
///
/// Returns the seed actually used, so the maze can be reproduced later.
pub fn new_rng(seed: Option<u64>) -> (Random, u64) {
    let seed = seed.unwrap_or_else(|| thread_rng().gen());
    (Random::seed_from_u64(seed), seed)
}

pub trait MazeGenerator: fmt::Debug {
    /// Performs one unit of carving work on `grid`.
    ///
    /// Returns `false` once there is nothing left to carve.
    fn carve_step(&mut self, grid: &mut Grid, rng: &mut Random, sink: &mut dyn EventSink) -> bool;

    /// Number of cells the algorithm is done with.
    fn finalized(&self) -> usize;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub done: usize,
    pub from: usize,
    pub is_done: bool,
}

impl Progress {
    pub fn percent(&self) -> f32 {
        if self.from == 0 {
            return 1.0;
        }
        self.done as f32 / self.from as f32
    }
}

/// Step-driven maze generation over one grid.
///
/// Owns the RNG, so two carvers built with the same seed produce the same
/// maze. After the algorithm runs out of work the entrance top wall and the
/// exit bottom wall are opened and the visited flags are cleared, leaving the
/// grid ready for a solver.
#[derive(Debug)]
pub struct Carver<G = DepthFirstSearch> {
    algorithm: G,
    rng: Random,
    seed: u64,
    total: usize,
    finished: bool,
}

impl Carver<DepthFirstSearch> {
    pub fn new(grid: &Grid, seed: Option<u64>) -> Self {
        Self::with_algorithm(DepthFirstSearch::new(), grid, seed)
    }
}

impl<G: MazeGenerator> Carver<G> {
    pub fn with_algorithm(algorithm: G, grid: &Grid, seed: Option<u64>) -> Self {
        let (rng, seed) = new_rng(seed);
        log::debug!(
            "Carving {}x{} maze with seed {}",
            grid.rows(),
            grid.cols(),
            seed
        );

        Self {
            algorithm,
            rng,
            seed,
            total: grid.cell_count(),
            finished: false,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn progress(&self) -> Progress {
        Progress {
            done: self.algorithm.finalized(),
            from: self.total,
            is_done: self.finished,
        }
    }

    /// Advances carving by one step. Returns `true` while there is more to do.
    pub fn step(&mut self, grid: &mut Grid, sink: &mut dyn EventSink) -> bool {
        if self.finished {
            return false;
        }

        if self.algorithm.carve_step(grid, &mut self.rng, sink) {
            return true;
        }

        Self::open_entrance_and_exit(grid, sink);
        grid.reset_visited();
        self.finished = true;
        log::debug!(
            "Maze carved, {} passages for {} cells",
            grid.broken_wall_count(),
            grid.cell_count()
        );

        false
    }

    /// Runs carving to completion and returns the seed used.
    pub fn run(mut self, grid: &mut Grid, sink: &mut dyn EventSink) -> u64 {
        while self.step(grid, sink) {}
        self.seed
    }

    fn open_entrance_and_exit(grid: &mut Grid, sink: &mut dyn EventSink) {
        let entrance = grid.entrance();
        grid.open_boundary(entrance, Direction::Up);
        sink.emit(MazeEvent::BoundaryOpened {
            pos: entrance,
            direction: Direction::Up,
        });

        let exit = grid.exit();
        grid.open_boundary(exit, Direction::Down);
        sink.emit(MazeEvent::BoundaryOpened {
            pos: exit,
            direction: Direction::Down,
        });
    }
}

/// Carves `grid` with the randomized backtracker in one go, returning the seed.
///
/// The grid must be fully walled. Carving over existing passages would link
/// cells twice, so that case is rejected with [`MazeError::AlreadyCarved`].
pub fn generate(grid: &mut Grid, seed: Option<u64>, sink: &mut dyn EventSink) -> Result<u64> {
    let entrance_open = grid
        .cell(grid.entrance())
        .is_some_and(|cell| !cell.has_top_wall());
    if grid.broken_wall_count() != 0 || entrance_open {
        return Err(MazeError::AlreadyCarved);
    }

    Ok(Carver::new(grid, seed).run(grid, sink))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dims::Pos, events::NoopSink};

    #[test]
    fn same_seed_same_maze() {
        let mut a = Grid::new(15, 9).unwrap();
        let mut b = Grid::new(15, 9).unwrap();
        generate(&mut a, Some(42), &mut NoopSink).unwrap();
        generate(&mut b, Some(42), &mut NoopSink).unwrap();
        assert_eq!(a, b);

        let mut c = Grid::new(15, 9).unwrap();
        generate(&mut c, Some(43), &mut NoopSink).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn unseeded_reports_seed() {
        let mut grid = Grid::new(6, 6).unwrap();
        let seed = generate(&mut grid, None, &mut NoopSink).unwrap();

        let mut again = Grid::new(6, 6).unwrap();
        generate(&mut again, Some(seed), &mut NoopSink).unwrap();
        assert_eq!(grid, again);
    }

    #[test]
    fn entrance_and_exit_open() {
        for (rows, cols) in [(12, 10), (1, 1), (1, 7), (5, 1)] {
            let mut grid = Grid::new(rows, cols).unwrap();
            generate(&mut grid, Some(1), &mut NoopSink).unwrap();

            assert!(!grid.cell(Pos::ZERO).unwrap().has_top_wall());
            assert!(!grid.cell(grid.exit()).unwrap().has_bottom_wall());
            assert!(grid.is_perfect());
            assert_eq!(grid.visited_count(), 0);
        }
    }

    #[test]
    fn stepping_reports_progress() {
        let mut grid = Grid::new(3, 4).unwrap();
        let mut carver = Carver::new(&grid, Some(5));
        assert_eq!(carver.progress().done, 0);

        let mut steps = 0;
        while carver.step(&mut grid, &mut NoopSink) {
            steps += 1;
        }

        // pop count depends only on the grid shape, never on the seed
        assert_eq!(steps + 1, 18);
        let progress = carver.progress();
        assert!(progress.is_done);
        assert_eq!(progress.done, progress.from);
        assert_eq!(progress.percent(), 1.0);
        assert!(!carver.step(&mut grid, &mut NoopSink));
    }

    #[test]
    fn carved_grid_is_rejected() {
        let mut grid = Grid::new(5, 5).unwrap();
        generate(&mut grid, Some(3), &mut NoopSink).unwrap();
        let carved = grid.clone();

        let mut events: Vec<MazeEvent> = Vec::new();
        assert_eq!(
            generate(&mut grid, Some(4), &mut events),
            Err(MazeError::AlreadyCarved)
        );
        assert!(events.is_empty());
        assert_eq!(grid, carved);

        let mut single = Grid::new(1, 1).unwrap();
        generate(&mut single, Some(0), &mut NoopSink).unwrap();
        assert!(generate(&mut single, Some(0), &mut NoopSink).is_err());
    }

    #[test]
    fn boundary_events_come_last() {
        let mut grid = Grid::new(4, 4).unwrap();
        let mut events: Vec<MazeEvent> = Vec::new();
        generate(&mut grid, Some(9), &mut events).unwrap();

        let n = events.len();
        assert_eq!(
            events[n - 2],
            MazeEvent::BoundaryOpened {
                pos: Pos(0, 0),
                direction: Direction::Up
            }
        );
        assert_eq!(
            events[n - 1],
            MazeEvent::BoundaryOpened {
                pos: Pos(3, 3),
                direction: Direction::Down
            }
        );
        assert!(events.iter().all(MazeEvent::is_generation));
    }
}
