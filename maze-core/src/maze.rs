use crate::{
    error::{MazeError, Result},
    events::EventSink,
    generator::{Carver, Progress},
    grid::Grid,
    solver::{solver_for, Heuristic, SolveMethod, Solution, Solver},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MazeState {
    #[default]
    Idle,
    Generating,
    Solving,
}

/// What a single [`Maze::step`] call achieved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// No job was running.
    Idle,
    Running,
    Generated,
    Solved(Solution),
}

#[derive(Debug)]
enum Job {
    Generating(Carver),
    Solving {
        method: SolveMethod,
        solver: Box<dyn Solver>,
    },
}

/// One grid plus the job currently working on it.
///
/// Only one job runs at a time: `Idle -> Generating -> Idle` for carving and
/// `Idle -> Solving -> Idle` for each solve. Anything that would start a new
/// job or replace the grid while another one runs fails with
/// [`MazeError::Busy`].
#[derive(Debug)]
pub struct Maze {
    grid: Grid,
    seed: Option<u64>,
    last_seed: Option<u64>,
    heuristic: Heuristic,
    generated: bool,
    job: Option<Job>,
}

impl Maze {
    /// With `seed` set every generation carves the same maze, otherwise each
    /// one draws a fresh seed.
    pub fn new(rows: i32, cols: i32, seed: Option<u64>) -> Result<Self> {
        Ok(Self {
            grid: Grid::new(rows, cols)?,
            seed,
            last_seed: None,
            heuristic: Heuristic::default(),
            generated: false,
            job: None,
        })
    }

    pub fn state(&self) -> MazeState {
        match self.job {
            None => MazeState::Idle,
            Some(Job::Generating(_)) => MazeState::Generating,
            Some(Job::Solving { .. }) => MazeState::Solving,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Seed of the last carved maze, if any.
    pub fn seed(&self) -> Option<u64> {
        self.last_seed
    }

    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }

    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    pub fn set_heuristic(&mut self, heuristic: Heuristic) {
        self.heuristic = heuristic;
    }

    pub fn is_generated(&self) -> bool {
        self.generated
    }

    /// Carving progress, `None` unless generating.
    pub fn progress(&self) -> Option<Progress> {
        match &self.job {
            Some(Job::Generating(carver)) => Some(carver.progress()),
            _ => None,
        }
    }

    fn ensure_idle(&self) -> Result<()> {
        match self.state() {
            MazeState::Idle => Ok(()),
            state => Err(MazeError::Busy(state)),
        }
    }

    /// Throws the current grid away and starts over with a fresh, uncarved one.
    pub fn reconfigure(&mut self, rows: i32, cols: i32) -> Result<()> {
        self.ensure_idle()?;
        self.grid = Grid::new(rows, cols)?;
        self.generated = false;
        log::debug!("Maze reconfigured to {rows}x{cols}");
        Ok(())
    }

    /// Starts carving. A grid that was carved before is replaced by a fresh
    /// one of the same size first.
    pub fn start_generation(&mut self) -> Result<()> {
        self.ensure_idle()?;
        if self.generated {
            let (rows, cols) = self.grid.size();
            self.grid = Grid::new(rows as i32, cols as i32)?;
            self.generated = false;
        }

        let carver = Carver::new(&self.grid, self.seed);
        self.last_seed = Some(carver.seed());
        self.job = Some(Job::Generating(carver));
        Ok(())
    }

    /// Clears visited flags and starts a search with `method`.
    pub fn start_solve(&mut self, method: SolveMethod) -> Result<()> {
        self.ensure_idle()?;
        if !self.generated {
            log::warn!("Solving a maze that was not carved yet");
        }

        self.grid.reset_visited();
        let solver = solver_for(method, &self.grid, self.heuristic);
        log::debug!("Starting {}", method.title());
        self.job = Some(Job::Solving { method, solver });
        Ok(())
    }

    /// Advances the running job by one step, going back to idle when it ends.
    pub fn step(&mut self, sink: &mut dyn EventSink) -> StepOutcome {
        let outcome = match &mut self.job {
            None => return StepOutcome::Idle,
            Some(Job::Generating(carver)) => {
                if carver.step(&mut self.grid, sink) {
                    StepOutcome::Running
                } else {
                    self.generated = true;
                    StepOutcome::Generated
                }
            }
            Some(Job::Solving { method, solver }) => match solver.step(&mut self.grid, sink) {
                None => StepOutcome::Running,
                Some(solution) => {
                    log::debug!(
                        "{} finished: reached {}, {} steps, {} visited",
                        method.title(),
                        solution.reached,
                        solution.len(),
                        solution.visited
                    );
                    StepOutcome::Solved(solution)
                }
            },
        };

        if outcome != StepOutcome::Running {
            self.job = None;
        }
        outcome
    }

    /// Carves the whole maze, returns the seed used.
    pub fn generate(&mut self, sink: &mut dyn EventSink) -> Result<u64> {
        self.start_generation()?;
        while self.step(sink) == StepOutcome::Running {}
        Ok(self.last_seed.unwrap_or_default())
    }

    pub fn solve(&mut self, method: SolveMethod, sink: &mut dyn EventSink) -> Result<Solution> {
        self.start_solve(method)?;
        loop {
            match self.step(sink) {
                StepOutcome::Running => {}
                StepOutcome::Solved(solution) => return Ok(solution),
                StepOutcome::Idle | StepOutcome::Generated => return Ok(Solution::default()),
            }
        }
    }

    /// Resizes when the size differs, carves a new maze and solves it.
    pub fn run(
        &mut self,
        method: SolveMethod,
        rows: i32,
        cols: i32,
        sink: &mut dyn EventSink,
    ) -> Result<Solution> {
        self.ensure_idle()?;
        if self.grid.size() != (rows.max(0) as usize, cols.max(0) as usize) {
            self.reconfigure(rows, cols)?;
        }
        self.generate(sink)?;
        self.solve(method, sink)
    }
}
