use std::{fmt, io::Write, str::FromStr};

use maze_core::{
    error::ParseError,
    events::{AnimationSpeed, EventSink, NoopSink, Paced},
    solver::{Heuristic, SolveMethod, Solution},
    Maze,
};

use crate::{
    error::AppError,
    render::{self, EventPrinter},
    settings::Settings,
};

/// Which solvers to run, parsed from `dfs`, `bfs`, `astar` or `all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodSelection {
    One(SolveMethod),
    All,
}

impl MethodSelection {
    pub fn methods(self) -> Vec<SolveMethod> {
        match self {
            Self::One(method) => vec![method],
            Self::All => SolveMethod::ALL.to_vec(),
        }
    }
}

impl FromStr for MethodSelection {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::One).map_err(|_| ParseError {
            kind: "solve method",
            value: s.to_string(),
            expected: "dfs, bfs, astar, all",
        })
    }
}

impl fmt::Display for MethodSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::One(method) => write!(f, "{method}"),
            Self::All => f.write_str("all"),
        }
    }
}

/// Everything one run needs, settings already merged with the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub rows: i32,
    pub cols: i32,
    pub seed: Option<u64>,
    pub methods: Vec<SolveMethod>,
    pub speed: AnimationSpeed,
    pub heuristic: Heuristic,
    pub print_events: bool,
}

impl RunConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            rows: settings.get_rows(),
            cols: settings.get_cols(),
            seed: settings.get_seed(),
            methods: vec![settings.get_method()],
            speed: settings.get_speed(),
            heuristic: settings.get_heuristic(),
            print_events: false,
        }
    }
}

/// Runs `f` with the event sink the config asks for. Printed events go to
/// `out`, paced by the configured speed.
fn with_sink<W, T, F>(config: &RunConfig, out: &mut W, f: F) -> Result<T, AppError>
where
    W: Write,
    F: FnOnce(&mut dyn EventSink) -> Result<T, AppError>,
{
    if !config.print_events {
        return f(&mut NoopSink);
    }

    let mut sink = Paced::new(EventPrinter::new(&mut *out), config.speed.delay());
    let value = f(&mut sink)?;
    sink.into_inner().finish()?;
    Ok(value)
}

/// Carves one maze and solves it with every configured method, writing the
/// drawings and summaries to `out`.
pub fn run<W: Write>(
    config: &RunConfig,
    out: &mut W,
) -> Result<Vec<(SolveMethod, Solution)>, AppError> {
    let mut maze = Maze::new(config.rows, config.cols, config.seed)?;
    maze.set_heuristic(config.heuristic);

    let seed = with_sink(config, out, |sink| Ok(maze.generate(sink)?))?;
    log::info!("Generated {}x{} maze", config.rows, config.cols);
    writeln!(out, "{}x{} maze, seed {}", config.rows, config.cols, seed)?;

    let mut results = Vec::with_capacity(config.methods.len());
    for &method in &config.methods {
        let solution = with_sink(config, out, |sink| Ok(maze.solve(method, sink)?))?;

        writeln!(out)?;
        writeln!(out, "{}", method.title())?;
        write!(out, "{}", render::render(maze.grid(), &solution.path))?;
        writeln!(out, "{}", render::summary(method.title(), &solution))?;

        results.push((method, solution));
    }

    Ok(results)
}
