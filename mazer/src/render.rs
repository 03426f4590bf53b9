use std::io::{self, Write};

use hashbrown::HashSet;
use maze_core::{
    dims::Pos,
    events::{EventSink, MazeEvent},
    grid::{Direction, Grid},
    solver::Solution,
};

const PATH: &str = "**";
const VISITED: &str = " .";
const EMPTY: &str = "  ";

/// Draws `grid` as text, `+--+` for walls, with `path` overlaid.
///
/// Cells a solver visited but that are not on the path are dotted.
pub fn render(grid: &Grid, path: &[Pos]) -> String {
    let on_path: HashSet<Pos> = path.iter().copied().collect();
    let (rows, cols) = (grid.rows() as i32, grid.cols() as i32);
    let mut out = String::with_capacity((rows as usize * 2 + 1) * (cols as usize * 3 + 2));

    for r in 0..rows {
        for c in 0..cols {
            let cell = &grid.cells()[Pos(r, c)];
            out.push('+');
            out.push_str(if cell.has_top_wall() { "--" } else { "  " });
        }
        out.push_str("+\n");

        for c in 0..cols {
            let pos = Pos(r, c);
            let cell = &grid.cells()[pos];
            out.push(if cell.has_left_wall() { '|' } else { ' ' });
            out.push_str(if on_path.contains(&pos) {
                PATH
            } else if cell.is_visited() {
                VISITED
            } else {
                EMPTY
            });
        }
        let last = &grid.cells()[Pos(r, cols - 1)];
        out.push(if last.has_right_wall() { '|' } else { ' ' });
        out.push('\n');
    }

    for c in 0..cols {
        let cell = &grid.cells()[Pos(rows - 1, c)];
        out.push('+');
        out.push_str(if cell.has_bottom_wall() { "--" } else { "  " });
    }
    out.push_str("+\n");

    out
}

pub fn summary(title: &str, solution: &Solution) -> String {
    if solution.reached {
        format!(
            "{title}: exit reached in {} steps, {} cells visited",
            solution.len(),
            solution.visited
        )
    } else {
        format!(
            "{title}: exit not reachable, {} cells visited",
            solution.visited
        )
    }
}

pub fn describe(event: &MazeEvent) -> String {
    fn dir(d: Direction) -> &'static str {
        match d {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    match *event {
        MazeEvent::CellFinalized { pos, walls } => {
            format!("finalize {pos} ({} walls)", walls.count())
        }
        MazeEvent::WallBroken {
            from,
            to,
            direction,
        } => format!("break {from} -> {to} {}", dir(direction)),
        MazeEvent::BoundaryOpened { pos, direction } => {
            format!("open {pos} {}", dir(direction))
        }
        MazeEvent::CellVisited { pos } => format!("visit {pos}"),
        MazeEvent::Move {
            from,
            to,
            backtrack: false,
        } => format!("move {from} -> {to}"),
        MazeEvent::Move {
            from,
            to,
            backtrack: true,
        } => format!("back {from} -> {to}"),
    }
}

/// Sink printing one line per event.
///
/// Emitting cannot fail, so the first write error is kept and handed out by
/// [`EventPrinter::finish`]. Nothing more is written after it.
pub struct EventPrinter<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> EventPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    pub fn finish(mut self) -> io::Result<W> {
        match self.error.take() {
            Some(err) => Err(err),
            None => {
                self.out.flush()?;
                Ok(self.out)
            }
        }
    }
}

impl<W: Write> EventSink for EventPrinter<W> {
    fn emit(&mut self, event: MazeEvent) {
        if self.error.is_some() {
            return;
        }

        if let Err(err) = writeln!(self.out, "{}", describe(&event)) {
            self.error = Some(err);
        }
    }
}
