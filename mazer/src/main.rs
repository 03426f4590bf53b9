use std::{io, path::PathBuf};

use clap::Parser;
use maze_core::{events::AnimationSpeed, solver::Heuristic};
use mazer::{
    app::{self, MethodSelection, RunConfig},
    logging,
    settings::Settings,
    AppError,
};

#[derive(Parser, Debug)]
#[clap(version, author, about, name = "mazer")]
struct Args {
    #[clap(short, long, help = "Number of rows")]
    rows: Option<i32>,
    #[clap(short, long, help = "Number of columns")]
    cols: Option<i32>,
    #[clap(long, help = "Seed for a reproducible maze")]
    seed: Option<u64>,
    #[clap(short, long, help = "Solver to run: dfs, bfs, astar or all")]
    method: Option<MethodSelection>,
    #[clap(long, help = "Event pacing: very-slow, slow, normal, fast, very-fast, instant")]
    speed: Option<AnimationSpeed>,
    #[clap(long, help = "A* target: legacy or manhattan")]
    heuristic: Option<Heuristic>,
    #[clap(short, long, action, help = "Print every generation and solver event")]
    events: bool,
    #[clap(long, help = "Use this settings file instead of the default one")]
    config: Option<PathBuf>,
    #[clap(long, action, help = "Show config path and quit")]
    show_config_path: bool,
    #[clap(long, action, help = "Reset config to default and quit")]
    reset_config: bool,
    #[clap(long, help = "Show config in debug format and quit")]
    debug_config: bool,
    #[clap(short, long, action = clap::ArgAction::Count, help = "Log more, repeat for even more")]
    verbose: u8,
}

impl Args {
    fn apply(&self, mut config: RunConfig) -> RunConfig {
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(selection) = self.method {
            config.methods = selection.methods();
        }
        if let Some(speed) = self.speed {
            config.speed = speed;
        }
        if let Some(heuristic) = self.heuristic {
            config.heuristic = heuristic;
        }
        config.print_events |= self.events;
        config
    }
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();
    let settings_path = args.config.clone().unwrap_or_else(Settings::default_path);

    if args.reset_config {
        Settings::reset_config(&settings_path)?;
        return Ok(());
    }

    if args.show_config_path {
        if let Some(s) = settings_path.to_str() {
            println!("{}", s);
        } else {
            println!("{:?}", settings_path);
        }
        return Ok(());
    }

    if args.debug_config {
        println!("{:#?}", Settings::load(&settings_path)?);
        return Ok(());
    }

    better_panic::install();

    let settings = Settings::load(&settings_path)?;
    logging::init(logging::raise_level(
        settings.get_log_level()?,
        args.verbose,
    ))?;
    log::debug!("Settings loaded from {:?}", settings_path);

    let config = args.apply(RunConfig::from_settings(&settings));
    app::run(&config, &mut io::stdout().lock())?;

    Ok(())
}
