use std::{io, path::PathBuf};

use maze_core::MazeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Maze(#[from] MazeError),
    #[error("Cannot access settings file {path:?}: {source}")]
    SettingsIo { path: PathBuf, source: io::Error },
    #[error("Error reading settings file {path:?}: {source}")]
    SettingsParse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("Invalid log level '{0}'")]
    LogLevel(String),
    #[error("Logger already installed")]
    Logger(#[from] log::SetLoggerError),
    #[error("Output failed: {0}")]
    Output(#[from] io::Error),
}
