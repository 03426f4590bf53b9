use std::{
    io::{self, Write as _},
    str::FromStr,
    sync::{OnceLock, RwLock},
};

use log::{LevelFilter, Log, Metadata, Record};

use crate::error::AppError;

static LOGGER: OnceLock<AppLogger> = OnceLock::new();

pub fn get_logger() -> &'static AppLogger {
    LOGGER.get_or_init(|| AppLogger::new(LevelFilter::Warn))
}

/// Installs the logger with `level` as its minimum.
pub fn init(level: LevelFilter) -> Result<(), AppError> {
    let logger = get_logger();
    logger.set_min_level(level);
    log::set_logger(logger)?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}

/// Parses a level name from the settings file, `"warn"`, `"debug"`, ...
pub fn parse_level(name: &str) -> Result<LevelFilter, AppError> {
    LevelFilter::from_str(name).map_err(|_| AppError::LogLevel(name.to_string()))
}

/// Raises `base` by one level per `-v`, saturating at trace.
pub fn raise_level(base: LevelFilter, verbose: u8) -> LevelFilter {
    let mut level = base;
    for _ in 0..verbose {
        level = match level {
            LevelFilter::Off => LevelFilter::Error,
            LevelFilter::Error => LevelFilter::Warn,
            LevelFilter::Warn => LevelFilter::Info,
            LevelFilter::Info => LevelFilter::Debug,
            LevelFilter::Debug | LevelFilter::Trace => LevelFilter::Trace,
        };
    }
    level
}

/// Writes `LEVEL module -> message` lines to stderr.
pub struct AppLogger {
    min_level: RwLock<LevelFilter>,
}

impl AppLogger {
    fn new(min_level: LevelFilter) -> Self {
        Self {
            min_level: RwLock::new(min_level),
        }
    }

    pub fn min_level(&self) -> LevelFilter {
        match self.min_level.read() {
            Ok(level) => *level,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    pub fn set_min_level(&self, level: LevelFilter) {
        match self.min_level.write() {
            Ok(mut guard) => *guard = level,
            Err(poisoned) => *poisoned.into_inner() = level,
        }
    }

    pub fn format(record: &Record) -> String {
        format!(
            "{:<5} {} -> {}",
            record.level(),
            record.module_path().unwrap_or("unknown"),
            record.args()
        )
    }
}

impl Log for AppLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.min_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            // nowhere to report a failing stderr
            let _ = writeln!(io::stderr().lock(), "{}", Self::format(record));
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}
