use std::{
    fs,
    path::{Path, PathBuf},
};

use log::LevelFilter;
use maze_core::{
    events::AnimationSpeed,
    solver::{Heuristic, SolveMethod},
};
use ron::{self, extensions::Extensions};
use serde::{Deserialize, Serialize};

use crate::{constants::base_path, error::AppError, logging};

const DEFAULT_SETTINGS: &str = include_str!("./default_settings.ron");

pub const DEFAULT_ROWS: i32 = 10;
pub const DEFAULT_COLS: i32 = 10;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub rows: Option<i32>,
    #[serde(default)]
    pub cols: Option<i32>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub method: Option<SolveMethod>,
    #[serde(default)]
    pub speed: Option<AnimationSpeed>,
    #[serde(default)]
    pub heuristic: Option<Heuristic>,
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_path() -> PathBuf {
        base_path().join("settings.ron")
    }

    pub fn set_rows(mut self, value: i32) -> Self {
        self.rows = Some(value);
        self
    }

    pub fn get_rows(&self) -> i32 {
        self.rows.unwrap_or(DEFAULT_ROWS)
    }

    pub fn set_cols(mut self, value: i32) -> Self {
        self.cols = Some(value);
        self
    }

    pub fn get_cols(&self) -> i32 {
        self.cols.unwrap_or(DEFAULT_COLS)
    }

    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn set_method(mut self, value: SolveMethod) -> Self {
        self.method = Some(value);
        self
    }

    pub fn get_method(&self) -> SolveMethod {
        self.method.unwrap_or_default()
    }

    pub fn get_speed(&self) -> AnimationSpeed {
        self.speed.unwrap_or_default()
    }

    pub fn get_heuristic(&self) -> Heuristic {
        self.heuristic.unwrap_or_default()
    }

    pub fn get_log_level(&self) -> Result<LevelFilter, AppError> {
        match &self.log_level {
            Some(name) => logging::parse_level(name),
            None => Ok(LevelFilter::Warn),
        }
    }

    fn options() -> ron::Options {
        ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME)
    }

    pub fn parse(source: &str, path: &Path) -> Result<Self, AppError> {
        Self::options()
            .from_str(source)
            .map_err(|source| AppError::SettingsParse {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Reads settings from `path`, writing the bundled defaults there first
    /// when the file does not exist yet.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            log::info!("No settings at {:?}, writing defaults", path);
            Self::reset_config(path)?;
            return Self::parse(DEFAULT_SETTINGS, path);
        }

        let source = fs::read_to_string(path).map_err(|source| AppError::SettingsIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&source, path)
    }

    pub fn reset_config(path: &Path) -> Result<(), AppError> {
        let io_err = |source: std::io::Error| AppError::SettingsIo {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, DEFAULT_SETTINGS).map_err(io_err)
    }
}
