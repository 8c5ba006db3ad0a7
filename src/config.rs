use crate::error::GridError;
use crate::grid::{Grid, Position};
use crate::pathfinding::Algorithm;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no configuration file at {0}")]
    Missing(PathBuf),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_rows")]
    pub rows: i32,
    #[serde(default = "default_cols")]
    pub cols: i32,
    #[serde(default = "default_start_row")]
    pub start_row: i32,
    #[serde(default = "default_start_col")]
    pub start_col: i32,
    #[serde(default = "default_finish_row")]
    pub finish_row: i32,
    #[serde(default = "default_finish_col")]
    pub finish_col: i32,
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchConfig {
    /// Algorithm used by the generic "visualize" key
    #[serde(default)]
    pub algorithm: Algorithm,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnimationConfig {
    /// Delay between two visited cells appearing
    #[serde(default = "default_visited_step_ms")]
    pub visited_step_ms: u64,
    /// Delay between two route cells appearing
    #[serde(default = "default_path_step_ms")]
    pub path_step_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_bg_r")]
    pub background_r: u8,
    #[serde(default = "default_bg_g")]
    pub background_g: u8,
    #[serde(default = "default_bg_b")]
    pub background_b: u8,
    #[serde(default = "default_show_info")]
    pub show_info: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default tracing filter, overridden by RUST_LOG
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_enable_action_log")]
    pub enable_action_log: bool,
    #[serde(default = "default_action_log_path")]
    pub action_log_path: String,
}

// Default values
fn default_rows() -> i32 { 20 }
fn default_cols() -> i32 { 50 }
fn default_start_row() -> i32 { 10 }
fn default_start_col() -> i32 { 15 }
fn default_finish_row() -> i32 { 10 }
fn default_finish_col() -> i32 { 35 }
fn default_cell_size() -> f32 { 25.0 }
fn default_visited_step_ms() -> u64 { 10 }
fn default_path_step_ms() -> u64 { 50 }
fn default_window_title() -> String { "Pathfinding Visualizer".to_string() }
fn default_bg_r() -> u8 { 30 }
fn default_bg_g() -> u8 { 30 }
fn default_bg_b() -> u8 { 30 }
fn default_show_info() -> bool { true }
fn default_log_level() -> String { "info".to_string() }
fn default_enable_action_log() -> bool { false }
fn default_action_log_path() -> String { "action_log.json".to_string() }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
            start_row: default_start_row(),
            start_col: default_start_col(),
            finish_row: default_finish_row(),
            finish_col: default_finish_col(),
            cell_size: default_cell_size(),
        }
    }
}

impl GridConfig {
    pub fn start(&self) -> Position {
        Position::new(self.start_row, self.start_col)
    }

    pub fn finish(&self) -> Position {
        Position::new(self.finish_row, self.finish_col)
    }

    /// Build the wall-free startup grid
    pub fn build(&self) -> Result<Grid, GridError> {
        Grid::new(self.rows, self.cols, self.start(), self.finish())
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            visited_step_ms: default_visited_step_ms(),
            path_step_ms: default_path_step_ms(),
        }
    }
}

impl AnimationConfig {
    pub fn visited_step(&self) -> Duration {
        Duration::from_millis(self.visited_step_ms)
    }

    pub fn path_step(&self) -> Duration {
        Duration::from_millis(self.path_step_ms)
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            background_r: default_bg_r(),
            background_g: default_bg_g(),
            background_b: default_bg_b(),
            show_info: default_show_info(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            enable_action_log: default_enable_action_log(),
            action_log_path: default_action_log_path(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// Callers usually fall back to [`Config::default`] on error; a missing
    /// file is reported as [`ConfigError::Missing`] so it can be logged
    /// differently from a broken one.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ConfigError::Missing(path.to_path_buf())
            } else {
                ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        Self::from_toml(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}
