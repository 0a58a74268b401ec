//! Error types for the simulation core and its collaborators.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by grid construction, grid writes and agent placement.
///
/// Sensing and movement never fail: the grid edge is reported through
/// [`Reading::OutOfBounds`](super::agent::Reading) and the agent's wall
/// contact flag instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// A grid was requested with a non-positive width or height.
    #[error("invalid grid dimensions {width}x{height}: both must be positive")]
    InvalidDimension { width: i32, height: i32 },

    /// A cell write targeted a coordinate outside the grid.
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },

    /// The agent was placed on a coordinate outside the grid.
    #[error("agent position ({x}, {y}) is outside the {width}x{height} grid")]
    InvalidPosition {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },

    /// The grid cannot be partitioned into the requested number of regions.
    #[error("a {width}x{height} grid cannot hold a {columns}x{rows} region partition")]
    GridTooSmall {
        width: i32,
        height: i32,
        columns: u32,
        rows: u32,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

/// Errors raised while persisting or re-reading the step log.
#[derive(Debug, Error)]
pub enum StepLogError {
    #[error("step log I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("step log CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Invalid(#[from] SimulationError),
}

/// Errors surfaced by the host session.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error(transparent)]
    StepLog(#[from] StepLogError),
}

pub type SimulationResult<T> = Result<T, SimulationError>;
