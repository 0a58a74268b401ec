use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::simulation::error::{ConfigError, SimulationError};
use crate::simulation::heading::Heading;
use crate::simulation::params::{
    GRID_HEIGHT, GRID_WIDTH, REGION_COLUMNS, REGION_ROWS, SEED_WINDOW, TABLE_ROWS, TICK_MILLIS,
    WALK_MAX_STEPS, WALK_MIN_STEPS,
};

/// Top-level configuration passed to [`World::new`](crate::simulation::world::World::new).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub grid_width: i32,
    pub grid_height: i32,
    /// Milliseconds between ticks in the terminal front-end.
    pub tick_millis: u64,
    /// Heading the agent takes on creation and on every teleport.
    pub initial_heading: Heading,
    /// Optional RNG seed for reproducible grids and placements.
    pub rng_seed: Option<u64>,
    pub generator: GeneratorConfig,
    pub log: LogConfig,
}

/// Line generator parameters. The partition policy is fixed; only sizes vary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub columns: u32,
    pub rows: u32,
    /// Side of the square near each region origin where a seed may land.
    pub seed_window: u32,
    pub min_steps: u32,
    pub max_steps: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Live CSV append file; `None` keeps the log in memory only.
    pub file: Option<PathBuf>,
    /// Rows shown in the steps table.
    pub table_rows: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            tick_millis: TICK_MILLIS,
            initial_heading: Heading::Up,
            rng_seed: None,
            generator: GeneratorConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            columns: REGION_COLUMNS,
            rows: REGION_ROWS,
            seed_window: SEED_WINDOW,
            min_steps: WALK_MIN_STEPS,
            max_steps: WALK_MAX_STEPS,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: None,
            table_rows: TABLE_ROWS,
        }
    }
}

impl GeneratorConfig {
    /// Number of clusters one generation paints.
    #[must_use]
    pub const fn cluster_count(&self) -> u32 {
        self.columns * self.rows
    }

    /// # Errors
    /// [`SimulationError::InvalidConfig`] on an empty partition, an empty seed
    /// window or an inverted step range.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(SimulationError::InvalidConfig(
                "generator columns and rows must be positive",
            ));
        }
        if self.seed_window == 0 {
            return Err(SimulationError::InvalidConfig(
                "generator seed_window must be positive",
            ));
        }
        if self.min_steps > self.max_steps {
            return Err(SimulationError::InvalidConfig(
                "generator min_steps must not exceed max_steps",
            ));
        }
        Ok(())
    }
}

impl SimulationConfig {
    /// Loads a TOML file; missing keys fall back to defaults.
    ///
    /// # Errors
    /// I/O and parse failures, and any value rejected by [`Self::validate`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SimulationConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// [`SimulationError::InvalidDimension`] for non-positive grid sizes,
    /// [`SimulationError::GridTooSmall`] when the grid cannot hold the region
    /// partition, and [`SimulationError::InvalidConfig`] for other bad values.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.grid_width <= 0 || self.grid_height <= 0 {
            return Err(SimulationError::InvalidDimension {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        self.generator.validate()?;
        if i64::from(self.grid_width) < i64::from(self.generator.columns)
            || i64::from(self.grid_height) < i64::from(self.generator.rows)
        {
            return Err(SimulationError::GridTooSmall {
                width: self.grid_width,
                height: self.grid_height,
                columns: self.generator.columns,
                rows: self.generator.rows,
            });
        }
        if self.tick_millis == 0 {
            return Err(SimulationError::InvalidConfig("tick_millis must be positive"));
        }
        Ok(())
    }
}
