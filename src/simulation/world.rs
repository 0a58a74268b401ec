//! Host session tying the grid, the agent and the step log together.
//!
//! The session is single-threaded: ticks and commands are applied one at a
//! time through `&mut self`, so no internal locking is needed.

use std::path::PathBuf;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::config::SimulationConfig;
use crate::simulation::agent::{Agent, Perception};
use crate::simulation::error::{StepLogError, WorldError};
use crate::simulation::generator::{Cluster, LineGenerator};
use crate::simulation::grid::Grid;
use crate::simulation::step_log::{default_export_path, StepLog, StepRecord};

/// Host-level requests, typically bound to keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Repaint the grid with fresh clusters.
    NewLines,
    /// Teleport the agent to a random cell.
    RandomizeAgent,
    /// Teleport the agent onto its own cell, restoring the initial heading.
    ResetAgent,
    ClearGrid,
    TogglePause,
    ClearLog,
    /// Export the step log; `None` picks a timestamped file name.
    ExportLog(Option<PathBuf>),
}

/// What a command changed, for status lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    LinesGenerated { clusters: usize, cells: usize },
    AgentMoved { x: i32, y: i32 },
    GridCleared,
    Paused(bool),
    LogCleared,
    Exported { path: PathBuf, rows: usize },
    NothingToExport,
}

/// A running line-following session.
pub struct World {
    config: SimulationConfig,
    grid: Grid,
    agent: Agent,
    generator: LineGenerator,
    rng: SmallRng,
    log: StepLog,
    paused: bool,
    clusters: Vec<Cluster>,
}

impl World {
    /// Builds the grid, paints the first set of lines and drops the agent on
    /// a random cell facing the configured initial heading.
    ///
    /// # Errors
    /// An invalid configuration, or a live log file that cannot be opened.
    pub fn new(config: SimulationConfig) -> Result<Self, WorldError> {
        config.validate()?;
        let mut rng = match config.rng_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::seed_from_u64(rand::random()),
        };

        let mut grid = Grid::new(config.grid_width, config.grid_height)?;
        let generator = LineGenerator::new(config.generator.clone());
        let clusters = generator.generate(&mut grid, &mut rng)?;

        let x = rng.random_range(0..grid.width());
        let y = rng.random_range(0..grid.height());
        let agent = Agent::new(x, y, config.initial_heading, grid.bounds())?;

        let mut log = StepLog::new();
        if let Some(path) = &config.log.file {
            log.start_file(path)?;
        }

        info!(
            width = grid.width(),
            height = grid.height(),
            clusters = clusters.len(),
            x,
            y,
            "world initialised"
        );

        Ok(Self {
            config,
            grid,
            agent,
            generator,
            rng,
            log,
            paused: false,
            clusters,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub const fn agent(&self) -> &Agent {
        &self.agent
    }

    #[must_use]
    pub const fn log(&self) -> &StepLog {
        &self.log
    }

    /// Clusters painted by the last generation (empty after a clear).
    #[must_use]
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Current perception without acting.
    #[must_use]
    pub fn perceive(&self) -> Perception {
        self.agent.sense(&self.grid)
    }

    /// Runs one sense, decide and act cycle and logs it.
    ///
    /// Returns `None` while paused.
    ///
    /// # Errors
    /// The live log file could not be written. The agent has still acted.
    pub fn tick(&mut self) -> Result<Option<StepRecord>, StepLogError> {
        if self.paused {
            return Ok(None);
        }
        let perception = self.agent.sense(&self.grid);
        let action = self.agent.decide_and_act(&perception);
        let record = self.log.record(&self.agent, &perception, action)?;
        Ok(Some(record.clone()))
    }

    /// Applies a host command.
    ///
    /// # Errors
    /// Generation rejected the grid, or the export could not be written.
    pub fn apply(&mut self, command: Command) -> Result<Outcome, WorldError> {
        let outcome = match command {
            Command::NewLines => {
                self.clusters = self.generator.generate(&mut self.grid, &mut self.rng)?;
                Outcome::LinesGenerated {
                    clusters: self.clusters.len(),
                    cells: self.grid.line_count(),
                }
            }
            Command::RandomizeAgent => {
                let x = self.rng.random_range(0..self.grid.width());
                let y = self.rng.random_range(0..self.grid.height());
                self.agent.teleport(x, y)?;
                Outcome::AgentMoved { x, y }
            }
            Command::ResetAgent => {
                let position = self.agent.position();
                self.agent.teleport(position.x, position.y)?;
                Outcome::AgentMoved {
                    x: position.x,
                    y: position.y,
                }
            }
            Command::ClearGrid => {
                self.grid.reset();
                self.clusters.clear();
                Outcome::GridCleared
            }
            Command::TogglePause => {
                self.paused = !self.paused;
                Outcome::Paused(self.paused)
            }
            Command::ClearLog => {
                self.log.clear();
                Outcome::LogCleared
            }
            Command::ExportLog(path) => {
                if self.log.is_empty() {
                    warn!("export requested with an empty step log");
                    Outcome::NothingToExport
                } else {
                    let path = path.unwrap_or_else(default_export_path);
                    let rows = self.log.export_csv(&path)?;
                    Outcome::Exported { path, rows }
                }
            }
        };
        info!(?outcome, "command applied");
        Ok(outcome)
    }

    /// Detaches the live log file, if any. Call before exiting.
    pub fn shutdown(&mut self) -> Option<PathBuf> {
        self.log.stop_file()
    }
}
