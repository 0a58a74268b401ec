//! Per-tick history of what the agent saw and did.
//!
//! Records are kept in memory for the dashboard and can be mirrored live to
//! an append-only CSV file, exported in one go, and read back.

use std::fmt::Write as _;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::simulation::agent::{Action, Agent, Perception, Reading};
use crate::simulation::error::StepLogError;
use crate::simulation::grid::Position;
use crate::simulation::heading::Heading;
use crate::simulation::params::EXPORT_PREFIX;

/// One logged tick: the perception that drove the decision, the decision,
/// and the agent's state after acting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    pub tick: u64,
    pub own: Reading,
    pub left: Reading,
    pub center: Reading,
    pub right: Reading,
    pub action: Action,
    pub x: i32,
    pub y: i32,
    pub heading: Heading,
    pub wall_contact: bool,
    pub timestamp: String,
}

impl StepRecord {
    #[must_use]
    pub fn capture(tick: u64, agent: &Agent, perception: &Perception, action: Action) -> Self {
        let position = agent.position();
        Self {
            tick,
            own: perception.own,
            left: perception.left,
            center: perception.center,
            right: perception.right,
            action,
            x: position.x,
            y: position.y,
            heading: agent.heading(),
            wall_contact: agent.wall_contact(),
            timestamp: Local::now().format("%H:%M:%S%.3f").to_string(),
        }
    }

    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

struct LiveFile {
    path: PathBuf,
    writer: csv::Writer<File>,
}

/// In-memory step history with an optional live CSV mirror.
#[derive(Default)]
pub struct StepLog {
    records: Vec<StepRecord>,
    last_tick: u64,
    live: Option<LiveFile>,
}

impl StepLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record for the tick that just ran.
    ///
    /// Ticks are numbered from 1 and restart after [`StepLog::clear`]. When a
    /// live file is attached the row is written and flushed immediately.
    ///
    /// # Errors
    /// Writing to the live file failed. The record is kept in memory anyway.
    pub fn record(
        &mut self,
        agent: &Agent,
        perception: &Perception,
        action: Action,
    ) -> Result<&StepRecord, StepLogError> {
        self.last_tick += 1;
        self.records
            .push(StepRecord::capture(self.last_tick, agent, perception, action));
        let index = self.records.len() - 1;

        if let Some(live) = self.live.as_mut() {
            live.writer.serialize(&self.records[index])?;
            live.writer.flush().map_err(|source| StepLogError::Io {
                path: live.path.clone(),
                source,
            })?;
        }
        Ok(&self.records[index])
    }

    /// Mirrors every subsequent record to `path`, appending to existing
    /// content. The header row is written only into an empty file.
    ///
    /// # Errors
    /// The file could not be opened.
    pub fn start_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), StepLogError> {
        let path = path.as_ref().to_path_buf();
        let io_err = |source: std::io::Error| StepLogError::Io {
            path: path.clone(),
            source,
        };
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(io_err)?;
        let is_new = file.metadata().map_err(io_err)?.len() == 0;

        let writer = csv::WriterBuilder::new()
            .has_headers(is_new)
            .from_writer(file);
        info!(path = %path.display(), "step log file attached");
        self.live = Some(LiveFile { path, writer });
        Ok(())
    }

    /// Detaches the live file, returning its path.
    pub fn stop_file(&mut self) -> Option<PathBuf> {
        let mut live = self.live.take()?;
        let _ = live.writer.flush();
        info!(path = %live.path.display(), "step log file detached");
        Some(live.path)
    }

    #[must_use]
    pub fn live_path(&self) -> Option<&Path> {
        self.live.as_ref().map(|l| l.path.as_path())
    }

    #[must_use]
    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The last `n` records, oldest first.
    #[must_use]
    pub fn recent(&self, n: usize) -> &[StepRecord] {
        &self.records[self.records.len().saturating_sub(n)..]
    }

    /// Drops the in-memory history and restarts tick numbering.
    /// The live file, if any, stays attached.
    pub fn clear(&mut self) {
        self.records.clear();
        self.last_tick = 0;
    }

    /// Writes the whole history to `path` with a header row.
    ///
    /// Returns the number of rows written. An empty log writes nothing.
    ///
    /// # Errors
    /// File creation or serialization failed.
    pub fn export_csv<P: AsRef<Path>>(&self, path: P) -> Result<usize, StepLogError> {
        if self.records.is_empty() {
            return Ok(0);
        }
        let path = path.as_ref();
        let mut writer = csv::Writer::from_path(path)?;
        for record in &self.records {
            writer.serialize(record)?;
        }
        writer.flush().map_err(|source| StepLogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), rows = self.records.len(), "step log exported");
        Ok(self.records.len())
    }

    /// Reads a file produced by [`StepLog::export_csv`] or a live mirror.
    ///
    /// # Errors
    /// The file is missing or a row does not parse.
    pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Vec<StepRecord>, StepLogError> {
        let mut reader = csv::Reader::from_path(path)?;
        reader
            .deserialize()
            .collect::<Result<Vec<StepRecord>, _>>()
            .map_err(StepLogError::from)
    }

    /// Fixed-width text table of the last `max` records (all if `None`).
    #[must_use]
    pub fn format_table(&self, max: Option<usize>) -> String {
        if self.records.is_empty() {
            return String::from("No steps recorded\n");
        }
        let rows = max.map_or(&self.records[..], |n| self.recent(n));
        let rule = "=".repeat(78);

        let mut out = String::new();
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(
            out,
            "{:<6} {:<5} {:<5} {:<6} {:<5} {:<13} {:<9} {:<7} {:<7}",
            "Tick", "Own", "Left", "Center", "Right", "Action", "Pos", "Heading", "Contact"
        );
        let _ = writeln!(out, "{}", "-".repeat(78));
        for r in rows {
            let _ = writeln!(
                out,
                "{:<6} {:<5} {:<5} {:<6} {:<5} {:<13} {:<9} {:<7} {:<7}",
                r.tick,
                r.own.label(),
                r.left.label(),
                r.center.label(),
                r.right.label(),
                r.action.label(),
                format!("({},{})", r.x, r.y),
                r.heading.symbol(),
                if r.wall_contact { "yes" } else { "no" },
            );
        }
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "Total steps: {}", self.records.len());
        out
    }
}

/// Timestamped default name for an export.
#[must_use]
pub fn default_export_path() -> PathBuf {
    PathBuf::from(format!(
        "{EXPORT_PREFIX}_{}.csv",
        Local::now().format("%Y%m%d_%H%M%S")
    ))
}
