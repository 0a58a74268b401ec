//! Procedural line painting.
//!
//! The grid is tiled into a fixed number of rectangular regions and each
//! region receives one meandering random-walk cluster. Clusters never leave
//! their region, so trails stay visually distinct.

use std::collections::BTreeSet;

use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::debug;

use crate::config::GeneratorConfig;
use crate::simulation::error::{SimulationError, SimulationResult};
use crate::simulation::grid::{Bounds, Cell, Grid, Position};

/// Axis-aligned unit moves available to the walk.
const MOVES: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// The exclusive territory of one cluster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x0: i32,
    pub y0: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    #[must_use]
    pub const fn contains(&self, position: Position) -> bool {
        position.x >= self.x0
            && position.x < self.x0 + self.width
            && position.y >= self.y0
            && position.y < self.y0 + self.height
    }
}

/// One painted trail: the region it owns and the cells it marked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cluster {
    pub region: Region,
    pub cells: BTreeSet<Position>,
}

/// Splits `bounds` into `columns x rows` regions in row-major order.
///
/// Regions are `width / columns` by `height / rows`; the last column and row
/// absorb the remainder so the tiling covers the whole grid.
///
/// # Errors
/// [`SimulationError::GridTooSmall`] if any region would be empty.
pub fn partition(bounds: Bounds, columns: u32, rows: u32) -> SimulationResult<Vec<Region>> {
    let too_small = SimulationError::GridTooSmall {
        width: bounds.width,
        height: bounds.height,
        columns,
        rows,
    };
    let (Ok(cols), Ok(rows_i)) = (i32::try_from(columns), i32::try_from(rows)) else {
        return Err(too_small);
    };
    if cols == 0 || rows_i == 0 || bounds.width < cols || bounds.height < rows_i {
        return Err(too_small);
    }

    let area_width = bounds.width / cols;
    let area_height = bounds.height / rows_i;

    let mut regions = Vec::with_capacity((columns * rows) as usize);
    for row in 0..rows_i {
        for col in 0..cols {
            let x0 = col * area_width;
            let y0 = row * area_height;
            let width = if col == cols - 1 {
                bounds.width - x0
            } else {
                area_width
            };
            let height = if row == rows_i - 1 {
                bounds.height - y0
            } else {
                area_height
            };
            regions.push(Region {
                x0,
                y0,
                width,
                height,
            });
        }
    }
    Ok(regions)
}

/// Paints disjoint random-walk clusters onto a [`Grid`].
#[derive(Debug, Clone, Default)]
pub struct LineGenerator {
    config: GeneratorConfig,
}

impl LineGenerator {
    #[must_use]
    pub const fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Clears `grid` and paints one cluster per region.
    ///
    /// Returns the clusters in region order. The grid is not touched when the
    /// partition is rejected.
    ///
    /// # Errors
    /// [`SimulationError::GridTooSmall`] if the grid cannot be partitioned,
    /// [`SimulationError::InvalidConfig`] for a bad generator configuration.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        grid: &mut Grid,
        rng: &mut R,
    ) -> SimulationResult<Vec<Cluster>> {
        self.config.validate()?;
        let regions = partition(grid.bounds(), self.config.columns, self.config.rows)?;

        grid.reset();
        let mut clusters = Vec::with_capacity(regions.len());
        for (index, region) in regions.into_iter().enumerate() {
            let cells = self.walk(grid, region, rng)?;
            debug!(
                cluster = index,
                x0 = region.x0,
                y0 = region.y0,
                cells = cells.len(),
                "painted line cluster"
            );
            clusters.push(Cluster { region, cells });
        }
        Ok(clusters)
    }

    /// Random walk confined to `region`; returns the set of marked cells.
    fn walk<R: Rng + ?Sized>(
        &self,
        grid: &mut Grid,
        region: Region,
        rng: &mut R,
    ) -> SimulationResult<BTreeSet<Position>> {
        let window = i32::try_from(self.config.seed_window).unwrap_or(i32::MAX);
        let mut current = Position::new(
            region.x0 + rng.random_range(0..region.width.min(window)),
            region.y0 + rng.random_range(0..region.height.min(window)),
        );

        let mut cells = BTreeSet::new();
        grid.set(current.x, current.y, Cell::Line)?;
        cells.insert(current);

        let admits = |p: Position| grid.in_bounds(p.x, p.y) && region.contains(p);
        let steps = rng.random_range(self.config.min_steps..=self.config.max_steps);
        let mut trail = Vec::with_capacity(steps as usize);

        for _ in 0..steps {
            let target = current.offset(MOVES[rng.random_range(0..MOVES.len())]);
            let next = if admits(target) {
                target
            } else {
                let valid: Vec<Position> = MOVES
                    .iter()
                    .map(|&m| current.offset(m))
                    .filter(|&p| admits(p))
                    .collect();
                match valid.choose(rng) {
                    Some(&p) => p,
                    // Only a 1x1 region has nowhere to go.
                    None => break,
                }
            };
            current = next;
            trail.push(current);
        }

        for p in trail {
            grid.set(p.x, p.y, Cell::Line)?;
            cells.insert(p);
        }
        Ok(cells)
    }
}
