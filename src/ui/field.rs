use crate::simulation::agent::Agent;
use crate::simulation::grid::{Cell, Grid};
use rayon::prelude::*;

pub const LINE_CHAR: char = '#';
pub const EMPTY_CHAR: char = '.';

/// Rasterises the grid into one string per row with the agent drawn on top.
#[must_use]
pub fn compute_field_grid(grid: &Grid, agent: &Agent) -> Vec<String> {
    let position = agent.position();
    let marker = agent.heading().ascii();

    // Use rayon to compute rows in parallel
    (0..grid.height())
        .into_par_iter()
        .map(|y| {
            let Some(row) = grid.row(y) else {
                return String::new();
            };
            row.iter()
                .enumerate()
                .map(|(x, cell)| {
                    if position.y == y && position.x == x as i32 {
                        marker
                    } else if *cell == Cell::Line {
                        LINE_CHAR
                    } else {
                        EMPTY_CHAR
                    }
                })
                .collect()
        })
        .collect()
}
