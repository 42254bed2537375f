//! # grid_breach
//!
//! A grid-based pathfinding system. Implements layered
//! [breadth-first search](https://en.wikipedia.org/wiki/Breadth-first_search)
//! for shortest paths under unit-cost 8-directional movement, and a
//! brute-force search for the smallest set of obstacles whose removal makes
//! a blocked route feasible. Pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! to answer reachability queries without flood-filling.
//!
//! Obstacle removal is intentionally exponential (every k-subset of the
//! candidate list is tried at increasing k); it is meant for small grids of
//! the order of 10x10 with a few dozen candidates.
pub mod bfs;
pub mod grid;
pub mod removal;

use log::info;

pub use crate::bfs::find_path;
pub use crate::grid::{Cell, Grid, Occupancy};
pub use crate::removal::{best_removal_of_size, minimal_removal, Removal};

/// Outcome of [route]: how the end cell can be reached, if at all.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteOutcome {
    /// A path exists on the grid as-is.
    Direct(Vec<Cell>),
    /// No direct path, but removing `removed` opens `path`.
    Breached { removed: Vec<Cell>, path: Vec<Cell> },
    /// No path even after removing every candidate.
    Infeasible,
}

/// Routes from `start` to `end`, falling back to
/// [minimal_removal] when no direct path exists. The grid is
/// left exactly as it was handed in; applying a
/// [Breached](RouteOutcome::Breached) removal is the caller's decision.
pub fn route(grid: &mut Grid, start: Cell, end: Cell, candidates: &[Cell]) -> RouteOutcome {
    grid.update();
    if grid.reachable(&start, &end) {
        if let Some(path) = find_path(grid, start, end) {
            return RouteOutcome::Direct(path);
        }
    }
    info!(
        "No direct path from {start} to {end}, searching removals among {} candidates",
        candidates.len()
    );
    match minimal_removal(grid, start, end, candidates) {
        Some(removal) => RouteOutcome::Breached {
            removed: removal.cells,
            path: removal.path,
        },
        None => RouteOutcome::Infeasible,
    }
}
