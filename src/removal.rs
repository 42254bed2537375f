//! Brute-force search for the smallest set of obstacles whose removal opens
//! a path. Subset sizes are tried in increasing order and every subset of
//! the first successful size is evaluated, so the returned removal is
//! minimal in cardinality and, within that cardinality, shortest in
//! resulting path length. Cost is C(n, k) breadth-first searches per level;
//! only small grids and candidate lists are reasonable inputs.
use itertools::Itertools;
use log::info;

use crate::bfs::find_path;
use crate::grid::{Cell, Grid, RemovalPatch};

/// A successful obstacle removal: the cells to convert to walkable and the
/// path that conversion opens. `cells` is an unordered set; two removals
/// with the same cells but different order are the same removal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Removal {
    pub cells: Vec<Cell>,
    pub path: Vec<Cell>,
}

/// Evaluates every `k`-subset of `candidates` and returns the one whose
/// temporary removal yields the shortest path from `start` to `end`, or
/// [None] if no subset of this size opens a path.
///
/// Requesting `k` larger than the candidate count returns [None] without
/// searching. Candidates that are already walkable are tolerated: they are
/// not toggled and not restored, and the subset is still evaluated. Ties in
/// path length keep the first subset seen in combination order. The grid is
/// restored to its exact pre-call occupancy on every path out.
pub fn best_removal_of_size(
    grid: &mut Grid,
    start: Cell,
    end: Cell,
    candidates: &[Cell],
    k: usize,
) -> Option<Removal> {
    if k > candidates.len() {
        return None;
    }
    let mut best: Option<Removal> = None;
    for combination in candidates.iter().copied().combinations(k) {
        let path = {
            let patch = RemovalPatch::remove(grid, combination.iter().copied());
            find_path(patch.grid(), start, end)
            // patch drops here, restoring the toggled cells before the next
            // combination is tried
        };
        if let Some(path) = path {
            let improved = match &best {
                Some(removal) => path.len() < removal.path.len(),
                None => true,
            };
            if improved {
                best = Some(Removal {
                    cells: combination,
                    path,
                });
            }
        }
    }
    best
}

/// Finds the smallest `k >= 1` such that some `k`-subset of `candidates`
/// opens a path from `start` to `end`, and returns the best removal at that
/// size. Returns [None] when even removing every candidate leaves `end`
/// unreachable.
pub fn minimal_removal(
    grid: &mut Grid,
    start: Cell,
    end: Cell,
    candidates: &[Cell],
) -> Option<Removal> {
    for k in 1..=candidates.len() {
        info!("Searching removal sets of size {k}");
        if let Some(removal) = best_removal_of_size(grid, start, end, candidates, k) {
            return Some(removal);
        }
    }
    None
}
