//! Layered breadth-first search over a [Grid]. Keeps the visited set and the
//! predecessor record in a single insertion-ordered map so path
//! reconstruction can walk parent indices without touching the cells
//! themselves.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;

use crate::grid::{Cell, Grid};
use std::hash::Hash;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Walks parent indices back from `start` (the index where the goal was
/// recorded) and reverses the visit order into a front-to-back path.
fn reverse_path<N, V, F>(parents: &FxIndexMap<N, V>, mut parent: F, start: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
    F: FnMut(&V) -> usize,
{
    let mut path: Vec<N> = itertools::unfold(start, |i| {
        parents.get_index(*i).map(|(node, value)| {
            *i = parent(value);
            node.clone()
        })
    })
    .collect();
    path.reverse();
    path
}

/// Computes a shortest path from `start` to `end` under unit-cost
/// 8-directional movement, or [None] if the frontier exhausts without
/// reaching `end`.
///
/// The search expands one BFS layer at a time and exits early the moment
/// `end` is first discovered, so the returned path's edge count equals the
/// layer depth of that discovery. When several shortest paths exist the one
/// returned depends on frontier and neighbour enumeration order: the path
/// *length* is deterministic for identical inputs, the path *choice* is an
/// artifact of [DIRECTIONS](crate::grid::DIRECTIONS) ordering.
pub fn find_path(grid: &Grid, start: Cell, end: Cell) -> Option<Vec<Cell>> {
    if start == end {
        return Some(vec![start]);
    }
    // Map membership doubles as the visited set; the value is the index of
    // the predecessor within the map, with usize::MAX marking the start.
    let mut parents: FxIndexMap<Cell, usize> = FxIndexMap::default();
    parents.insert(start, usize::MAX);

    let mut frontier: Vec<usize> = vec![0];
    while !frontier.is_empty() {
        let mut next_frontier: Vec<usize> = Vec::new();
        for &index in &frontier {
            let (&cell, _) = parents.get_index(index).unwrap();
            for neighbor in grid.neighbors(&cell) {
                let neighbor_index = match parents.entry(neighbor) {
                    Occupied(_) => continue,
                    Vacant(e) => {
                        let n = e.index();
                        e.insert(index);
                        n
                    }
                };
                if neighbor == end {
                    return Some(reverse_path(&parents, |&p| p, neighbor_index));
                }
                next_frontier.push(neighbor_index);
            }
        }
        frontier = next_frontier;
    }
    None
}
