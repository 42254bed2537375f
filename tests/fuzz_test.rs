//! Fuzzes the pathfinding system by checking for many random grids that BFS
//! paths are valid and exactly as short as an independently computed
//! distance map says they should be, and that the obstacle-removal search
//! always hands the grid back untouched.
use grid_breach::{find_path, minimal_removal, Cell, Grid, Occupancy};
use rand::prelude::*;

fn random_grid(w: usize, h: usize, rng: &mut StdRng) -> Grid {
    let mut grid = Grid::new(w, h);
    for y in 0..h as i32 {
        for x in 0..w as i32 {
            if rng.gen_bool(0.4) {
                grid.set(Cell::new(x, y), Occupancy::Obstacle);
            }
        }
    }
    grid
}

fn snapshot(grid: &Grid) -> Vec<Occupancy> {
    (0..grid.height() as i32)
        .flat_map(|y| (0..grid.width() as i32).map(move |x| Cell::new(x, y)))
        .map(|c| grid.get(&c))
        .collect()
}

/// Reference shortest distances by fixed-point relaxation: repeatedly lower
/// each walkable cell's distance to one more than its cheapest walkable
/// neighbour until nothing changes. Slow but independent of the BFS code.
fn reference_distance(grid: &Grid, start: Cell, end: Cell) -> Option<usize> {
    const UNREACHED: usize = usize::MAX;
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    let ix = |c: &Cell| (c.y * w + c.x) as usize;
    let mut dist = vec![UNREACHED; (w * h) as usize];
    if !grid.is_walkable(&start) {
        return None;
    }
    dist[ix(&start)] = 0;
    let mut changed = true;
    while changed {
        changed = false;
        for y in 0..h {
            for x in 0..w {
                let cell = Cell::new(x, y);
                if !grid.is_walkable(&cell) {
                    continue;
                }
                for neighbor in grid.neighbors(&cell) {
                    let candidate = dist[ix(&neighbor)].saturating_add(1);
                    if candidate < dist[ix(&cell)] {
                        dist[ix(&cell)] = candidate;
                        changed = true;
                    }
                }
            }
        }
    }
    match dist.get(ix(&end)) {
        Some(&d) if d != UNREACHED && grid.is_walkable(&end) => Some(d),
        _ => None,
    }
}

fn assert_valid_path(grid: &Grid, path: &[Cell], start: Cell, end: Cell) {
    assert_eq!(*path.first().unwrap(), start);
    assert_eq!(*path.last().unwrap(), end);
    for pair in path.windows(2) {
        assert_eq!(pair[0].king_distance(&pair[1]), 1);
        assert!(grid.is_walkable(&pair[1]));
    }
}

#[test]
fn fuzz_bfs_matches_reference() {
    const N: usize = 8;
    const N_GRIDS: usize = 500;
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..N_GRIDS {
        let mut grid = random_grid(N, N, &mut rng);
        let start = Cell::new(0, 0);
        let end = Cell::new(N as i32 - 1, N as i32 - 1);
        grid.set(start, Occupancy::Walkable);
        grid.set(end, Occupancy::Walkable);

        let expected = reference_distance(&grid, start, end);
        match find_path(&grid, start, end) {
            Some(path) => {
                assert_valid_path(&grid, &path, start, end);
                assert_eq!(Some(path.len() - 1), expected, "\n{grid}");
            }
            None => assert_eq!(expected, None, "\n{grid}"),
        }
    }
}

#[test]
fn fuzz_removal_restores_grid() {
    const N: usize = 6;
    const N_GRIDS: usize = 100;
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..N_GRIDS {
        let mut grid = random_grid(N, N, &mut rng);
        let start = Cell::new(0, 0);
        let end = Cell::new(N as i32 - 1, N as i32 - 1);
        grid.set(start, Occupancy::Walkable);
        grid.set(end, Occupancy::Walkable);
        // Keep the combinatorics small: at most 8 candidates.
        let candidates: Vec<Cell> = grid.obstacles().take(8).collect();

        let before = snapshot(&grid);
        let result = minimal_removal(&mut grid, start, end, &candidates);
        assert_eq!(snapshot(&grid), before, "\n{grid}");

        if let Some(removal) = result {
            assert!(!removal.cells.is_empty());
            // The reported path must really open up under that removal.
            for cell in &removal.cells {
                grid.set(*cell, Occupancy::Walkable);
            }
            assert_valid_path(&grid, &removal.path, start, end);
        }
    }
}

#[test]
fn fuzz_removal_never_larger_than_one_when_one_suffices() {
    const N: usize = 6;
    const N_GRIDS: usize = 200;
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..N_GRIDS {
        let mut grid = random_grid(N, N, &mut rng);
        let start = Cell::new(0, 0);
        let end = Cell::new(N as i32 - 1, N as i32 - 1);
        grid.set(start, Occupancy::Walkable);
        grid.set(end, Occupancy::Walkable);
        if find_path(&grid, start, end).is_some() {
            continue;
        }
        let candidates: Vec<Cell> = grid.obstacles().take(8).collect();

        // Does any single candidate removal open a path?
        let mut single_works = false;
        for candidate in &candidates {
            grid.set(*candidate, Occupancy::Walkable);
            single_works |= find_path(&grid, start, end).is_some();
            grid.set(*candidate, Occupancy::Obstacle);
        }

        if single_works {
            let removal = minimal_removal(&mut grid, start, end, &candidates).unwrap();
            assert_eq!(removal.cells.len(), 1, "\n{grid}");
        }
    }
}
