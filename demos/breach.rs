use grid_breach::{route, Cell, Grid, Occupancy, RouteOutcome};
use rand::{rngs::StdRng, Rng, SeedableRng};

// Walls the goal corner in with a fixed cluster of obstacles, scatters some
// more at random, then routes from (0, 0) to (9, 9). With the corner sealed
// no direct path exists and the router falls back to the minimal
// obstacle-removal search.

const ROWS: usize = 10;
const COLS: usize = 10;
const NUMBER_OF_OBSTACLES: usize = 20;

fn scatter_obstacles(grid: &mut Grid, start: Cell, end: Cell, count: usize, rng: &mut StdRng) -> Vec<Cell> {
    let mut added = Vec::with_capacity(count);
    while added.len() < count {
        let cell = Cell::new(rng.gen_range(0..COLS as i32), rng.gen_range(0..ROWS as i32));
        if grid.is_walkable(&cell) && cell != start && cell != end {
            grid.set(cell, Occupancy::Obstacle);
            added.push(cell);
        }
    }
    added
}

fn main() {
    let mut grid = Grid::new(COLS, ROWS);
    let start = Cell::new(0, 0);
    let end = Cell::new(9, 9);

    // A cluster sealing off the goal corner.
    let mut candidates = vec![
        Cell::new(7, 7),
        Cell::new(7, 8),
        Cell::new(8, 7),
        Cell::new(9, 7),
    ];
    for cell in &candidates {
        grid.set(*cell, Occupancy::Obstacle);
    }
    // The corner needs (8, 8), (9, 8) or (8, 9) blocked too to be sealed;
    // keep scattering until the random obstacles happen to do that, so the
    // removal search always has work to do.
    let mut rng = StdRng::seed_from_u64(3);
    let scattered = loop {
        let mut attempt = grid.clone();
        let scattered = scatter_obstacles(&mut attempt, start, end, NUMBER_OF_OBSTACLES, &mut rng);
        attempt.update();
        if !attempt.reachable(&start, &end) {
            grid = attempt;
            break scattered;
        }
    };
    println!("Location of the {NUMBER_OF_OBSTACLES} randomly placed obstacles:");
    println!("{scattered:?}\n");
    candidates.extend(scattered);

    println!("{}", grid);

    match route(&mut grid, start, end, &candidates) {
        RouteOutcome::Direct(path) => println!("Path found: {path:?}"),
        RouteOutcome::Breached { removed, path } => {
            println!("No path found initially.");
            println!("Obstacles to remove: {removed:?}");
            for cell in &removed {
                grid.set(*cell, Occupancy::Walkable);
            }
            println!("Path after removing obstacles: {path:?}");
        }
        RouteOutcome::Infeasible => {
            println!("No valid path could be created, even by removing obstacles.");
        }
    }
}
