use grid_breach::{find_path, Cell, Grid, Occupancy};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Cells have an 8-neighborhood.

fn main() {
    let mut grid = Grid::new(3, 3);
    grid.set(Cell::new(1, 1), Occupancy::Obstacle);
    println!("{}", grid);
    let start = Cell::new(0, 0);
    let end = Cell::new(2, 2);
    let path = find_path(&grid, start, end).unwrap();
    println!("Path:");
    for p in path {
        println!("{}", p);
    }
}
