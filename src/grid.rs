use core::fmt;
use log::{info, warn};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// A coordinate on the grid: column `x`, row `y`. Equality, hashing and
/// ordering are defined by the coordinates alone; path reconstruction state
/// is kept in the search engine, never on the cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Cell {
        Cell { x, y }
    }
    pub fn offset(&self, dx: i32, dy: i32) -> Cell {
        Cell::new(self.x + dx, self.y + dy)
    }
    /// Number of king moves between two cells on an empty grid
    /// ([Chebyshev distance](https://en.wikipedia.org/wiki/Chebyshev_distance)).
    pub fn king_distance(&self, other: &Cell) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The two occupancy states of a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Occupancy {
    Walkable,
    Obstacle,
}

/// The 8 king-move offsets, in the fixed order used for neighbor
/// enumeration. BFS tie-breaks between equal-length paths follow this order.
pub const DIRECTIONS: [(i32, i32); 8] = [
    (1, 1),
    (0, 1),
    (1, 0),
    (-1, 1),
    (1, -1),
    (-1, 0),
    (0, -1),
    (-1, -1),
];

/// A rectangular occupancy map of fixed dimensions. In addition to the raw
/// [Occupancy] values, [Grid] maintains connected components of walkable
/// cells in a [UnionFind] structure, which answers reachability queries
/// without a search. Components are flagged dirty whenever a mutation may
/// have split one apart.
#[derive(Clone, Debug)]
pub struct Grid {
    occupancy: Vec<Occupancy>,
    width: usize,
    height: usize,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Grid {
    /// Creates a grid of the given dimensions with every cell walkable.
    pub fn new(width: usize, height: usize) -> Grid {
        Grid {
            occupancy: vec![Occupancy::Walkable; width * height],
            width,
            height,
            components: UnionFind::new(width * height),
            components_dirty: true,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }

    fn ix(&self, x: i32, y: i32) -> usize {
        y as usize * self.width + x as usize
    }
    fn ix_cell(&self, cell: &Cell) -> usize {
        self.ix(cell.x, cell.y)
    }

    pub fn in_bounds(&self, cell: &Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < self.width && (cell.y as usize) < self.height
    }

    /// Looks up a cell's occupancy. Out-of-bounds cells read as [Occupancy::Obstacle].
    pub fn get(&self, cell: &Cell) -> Occupancy {
        if self.in_bounds(cell) {
            self.occupancy[self.ix_cell(cell)]
        } else {
            Occupancy::Obstacle
        }
    }

    pub fn is_walkable(&self, cell: &Cell) -> bool {
        self.get(cell) == Occupancy::Walkable
    }

    /// Updates a cell's occupancy. Newly walkable cells are joined to the
    /// components of their walkable neighbours; newly blocked cells flag the
    /// components as dirty since a component may have been split.
    pub fn set(&mut self, cell: Cell, value: Occupancy) {
        debug_assert!(self.in_bounds(&cell));
        let old = self.get(&cell);
        match (old, value) {
            (Occupancy::Walkable, Occupancy::Obstacle) => self.components_dirty = true,
            (Occupancy::Obstacle, Occupancy::Walkable) => {
                let cell_ix = self.ix_cell(&cell);
                self.occupancy[cell_ix] = Occupancy::Walkable;
                for neighbor in self.neighbors(&cell) {
                    let neighbor_ix = self.ix_cell(&neighbor);
                    self.components.union(cell_ix, neighbor_ix);
                }
            }
            _ => {}
        }
        let ix = self.ix_cell(&cell);
        self.occupancy[ix] = value;
    }

    /// The walkable neighbours of a cell under 8-directional movement, in
    /// [DIRECTIONS] order. Pure; bounds and occupancy are the only filters.
    pub fn neighbors(&self, cell: &Cell) -> SmallVec<[Cell; 8]> {
        DIRECTIONS
            .iter()
            .map(|&(dx, dy)| cell.offset(dx, dy))
            .filter(|candidate| self.is_walkable(candidate))
            .collect()
    }

    /// Iterates over all obstacle cells in row-major order.
    pub fn obstacles(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height as i32).flat_map(move |y| {
            (0..self.width as i32)
                .map(move |x| Cell::new(x, y))
                .filter(move |c| !self.is_walkable(c))
        })
    }

    /// Generates a new [UnionFind] structure and links up walkable grid
    /// neighbours to the same components.
    pub fn generate_components(&mut self) {
        info!("Generating connected components");
        self.components = UnionFind::new(self.width * self.height);
        self.components_dirty = false;
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let cell = Cell::new(x, y);
                if !self.is_walkable(&cell) {
                    continue;
                }
                let cell_ix = self.ix_cell(&cell);
                // Forward neighbours suffice for a full scan.
                let forward = [
                    cell.offset(1, 0),
                    cell.offset(-1, 1),
                    cell.offset(0, 1),
                    cell.offset(1, 1),
                ];
                for neighbor in forward.iter() {
                    if self.is_walkable(neighbor) {
                        let neighbor_ix = self.ix_cell(neighbor);
                        self.components.union(cell_ix, neighbor_ix);
                    }
                }
            }
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Checks if two cells are walkable and on the same component. Callers
    /// must [update](Self::update) first; stale components give stale answers.
    pub fn reachable(&self, start: &Cell, goal: &Cell) -> bool {
        debug_assert!(!self.components_dirty);
        self.is_walkable(start)
            && self.is_walkable(goal)
            && self
                .components
                .equiv(self.ix_cell(start), self.ix_cell(goal))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height as i32 {
            let values = (0..self.width as i32)
                .map(|x| !self.is_walkable(&Cell::new(x, y)) as i32)
                .collect::<Vec<i32>>();
            writeln!(f, "{:?}", values)?;
        }
        Ok(())
    }
}

/// Scoped removal of a set of obstacles: the cells are converted to walkable
/// on construction and restored to obstacles when the patch is dropped, on
/// every exit path. Cells that were already walkable are left untouched and
/// are not restored. The components flag is marked dirty on drop since the
/// union operations performed while the patch was live cannot be undone.
pub struct RemovalPatch<'a> {
    grid: &'a mut Grid,
    toggled: SmallVec<[Cell; 4]>,
}

impl<'a> RemovalPatch<'a> {
    pub fn remove<I>(grid: &'a mut Grid, cells: I) -> RemovalPatch<'a>
    where
        I: IntoIterator<Item = Cell>,
    {
        let mut toggled = SmallVec::new();
        for cell in cells {
            if !grid.in_bounds(&cell) || grid.is_walkable(&cell) {
                warn!("Removal candidate {} is not an obstacle on the grid", cell);
                continue;
            }
            let ix = grid.ix_cell(&cell);
            grid.occupancy[ix] = Occupancy::Walkable;
            toggled.push(cell);
        }
        RemovalPatch { grid, toggled }
    }

    pub fn grid(&self) -> &Grid {
        self.grid
    }
}

impl Drop for RemovalPatch<'_> {
    fn drop(&mut self) {
        for cell in &self.toggled {
            let ix = self.grid.ix_cell(cell);
            self.grid.occupancy[ix] = Occupancy::Obstacle;
        }
        if !self.toggled.is_empty() {
            self.grid.components_dirty = true;
        }
    }
}
