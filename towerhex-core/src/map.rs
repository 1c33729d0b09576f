//! Grid map: per-cell state over a bounded axial rectangle
//!
//! Lookups are tolerant: a coordinate outside the map simply reports `false`
//! (or `None`), so callers never need to bounds-check before querying.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::board::{hexes_in_range, Hex, DIRECTIONS};
use crate::config::{MapConfig, SearchConfig};
use crate::error::PlacementError;
use crate::pathfinding;

/// State of a single cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub blocks_view: bool,
    pub traversable: bool,
    pub occupied: bool,
    pub buildable: bool,
}

impl Cell {
    /// Walkable, buildable, empty ground
    pub const fn open() -> Self {
        Self {
            blocks_view: false,
            traversable: true,
            occupied: false,
            buildable: true,
        }
    }
}

/// Bounded hex grid. A coordinate is on the map iff
/// `-x_range < q < x_range` and `-y_range < r < y_range`.
#[derive(Clone, Debug)]
pub struct GridMap {
    cells: FxHashMap<Hex, Cell>,
    x_range: i32,
    y_range: i32,
}

impl GridMap {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Map with every cell non-traversable and non-buildable
    pub fn new(x_range: i32, y_range: i32) -> Self {
        Self::filled(x_range, y_range, Cell::default())
    }

    /// Map with every cell set to `cell`. Non-positive ranges give an empty map.
    pub fn filled(x_range: i32, y_range: i32, cell: Cell) -> Self {
        let (x, y) = (x_range.max(0), y_range.max(0));
        let mut cells = FxHashMap::default();
        for q in (1 - x)..x {
            for r in (1 - y)..y {
                cells.insert(Hex::new(q, r), cell);
            }
        }
        Self { cells, x_range, y_range }
    }

    pub fn from_config(config: &MapConfig) -> Self {
        Self::filled(config.x_range, config.y_range, config.default_cell)
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn x_range(&self) -> i32 {
        self.x_range
    }

    pub fn y_range(&self) -> i32 {
        self.y_range
    }

    /// Number of cells on the map
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate coordinates on the map (no particular order)
    pub fn coords(&self) -> impl Iterator<Item = Hex> + '_ {
        self.cells.keys().copied()
    }

    /// Strict rectangle test; the ring at `±x_range` / `±y_range` is off the map
    pub fn is_in_bounds(&self, coord: impl Into<Hex>) -> bool {
        let hex: Hex = coord.into();
        within(hex.q(), self.x_range) && within(hex.r(), self.y_range)
    }

    pub fn cell(&self, coord: impl Into<Hex>) -> Option<Cell> {
        let hex: Hex = coord.into();
        self.cells.get(&hex).copied()
    }

    /// Buildable and not already occupied
    pub fn is_buildable(&self, coord: impl Into<Hex>) -> bool {
        self.cell(coord)
            .is_some_and(|c| c.buildable && !c.occupied)
    }

    /// Traversable and not occupied
    pub fn is_traversable(&self, coord: impl Into<Hex>) -> bool {
        self.cell(coord)
            .is_some_and(|c| c.traversable && !c.occupied)
    }

    pub fn is_occupied(&self, coord: impl Into<Hex>) -> bool {
        self.cell(coord).is_some_and(|c| c.occupied)
    }

    pub fn blocks_view(&self, coord: impl Into<Hex>) -> bool {
        self.cell(coord).is_some_and(|c| c.blocks_view)
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    /// Replace a cell's state. Returns false (and does nothing) off the map.
    pub fn set_cell(&mut self, coord: impl Into<Hex>, cell: Cell) -> bool {
        self.update(coord.into(), |c| *c = cell)
    }

    pub fn set_traversable(&mut self, coord: impl Into<Hex>, traversable: bool) -> bool {
        self.update(coord.into(), |c| c.traversable = traversable)
    }

    pub fn set_buildable(&mut self, coord: impl Into<Hex>, buildable: bool) -> bool {
        self.update(coord.into(), |c| c.buildable = buildable)
    }

    pub fn set_occupied(&mut self, coord: impl Into<Hex>, occupied: bool) -> bool {
        self.update(coord.into(), |c| c.occupied = occupied)
    }

    pub fn set_blocks_view(&mut self, coord: impl Into<Hex>, blocks_view: bool) -> bool {
        self.update(coord.into(), |c| c.blocks_view = blocks_view)
    }

    fn update(&mut self, hex: Hex, f: impl FnOnce(&mut Cell)) -> bool {
        match self.cells.get_mut(&hex) {
            Some(cell) => {
                f(cell);
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // NEIGHBOURHOOD
    // ========================================================================

    /// Orthogonal neighbours that are on the map
    pub fn neighbors_of(&self, coord: impl Into<Hex>) -> Vec<Hex> {
        adjacent(coord.into())
            .filter(|n| self.is_in_bounds(*n))
            .collect()
    }

    /// Orthogonal neighbours a walker can step onto
    pub fn walkable_neighbors_of(&self, coord: impl Into<Hex>) -> Vec<Hex> {
        adjacent(coord.into())
            .filter(|n| self.is_traversable(*n))
            .collect()
    }

    /// On-map hexes within `radius` of `center`
    pub fn cells_in_range(&self, center: impl Into<Hex>, radius: u32) -> Vec<Hex> {
        hexes_in_range(center.into(), radius)
            .into_iter()
            .filter(|h| self.is_in_bounds(*h))
            .collect()
    }

    /// True iff every hex strictly between the endpoints is on the map and
    /// does not block view
    pub fn has_line_of_sight(&self, from: impl Into<Hex>, to: impl Into<Hex>) -> bool {
        let from: Hex = from.into();
        let line = from.line_to(to.into());
        line.iter()
            .skip(1)
            .take(line.len().saturating_sub(2))
            .all(|h| self.is_in_bounds(*h) && !self.blocks_view(*h))
    }

    // ========================================================================
    // PATHS AND PLACEMENT
    // ========================================================================

    /// Whether a walker at `start` can still reach `goal`
    pub fn can_reach(&self, start: impl Into<Hex>, goal: impl Into<Hex>) -> bool {
        pathfinding::search(self, start, goal, &SearchConfig::default()).reachable
    }

    /// Occupy `coord` with a tower, unless that would cut `start` off from `goal`.
    ///
    /// On error the map is left unchanged.
    pub fn place_tower(
        &mut self,
        coord: impl Into<Hex>,
        start: impl Into<Hex>,
        goal: impl Into<Hex>,
    ) -> Result<(), PlacementError> {
        let (hex, start, goal): (Hex, Hex, Hex) = (coord.into(), start.into(), goal.into());

        if !self.is_in_bounds(hex) {
            return Err(PlacementError::OutOfBounds(hex));
        }
        if !self.is_buildable(hex) {
            return Err(PlacementError::NotBuildable(hex));
        }
        // the search never checks its own start cell, so an endpoint tower
        // would pass the reachability test below
        if hex == start || hex == goal {
            tracing::debug!("Rejected tower at {}: endpoint of {} -> {}", hex, start, goal);
            return Err(PlacementError::BlocksPath { start, goal });
        }

        self.set_occupied(hex, true);
        if !self.can_reach(start, goal) {
            self.set_occupied(hex, false);
            tracing::debug!("Rejected tower at {}: would block {} -> {}", hex, start, goal);
            return Err(PlacementError::BlocksPath { start, goal });
        }

        tracing::debug!("Placed tower at {}", hex);
        Ok(())
    }

    /// Clear the tower on `coord`
    pub fn remove_tower(&mut self, coord: impl Into<Hex>) -> Result<(), PlacementError> {
        let hex: Hex = coord.into();
        if !self.is_in_bounds(hex) {
            return Err(PlacementError::OutOfBounds(hex));
        }
        if !self.is_occupied(hex) {
            return Err(PlacementError::NotOccupied(hex));
        }
        self.set_occupied(hex, false);
        tracing::debug!("Removed tower at {}", hex);
        Ok(())
    }
}

/// Strict `-range < c < range`, without negating `range`
fn within(c: i32, range: i32) -> bool {
    range > 0 && c.unsigned_abs() < range.unsigned_abs()
}

/// Neighbours of `hex` that exist in the coordinate space
fn adjacent(hex: Hex) -> impl Iterator<Item = Hex> {
    DIRECTIONS.into_iter().filter_map(move |d| hex.checked_add(d))
}

impl Default for GridMap {
    fn default() -> Self {
        Self::from_config(&MapConfig::default())
    }
}
