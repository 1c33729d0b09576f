//! TowerHex Core - Hex geometry and path feasibility
//!
//! This crate provides the spatial layer of the tower-defence game:
//! - Board geometry (cube coordinates, rotation, lines, disks)
//! - Fractional coordinates for interpolation and rounding
//! - Grid map with per-cell buildable/traversable/occupied state
//! - Path feasibility search used before committing tower placements

pub mod board;
pub mod fractional;
pub mod map;
pub mod pathfinding;
pub mod config;
pub mod error;

// Re-exports for convenient access
pub use board::{
    hexes_in_intersection, hexes_in_range, DiagonalDirection, Direction, Hex, DIAGONALS,
    DIRECTIONS, ORIGIN,
};
pub use fractional::{FractionalHex, FRACTIONAL_EPSILON};
pub use map::{Cell, GridMap};
pub use pathfinding::{can_reach, search, SearchReport};
pub use config::{MapConfig, SearchConfig, MAX_MAP_RANGE};
pub use error::{CoordinateError, PlacementError};
