//! Error types for coordinate construction and tower placement

use crate::board::Hex;
use thiserror::Error;

/// A coordinate that does not lie on the `q + r + s == 0` plane
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum CoordinateError {
    #[error("invalid cube coordinate ({q}, {r}, {s}): components must sum to 0")]
    InvalidCube { q: i32, r: i32, s: i32 },

    #[error("axial coordinate ({q}, {r}) has no cube form: -q - r overflows i32")]
    AxialOverflow { q: i32, r: i32 },

    #[error("invalid fractional coordinate ({q}, {r}, {s}): components must sum to 0 within 1e-5")]
    InvalidFractional { q: f64, r: f64, s: f64 },
}

/// Reasons a tower cannot be placed on (or removed from) a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("cell {0} is outside the map")]
    OutOfBounds(Hex),

    #[error("cell {0} is not buildable")]
    NotBuildable(Hex),

    #[error("placing a tower would cut every path from {start} to {goal}")]
    BlocksPath { start: Hex, goal: Hex },

    #[error("cell {0} has no tower to remove")]
    NotOccupied(Hex),
}
