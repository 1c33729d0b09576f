//! Hex board geometry with cube coordinates
//!
//! Cells are addressed by cube coordinates `(q, r, s)` with `q + r + s == 0`.
//! The axial pair `(q, r)` is enough to identify a cell; `s` is always derived.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::error::CoordinateError;
use crate::fractional::FractionalHex;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Nudge added to q and r before interpolating (s gets twice the opposite)
/// so samples that land exactly on an edge round to the same side every time.
const LERP_NUDGE: f64 = 1e-6;

/// Orthogonal neighbour offsets, indexed by `Direction`
pub const DIRECTIONS: [Hex; 6] = [
    Hex::new(1, 0),   // NW
    Hex::new(1, -1),  // NE
    Hex::new(0, -1),  // E
    Hex::new(-1, 0),  // SE
    Hex::new(-1, 1),  // SW
    Hex::new(0, 1),   // W
];

/// Diagonal neighbour offsets, indexed by `DiagonalDirection`
pub const DIAGONALS: [Hex; 6] = [
    Hex::new(2, -1),  // NW
    Hex::new(1, 1),   // N
    Hex::new(-1, 2),  // NE
    Hex::new(-2, 1),  // SE
    Hex::new(-1, -1), // S
    Hex::new(1, -2),  // SW
];

/// Origin of the grid
pub const ORIGIN: Hex = Hex::new(0, 0);

// ============================================================================
// DIRECTIONS
// ============================================================================

/// The six edge-sharing directions, clockwise from north-west
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    NorthWest,
    NorthEast,
    East,
    SouthEast,
    SouthWest,
    West,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::NorthWest,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::West,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Direction whose vector is this one rotated by `Hex::rotate_left`
    pub fn rotate_left(self) -> Self {
        Self::ALL[(self.index() + 1) % 6]
    }

    /// Direction whose vector is this one rotated by `Hex::rotate_right`
    pub fn rotate_right(self) -> Self {
        Self::ALL[(self.index() + 5) % 6]
    }

    pub fn opposite(self) -> Self {
        Self::ALL[(self.index() + 3) % 6]
    }
}

/// The six vertex-sharing directions (second ring, distance 2)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagonalDirection {
    NorthWest,
    North,
    NorthEast,
    SouthEast,
    South,
    SouthWest,
}

impl DiagonalDirection {
    pub const ALL: [DiagonalDirection; 6] = [
        DiagonalDirection::NorthWest,
        DiagonalDirection::North,
        DiagonalDirection::NorthEast,
        DiagonalDirection::SouthEast,
        DiagonalDirection::South,
        DiagonalDirection::SouthWest,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

// ============================================================================
// HEX
// ============================================================================

/// Cube hex coordinate. Always satisfies `q + r + s == 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Axial", into = "Axial")]
pub struct Hex {
    q: i32,
    r: i32,
    s: i32,
}

/// Wire form: only the axial pair is stored
#[derive(Clone, Copy, Serialize, Deserialize)]
struct Axial {
    q: i32,
    r: i32,
}

impl TryFrom<Axial> for Hex {
    type Error = CoordinateError;

    fn try_from(a: Axial) -> Result<Self, Self::Error> {
        Hex::checked_new(a.q, a.r).ok_or(CoordinateError::AxialOverflow { q: a.q, r: a.r })
    }
}

impl From<Hex> for Axial {
    fn from(h: Hex) -> Self {
        Axial { q: h.q, r: h.r }
    }
}

impl From<(i32, i32)> for Hex {
    fn from((q, r): (i32, i32)) -> Self {
        Hex::new(q, r)
    }
}

impl Hex {
    /// Build from an axial pair, deriving `s = -q - r`
    ///
    /// # Panics
    ///
    /// Panics if `s` does not fit in an `i32`. Use [`Hex::checked_new`] for
    /// untrusted input.
    pub const fn new(q: i32, r: i32) -> Self {
        match Self::checked_new(q, r) {
            Some(hex) => hex,
            None => panic!("hex coordinate overflow"),
        }
    }

    /// Build from an axial pair, or `None` if `s = -q - r` overflows
    pub const fn checked_new(q: i32, r: i32) -> Option<Self> {
        match q.checked_add(r) {
            Some(sum) => match sum.checked_neg() {
                Some(s) => Some(Self { q, r, s }),
                None => None,
            },
            None => None,
        }
    }

    /// Build from all three cube components.
    ///
    /// The sum is checked in `i64`, so components that only cancel out under
    /// wrapping arithmetic are rejected too. An `Err` means the caller broke
    /// the `q + r + s == 0` contract: propagate it with `?` rather than trying
    /// to repair the triple.
    pub fn from_cube(q: i32, r: i32, s: i32) -> Result<Self, CoordinateError> {
        if i64::from(q) + i64::from(r) + i64::from(s) != 0 {
            return Err(CoordinateError::InvalidCube { q, r, s });
        }
        Ok(Self { q, r, s })
    }

    /// Widened components back into a hex, if every one fits in `i32`.
    /// Callers pass a triple that sums to zero.
    fn from_wide(q: i64, r: i64, s: i64) -> Option<Self> {
        Some(Self {
            q: i32::try_from(q).ok()?,
            r: i32::try_from(r).ok()?,
            s: i32::try_from(s).ok()?,
        })
    }

    pub const fn q(&self) -> i32 {
        self.q
    }

    pub const fn r(&self) -> i32 {
        self.r
    }

    pub const fn s(&self) -> i32 {
        self.s
    }

    /// Distance from the origin
    pub fn length(&self) -> u32 {
        cube_norm(i64::from(self.q), i64::from(self.r), i64::from(self.s))
    }

    /// Distance between two hexes. Never overflows: the component
    /// differences are taken in `i64`.
    pub fn distance_to(&self, other: Hex) -> u32 {
        cube_norm(
            i64::from(self.q) - i64::from(other.q),
            i64::from(self.r) - i64::from(other.r),
            i64::from(self.s) - i64::from(other.s),
        )
    }

    /// Rotate 60 degrees about the origin
    pub fn rotate_left(&self) -> Hex {
        -Hex { q: self.s, r: self.q, s: self.r }
    }

    /// Rotate 60 degrees about the origin, the other way
    pub fn rotate_right(&self) -> Hex {
        -Hex { q: self.r, r: self.s, s: self.q }
    }

    pub fn checked_add(self, other: Hex) -> Option<Hex> {
        Some(Hex {
            q: self.q.checked_add(other.q)?,
            r: self.r.checked_add(other.r)?,
            s: self.s.checked_add(other.s)?,
        })
    }

    pub fn checked_sub(self, other: Hex) -> Option<Hex> {
        Some(Hex {
            q: self.q.checked_sub(other.q)?,
            r: self.r.checked_sub(other.r)?,
            s: self.s.checked_sub(other.s)?,
        })
    }

    pub fn checked_neg(self) -> Option<Hex> {
        Some(Hex {
            q: self.q.checked_neg()?,
            r: self.r.checked_neg()?,
            s: self.s.checked_neg()?,
        })
    }

    pub fn checked_mul(self, scale: i32) -> Option<Hex> {
        Some(Hex {
            q: self.q.checked_mul(scale)?,
            r: self.r.checked_mul(scale)?,
            s: self.s.checked_mul(scale)?,
        })
    }

    /// Unit vector for a direction
    pub fn direction(direction: Direction) -> Hex {
        DIRECTIONS[direction.index()]
    }

    /// Offset vector for a diagonal direction
    pub fn diagonal(direction: DiagonalDirection) -> Hex {
        DIAGONALS[direction.index()]
    }

    pub fn neighbor(&self, direction: Direction) -> Hex {
        *self + Hex::direction(direction)
    }

    pub fn diagonal_neighbor(&self, direction: DiagonalDirection) -> Hex {
        *self + Hex::diagonal(direction)
    }

    /// All six orthogonal neighbours, in `Direction::ALL` order
    pub fn neighbors(&self) -> [Hex; 6] {
        DIRECTIONS.map(|d| *self + d)
    }

    /// Linear interpolation towards `other`; `t` is expected in `[0, 1]`
    pub fn lerp_to(&self, other: Hex, t: f64) -> FractionalHex {
        let lerp = |a: i32, b: i32, nudge: f64| {
            (a as f64 + nudge) * (1.0 - t) + (b as f64 + nudge) * t
        };
        FractionalHex::from_cube_unchecked(
            lerp(self.q, other.q, LERP_NUDGE),
            lerp(self.r, other.r, LERP_NUDGE),
            lerp(self.s, other.s, -2.0 * LERP_NUDGE),
        )
    }

    /// Hexes on the straight line to `other`, both endpoints included
    pub fn line_to(&self, other: Hex) -> Vec<Hex> {
        let n = self.distance_to(other);
        let step = 1.0 / n.max(1) as f64;

        let mut line = Vec::with_capacity((n as usize).saturating_add(1));
        line.push(*self);
        for i in 1..=n {
            line.push(self.lerp_to(other, step * i as f64).round());
        }
        line
    }
}

/// `(|q| + |r| + |s|) / 2` for a triple summing to zero. Each component of a
/// difference of two hexes stays below `2^32`, so the result fits in `u32`.
fn cube_norm(q: i64, r: i64, s: i64) -> u32 {
    let sum = q.unsigned_abs() + r.unsigned_abs() + s.unsigned_abs();
    u32::try_from(sum / 2).unwrap_or(u32::MAX)
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.q, self.r, self.s)
    }
}

// Operators panic on overflow in every build profile; the `checked_*` methods
// are the non-panicking forms.

impl Add for Hex {
    type Output = Hex;

    fn add(self, other: Hex) -> Hex {
        self.checked_add(other)
            .unwrap_or_else(|| panic!("overflow when adding hexes {} and {}", self, other))
    }
}

impl Sub for Hex {
    type Output = Hex;

    fn sub(self, other: Hex) -> Hex {
        self.checked_sub(other)
            .unwrap_or_else(|| panic!("overflow when subtracting hexes {} and {}", self, other))
    }
}

impl Neg for Hex {
    type Output = Hex;

    fn neg(self) -> Hex {
        self.checked_neg()
            .unwrap_or_else(|| panic!("overflow when negating hex {}", self))
    }
}

impl Mul<i32> for Hex {
    type Output = Hex;

    fn mul(self, scale: i32) -> Hex {
        self.checked_mul(scale)
            .unwrap_or_else(|| panic!("overflow when scaling hex {} by {}", self, scale))
    }
}

impl Mul<f64> for Hex {
    type Output = FractionalHex;

    fn mul(self, scale: f64) -> FractionalHex {
        FractionalHex::from_cube_unchecked(
            self.q as f64 * scale,
            self.r as f64 * scale,
            self.s as f64 * scale,
        )
    }
}

// ============================================================================
// ENUMERATION
// ============================================================================

const MIN_COORD: i64 = i32::MIN as i64;
const MAX_COORD: i64 = i32::MAX as i64;

/// Every hex within `radius` of `center` (q ascending, then s ascending).
///
/// Bounds are worked out in `i64`. Hexes whose components would not fit in
/// `i32` do not exist and are left out.
pub fn hexes_in_range(center: Hex, radius: u32) -> Vec<Hex> {
    let n = i64::from(radius);
    let (cq, cr, cs) = (i64::from(center.q), i64::from(center.r), i64::from(center.s));

    let count = n.saturating_mul(n).saturating_mul(3).saturating_add(3 * n + 1);
    let mut hexes = Vec::with_capacity(usize::try_from(count).unwrap_or(usize::MAX));

    for q in (-n).max(MIN_COORD - cq)..=n.min(MAX_COORD - cq) {
        let s_min = (-n).max(-q - n).max(MIN_COORD - cs);
        let s_max = n.min(-q + n).min(MAX_COORD - cs);
        for s in s_min..=s_max {
            let r = -q - s;
            if let Some(hex) = Hex::from_wide(cq + q, cr + r, cs + s) {
                hexes.push(hex);
            }
        }
    }
    hexes
}

/// Hexes inside the cube-space bounding boxes of both disks.
///
/// Works on per-axis bounds only, so it never misses a hex that lies in both
/// disks. Disjoint disks yield an empty list.
pub fn hexes_in_intersection(a: Hex, range_a: u32, b: Hex, range_b: u32) -> Vec<Hex> {
    let (ra, rb) = (i64::from(range_a), i64::from(range_b));
    let low = |x: i32, y: i32| (i64::from(x) - ra).max(i64::from(y) - rb).max(MIN_COORD);
    let high = |x: i32, y: i32| (i64::from(x) + ra).min(i64::from(y) + rb).min(MAX_COORD);

    let (min_q, max_q) = (low(a.q, b.q), high(a.q, b.q));
    let (min_r, max_r) = (low(a.r, b.r), high(a.r, b.r));
    let (min_s, max_s) = (low(a.s, b.s), high(a.s, b.s));

    let mut hexes = Vec::new();
    for q in min_q..=max_q {
        for r in min_r.max(-q - max_s)..=max_r.min(-q - min_s) {
            if let Some(hex) = Hex::from_wide(q, r, -q - r) {
                hexes.push(hex);
            }
        }
    }
    hexes
}
