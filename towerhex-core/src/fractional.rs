//! Fractional cube coordinates, used while interpolating between hexes

use std::ops::{Add, Mul, Sub};

use crate::board::Hex;
use crate::error::CoordinateError;

/// Allowed drift of `q + r + s` away from zero
pub const FRACTIONAL_EPSILON: f64 = 1e-5;

/// Real-valued cube coordinate. `q + r + s` is zero up to `FRACTIONAL_EPSILON`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FractionalHex {
    q: f64,
    r: f64,
    s: f64,
}

impl FractionalHex {
    /// Build from an axial pair, deriving `s = -q - r`
    pub fn new(q: f64, r: f64) -> Self {
        Self { q, r, s: -q - r }
    }

    /// Build from all three components. An `Err` means the caller handed in a
    /// triple off the `q + r + s == 0` plane (or a non-finite one); propagate
    /// it with `?`.
    pub fn from_cube(q: f64, r: f64, s: f64) -> Result<Self, CoordinateError> {
        if (q + r + s).abs() > FRACTIONAL_EPSILON || !(q + r + s).is_finite() {
            return Err(CoordinateError::InvalidFractional { q, r, s });
        }
        Ok(Self { q, r, s })
    }

    /// Callers guarantee the triple came from valid integer hexes.
    pub(crate) fn from_cube_unchecked(q: f64, r: f64, s: f64) -> Self {
        Self { q, r, s }
    }

    pub fn q(&self) -> f64 {
        self.q
    }

    pub fn r(&self) -> f64 {
        self.r
    }

    pub fn s(&self) -> f64 {
        self.s
    }

    /// Snap to the nearest integer hex.
    ///
    /// Each axis is rounded on its own, then the axis that moved the most is
    /// recomputed from the other two. Ties go to q, then r, then s.
    pub fn round(&self) -> Hex {
        let mut q = self.q.round();
        let mut r = self.r.round();
        let s = self.s.round();

        let q_diff = (q - self.q).abs();
        let r_diff = (r - self.r).abs();
        let s_diff = (s - self.s).abs();

        if q_diff > r_diff && q_diff > s_diff {
            q = -r - s;
        } else if r_diff > s_diff {
            r = -q - s;
        }
        // s is derived from q and r in every branch
        Hex::new(q as i32, r as i32)
    }
}

impl Add for FractionalHex {
    type Output = FractionalHex;

    fn add(self, other: FractionalHex) -> FractionalHex {
        Self { q: self.q + other.q, r: self.r + other.r, s: self.s + other.s }
    }
}

impl Sub for FractionalHex {
    type Output = FractionalHex;

    fn sub(self, other: FractionalHex) -> FractionalHex {
        Self { q: self.q - other.q, r: self.r - other.r, s: self.s - other.s }
    }
}

impl Mul<f64> for FractionalHex {
    type Output = FractionalHex;

    fn mul(self, scale: f64) -> FractionalHex {
        Self { q: self.q * scale, r: self.r * scale, s: self.s * scale }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_tolerance() {
        assert!(FractionalHex::from_cube(0.5, 0.25, -0.75).is_ok());
        assert!(FractionalHex::from_cube(0.5, 0.25, -0.750001).is_ok());
        assert!(FractionalHex::from_cube(0.5, 0.25, -0.7).is_err());
        assert!(FractionalHex::from_cube(f64::NAN, 0.0, 0.0).is_err());
        assert_eq!(FractionalHex::new(1.5, -0.5).s(), -1.0);
    }

    #[test]
    fn test_round_exact() {
        let h = FractionalHex::from_cube(2.0, -5.0, 3.0).unwrap();
        assert_eq!(h.round(), Hex::new(2, -5));
    }

    #[test]
    fn test_round_repairs_largest_error() {
        // q rounds furthest, so q is recomputed
        let h = FractionalHex::from_cube(0.45, 0.3, -0.75).unwrap();
        assert_eq!(h.round(), Hex::from_cube(1, 0, -1).unwrap());

        // r rounds furthest
        let h = FractionalHex::from_cube(0.3, 0.45, -0.75).unwrap();
        assert_eq!(h.round(), Hex::from_cube(0, 1, -1).unwrap());

        // s rounds furthest
        let h = FractionalHex::from_cube(0.1, 0.3, -0.4).unwrap();
        assert_eq!(h.round(), Hex::new(0, 0));
    }

    #[test]
    fn test_round_tie_keeps_q() {
        // q and r tie on error: q keeps its rounded value, r is recomputed
        let h = FractionalHex::from_cube(0.5, 0.5, -1.0).unwrap();
        assert_eq!(h.round(), Hex::from_cube(1, 0, -1).unwrap());
    }

    #[test]
    fn test_arithmetic() {
        let a = FractionalHex::new(1.0, 0.5);
        let b = FractionalHex::new(0.5, 0.5);
        let sum = a + b;
        assert_eq!((sum.q(), sum.r(), sum.s()), (1.5, 1.0, -2.5));
        let diff = a - b;
        assert_eq!((diff.q(), diff.r(), diff.s()), (0.5, 0.0, -0.5));
        let scaled = a * 2.0;
        assert_eq!(scaled.round(), Hex::new(2, 1));
        assert_eq!((Hex::new(2, -4) * 0.5).round(), Hex::new(1, -2));
    }

    #[test]
    fn test_lerp_midpoint() {
        let mid = Hex::new(0, 0).lerp_to(Hex::new(4, -2), 0.5);
        assert!((mid.q() - 2.0).abs() < 1e-4);
        assert!((mid.r() + 1.0).abs() < 1e-4);
        assert!(FractionalHex::from_cube(mid.q(), mid.r(), mid.s()).is_ok());
        assert_eq!(mid.round(), Hex::new(2, -1));
    }
}
