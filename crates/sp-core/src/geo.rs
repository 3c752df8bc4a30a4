//! Positions in 2- or 3-space and axis-aligned bounding boxes.
//!
//! `Position` is a small `Copy` value: the coordinates live in a fixed
//! `[f64; 3]` with a dimension tag, so 2-D and 3-D points share one type and
//! never allocate.  Unused trailing coordinates are always zero.
//!
//! `BoundingBox` is an *open* box: its boundary is excluded, except along axes
//! where the box has zero depth.  Those collapsed axes test for equality, so a
//! point box contains exactly its point and the sweep of an axis-aligned
//! motion contains the points it passes through.

use std::fmt;

use crate::{SpError, SpResult};

/// Largest supported dimension.
pub const MAX_DIMENSION: usize = 3;

/// A planar bearing in radians, measured anticlockwise from the +x axis.
pub type Direction = f64;

// ── Position ──────────────────────────────────────────────────────────────────

/// A point in 2- or 3-space.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    dim:    u8,
    coords: [f64; MAX_DIMENSION],
}

impl Position {
    #[inline]
    pub fn xy(x: f64, y: f64) -> Self {
        Self { dim: 2, coords: [x, y, 0.0] }
    }

    #[inline]
    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self { dim: 3, coords: [x, y, z] }
    }

    /// Build a position from a 2- or 3-element slice.
    pub fn from_slice(coords: &[f64]) -> SpResult<Self> {
        match *coords {
            [x, y] => Ok(Self::xy(x, y)),
            [x, y, z] => Ok(Self::xyz(x, y, z)),
            _ => Err(SpError::InvalidValue(format!(
                "positions have 2 or 3 coordinates, got {}",
                coords.len()
            ))),
        }
    }

    /// The origin of the given dimension.
    pub fn origin(dim: usize) -> SpResult<Self> {
        match dim {
            2 => Ok(Self::xy(0.0, 0.0)),
            3 => Ok(Self::xyz(0.0, 0.0, 0.0)),
            _ => Err(SpError::InvalidValue(format!("unsupported dimension {dim}"))),
        }
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dim as usize
    }

    /// The coordinates as a slice of length [`dimension`](Self::dimension).
    #[inline]
    pub fn coords(&self) -> &[f64] {
        &self.coords[..self.dim as usize]
    }

    /// All three coordinates, zero-padded for 2-D points.
    #[inline]
    pub fn padded(&self) -> [f64; MAX_DIMENSION] {
        self.coords
    }

    /// Fail unless `self` and `other` have the same dimension.
    pub fn check_same_dimension(&self, other: &Position, context: &'static str) -> SpResult<()> {
        if self.dim == other.dim {
            Ok(())
        } else {
            Err(SpError::DimensionMismatch {
                context,
                expected: self.dimension(),
                got:      other.dimension(),
            })
        }
    }

    /// Euclidean distance.
    pub fn distance_to(&self, other: &Position) -> SpResult<f64> {
        self.check_same_dimension(other, "distance")?;
        Ok(self
            .coords()
            .iter()
            .zip(other.coords())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt())
    }

    /// Apply `f` to each pair of coordinates.  Callers must have checked
    /// dimensions; the result takes `self`'s dimension.
    #[inline]
    pub(crate) fn zip_with(&self, other: &Position, f: impl Fn(f64, f64) -> f64) -> Position {
        let mut coords = [0.0; MAX_DIMENSION];
        for d in 0..self.dimension() {
            coords[d] = f(self.coords[d], other.coords[d]);
        }
        Position { dim: self.dim, coords }
    }

    /// Planar bearing from `self` towards `other`.
    pub fn bearing_to(&self, other: &Position) -> SpResult<Direction> {
        self.check_same_dimension(other, "bearing")?;
        Ok((other.coords[1] - self.coords[1]).atan2(other.coords[0] - self.coords[0]))
    }
}

impl std::ops::Index<usize> for Position {
    type Output = f64;

    /// # Panics
    /// Panics if `d >= self.dimension()`.
    fn index(&self, d: usize) -> &f64 {
        &self.coords()[d]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.dim {
            2 => write!(f, "({}, {})", self.coords[0], self.coords[1]),
            _ => write!(f, "({}, {}, {})", self.coords[0], self.coords[1], self.coords[2]),
        }
    }
}

// ── BoundingBox ───────────────────────────────────────────────────────────────

/// A pessimistic estimate of the region covered by something.
///
/// Corners are always canonical: `bottom_left <= top_right` component-wise,
/// whatever order they were supplied in.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    bottom_left: Position,
    top_right:   Position,
}

impl BoundingBox {
    /// A box containing only `p`.
    #[inline]
    pub fn point(p: Position) -> Self {
        Self { bottom_left: p, top_right: p }
    }

    /// The box spanned by two corners given in any order.
    pub fn new(c1: Position, c2: Position) -> SpResult<Self> {
        c1.check_same_dimension(&c2, "bounding box corners")?;
        Ok(Self::spanning(c1, c2))
    }

    /// As [`new`](Self::new) but with `c2` optional, so a missing second
    /// corner gives a point box.
    pub fn from_corners(c1: Position, c2: Option<Position>) -> SpResult<Self> {
        match c2 {
            None => Ok(Self::point(c1)),
            Some(c2) => Self::new(c1, c2),
        }
    }

    /// Canonicalise two corners of equal dimension.
    #[inline]
    pub(crate) fn spanning(c1: Position, c2: Position) -> Self {
        if c1 == c2 {
            return Self::point(c1);
        }
        Self {
            bottom_left: c1.zip_with(&c2, f64::min),
            top_right:   c1.zip_with(&c2, f64::max),
        }
    }

    /// A box of half-width `half` around `centre` on every axis.
    pub fn around(centre: Position, half: f64) -> Self {
        Self {
            bottom_left: centre.zip_with(&centre, |c, _| c - half),
            top_right:   centre.zip_with(&centre, |c, _| c + half),
        }
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.bottom_left.dimension()
    }

    /// `(bottom_left, top_right)`.
    #[inline]
    pub fn corners(&self) -> (Position, Position) {
        (self.bottom_left, self.top_right)
    }

    #[inline]
    pub fn bottom_left(&self) -> Position {
        self.bottom_left
    }

    #[inline]
    pub fn top_right(&self) -> Position {
        self.top_right
    }

    /// `true` if the box has zero extent on every axis.
    #[inline]
    pub fn is_point(&self) -> bool {
        self.bottom_left == self.top_right
    }

    /// `true` if the box has zero extent along axis `d`.
    #[inline]
    pub fn is_collapsed(&self, d: usize) -> bool {
        self.bottom_left[d] == self.top_right[d]
    }

    /// Is `p` inside the box?
    ///
    /// Strict interior membership on each axis, except collapsed axes which
    /// require `p` to equal the box's coordinate there.
    pub fn contains(&self, p: &Position) -> SpResult<bool> {
        self.bottom_left.check_same_dimension(p, "bounding box containment")?;
        Ok((0..self.dimension()).all(|d| {
            let (lo, hi) = (self.bottom_left[d], self.top_right[d]);
            if lo == hi { p[d] == lo } else { lo < p[d] && p[d] < hi }
        }))
    }

    /// Do the two boxes share at least one point, using the same open/closed
    /// convention as [`contains`](Self::contains)?
    pub fn intersects(&self, other: &BoundingBox) -> SpResult<bool> {
        self.bottom_left
            .check_same_dimension(&other.bottom_left, "bounding box intersection")?;
        Ok((0..self.dimension()).all(|d| {
            axis_overlaps(
                (self.bottom_left[d], self.top_right[d]),
                (other.bottom_left[d], other.top_right[d]),
            )
        }))
    }

    /// The smallest box covering both `self` and `other`.
    pub fn union(&self, other: &BoundingBox) -> SpResult<BoundingBox> {
        if self.dimension() != other.dimension() {
            return Err(SpError::DimensionMismatch {
                context:  "bounding box union",
                expected: self.dimension(),
                got:      other.dimension(),
            });
        }
        Ok(Self {
            bottom_left: self.bottom_left.zip_with(&other.bottom_left, f64::min),
            top_right:   self.top_right.zip_with(&other.top_right, f64::max),
        })
    }
}

/// Overlap of two per-axis extents: open unless collapsed to a single value.
fn axis_overlaps((a_lo, a_hi): (f64, f64), (b_lo, b_hi): (f64, f64)) -> bool {
    match (a_lo == a_hi, b_lo == b_hi) {
        (true, true) => a_lo == b_lo,
        (true, false) => b_lo < a_lo && a_lo < b_hi,
        (false, true) => a_lo < b_lo && b_lo < a_hi,
        (false, false) => a_lo.max(b_lo) < a_hi.min(b_hi),
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} .. {}]", self.bottom_left, self.top_right)
    }
}
