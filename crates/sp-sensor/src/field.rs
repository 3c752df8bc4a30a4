//! Sensor fields and the overlap predicate used to build the overhearing
//! complex.

use std::fmt;

use sp_core::{BoundingBox, Position, SpError, SpResult};

/// The region in which a sensor detects targets.  Both shapes are open.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SensorField {
    /// Points strictly closer than `radius` to `centre`.
    Ball { centre: Position, radius: f64 },
    /// The interior of a box.
    Region(BoundingBox),
}

impl SensorField {
    /// The field's axis-aligned bounding box.
    pub fn bounding_box(&self) -> BoundingBox {
        match *self {
            SensorField::Ball { centre, radius } => BoundingBox::around(centre, radius),
            SensorField::Region(bb) => bb,
        }
    }

    /// Is `p` inside the field?
    pub fn contains(&self, p: &Position) -> SpResult<bool> {
        match self {
            SensorField::Ball { centre, radius } => Ok(centre.distance_to(p)? < *radius),
            SensorField::Region(bb) => bb.contains(p),
        }
    }

    /// Do the two fields share a point?
    ///
    /// Symmetric.  Balls overlap when their centres are closer than the sum
    /// of their radii.
    ///
    /// # Errors
    /// [`SpError::IncompatibleFields`] when comparing a ball with a region,
    /// and [`SpError::DimensionMismatch`] across dimensions.
    pub fn overlaps(&self, other: &SensorField) -> SpResult<bool> {
        match (self, other) {
            (
                SensorField::Ball { centre: c1, radius: r1 },
                SensorField::Ball { centre: c2, radius: r2 },
            ) => Ok(c1.distance_to(c2)? < r1 + r2),
            (SensorField::Region(a), SensorField::Region(b)) => a.intersects(b),
            _ => Err(SpError::IncompatibleFields(format!("{self} vs {other}"))),
        }
    }
}

impl fmt::Display for SensorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorField::Ball { centre, radius } => write!(f, "ball r={radius} at {centre}"),
            SensorField::Region(bb) => write!(f, "region {bb}"),
        }
    }
}
