//! Rules deriving a simplex's height from the heights of its faces.

/// Combines face heights into the height of the simplex they bound.
///
/// Called with one entry per face, never with an empty slice.
pub trait HeightRule {
    fn combine(&self, faces: &[i64]) -> i64;
}

/// The minimum over faces.  Makes the height function monotone, which Euler
/// integration of a counting function requires.
#[derive(Copy, Clone, Debug, Default)]
pub struct FaceMin;

impl HeightRule for FaceMin {
    fn combine(&self, faces: &[i64]) -> i64 {
        faces.iter().copied().min().unwrap_or(0)
    }
}

/// The maximum over faces.
#[derive(Copy, Clone, Debug, Default)]
pub struct FaceMax;

impl HeightRule for FaceMax {
    fn combine(&self, faces: &[i64]) -> i64 {
        faces.iter().copied().max().unwrap_or(0)
    }
}
