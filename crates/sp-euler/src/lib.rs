//! `sp-euler` — counting targets by Euler-characteristic integration.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`complex`]     | `Simplex`, `SimplicialComplex`, `Combinations`          |
//! | [`overhearing`] | `OverhearingConfig`, `OverhearingBuilder`               |
//! | [`height`]      | `HeightRule` trait, `FaceMin`, `FaceMax`                |
//! | [`estimator`]   | `EulerEstimator`                                        |
//!
//! # Method (summary)
//!
//! Sensors whose fields pairwise overlap span a simplex of the overhearing
//! complex.  Each sensor's count is the height of its vertex; a higher
//! simplex takes the [`HeightRule`] of its faces.  The estimate is
//!
//! ```text
//! Σ_k (-1)^k · Σ_{dim s = k} height(s)
//! ```
//!
//! The complex is a snapshot.  After sensors move, appear, or disappear the
//! caller must [`EulerEstimator::rebuild`] it.

pub mod complex;
pub mod estimator;
pub mod height;
pub mod overhearing;


pub use complex::{Combinations, Simplex, SimplicialComplex};
pub use estimator::EulerEstimator;
pub use height::{FaceMax, FaceMin, HeightRule};
pub use overhearing::{OverhearingBuilder, OverhearingConfig};
