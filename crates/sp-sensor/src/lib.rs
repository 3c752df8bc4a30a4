//! `sp-sensor` — what a sensor is and what it can measure.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`field`]  | `SensorField` (ball or region) and the overlap predicate   |
//! | [`sensor`] | `Sensor` trait, `Sighting`, capability traits              |
//! | [`simple`] | `SimpleSensor`, the open-ball reference sensor             |
//! | [`source`] | `SensorSource` trait, standalone `SensorLayout`            |
//!
//! # Positions
//!
//! A sensor has no position of its own.  It sits on an agent, and every
//! geometric query takes the agent's current position as `at`.
//!
//! # Capabilities
//!
//! Counting, ranging, bearing, and trigger reception are separate traits
//! ([`TargetCount`], [`TargetDistance`], [`TargetDirection`], [`Triggered`]).
//! A sensor advertises them through the `as_*` queries on [`Sensor`], which
//! default to `None`.

pub mod field;
pub mod sensor;
pub mod simple;
pub mod source;

#[cfg(test)]
mod tests;

pub use field::SensorField;
pub use sensor::{Sensor, Sighting, TargetCount, TargetDirection, TargetDistance, Triggered};
pub use simple::SimpleSensor;
pub use source::{SensorLayout, SensorSource};
