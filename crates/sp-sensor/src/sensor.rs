//! The `Sensor` trait and its capability modalities.

use std::any::Any;
use std::fmt;

use sp_core::{AgentId, BoundingBox, Direction, Position, SensorId, SimTime, SpResult};

use crate::SensorField;

/// An agent seen inside a sensor's field of view, with its position at the
/// time of the sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sighting {
    pub agent:    AgentId,
    pub position: Position,
}

// ── Sensor ────────────────────────────────────────────────────────────────────

/// A sensor mounted on an agent.
///
/// # Required methods
///
/// [`id`](Self::id), [`field`](Self::field), and the two `as_any` accessors.
/// Everything else has a default: detection is membership of the field,
/// sampling counts detected sightings, and no capability is advertised.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Debug)]
/// struct Microphone { id: SensorId }
///
/// impl Sensor for Microphone {
///     fn id(&self) -> SensorId { self.id }
///     fn kind(&self) -> &str { "microphone" }
///     fn field(&self, at: Position) -> SensorField {
///         SensorField::Ball { centre: at, radius: 30.0 }
///     }
///     fn as_any(&self) -> &dyn Any { self }
///     fn as_any_mut(&mut self) -> &mut dyn Any { self }
/// }
/// ```
pub trait Sensor: fmt::Debug {
    fn id(&self) -> SensorId;

    /// Kind label used by `all_sensors_observing` filters.
    fn kind(&self) -> &str {
        "sensor"
    }

    /// The detection field when the sensor sits at `at`.
    fn field(&self, at: Position) -> SensorField;

    /// Bounding box of the field of view when the sensor sits at `at`.
    fn field_of_view(&self, at: Position) -> BoundingBox {
        self.field(at).bounding_box()
    }

    /// Does the sensor, sitting at `at`, detect a target at `target`?
    ///
    /// Override to model missed detections.
    fn detects_target(&self, at: Position, target: &Position) -> SpResult<bool> {
        self.field(at).contains(target)
    }

    /// Only agents of this kind are offered to [`sample`](Self::sample).
    /// `None` means every kind.
    fn target_kind(&self) -> Option<&str> {
        None
    }

    /// Take a sample at `now` from the agents in the field of view.
    /// Returns the number of targets detected.
    fn sample(&mut self, now: SimTime, at: Position, in_view: &[Sighting]) -> SpResult<usize> {
        let _ = now;
        let mut n = 0;
        for s in in_view {
            if self.detects_target(at, &s.position)? {
                n += 1;
            }
        }
        Ok(n)
    }

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;

    // ── Capability queries ────────────────────────────────────────────────

    fn as_counter(&self) -> Option<&dyn TargetCount> {
        None
    }

    fn as_ranging(&self) -> Option<&dyn TargetDistance> {
        None
    }

    fn as_bearing(&self) -> Option<&dyn TargetDirection> {
        None
    }

    fn as_triggered_mut(&mut self) -> Option<&mut dyn Triggered> {
        None
    }
}

// ── Modalities ────────────────────────────────────────────────────────────────

/// Counts targets.  Required for a sensor to take part in Euler estimation.
pub trait TargetCount: Sensor {
    /// How many of `targets` the sensor detects from `at`.
    fn counts(&self, at: Position, targets: &[Position]) -> SpResult<usize> {
        let mut n = 0;
        for t in targets {
            if self.detects_target(at, t)? {
                n += 1;
            }
        }
        Ok(n)
    }

    /// Count recorded by the most recent sample.
    fn number_of_targets(&self) -> usize;
}

/// Measures the distance to each detected target.
pub trait TargetDistance: Sensor {
    /// One entry per target: its distance, or `None` if undetected.
    fn distances_to(&self, at: Position, targets: &[Position]) -> SpResult<Vec<Option<f64>>> {
        targets
            .iter()
            .map(|t| {
                if self.detects_target(at, t)? {
                    Ok(Some(at.distance_to(t)?))
                } else {
                    Ok(None)
                }
            })
            .collect()
    }
}

/// Measures the planar bearing to each detected target.
pub trait TargetDirection: Sensor {
    /// One entry per target: its bearing from `at`, or `None` if undetected.
    fn directions_to(
        &self,
        at:      Position,
        targets: &[Position],
    ) -> SpResult<Vec<Option<Direction>>> {
        targets
            .iter()
            .map(|t| {
                if self.detects_target(at, t)? {
                    Ok(Some(at.bearing_to(t)?))
                } else {
                    Ok(None)
                }
            })
            .collect()
    }
}

/// Receives push notifications from emitting agents in range.
pub trait Triggered: Sensor {
    fn triggered_by(&mut self, source: AgentId, now: SimTime) -> SpResult<()>;

    /// Triggers received so far.
    fn trigger_count(&self) -> usize;
}
