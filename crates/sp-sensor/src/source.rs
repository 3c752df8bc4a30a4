//! Read-only access to a set of positioned sensors.
//!
//! The Euler estimator is written against [`SensorSource`] so that it can run
//! over a live playground or over a fixed [`SensorLayout`] alike.

use std::collections::BTreeMap;

use tracing::debug;

use sp_core::{IdGen, Position, SensorId, SpError, SpResult};

use crate::{Sensor, SensorField, SimpleSensor};

/// Somewhere sensors can be looked up by id.
pub trait SensorSource {
    /// Ids of every sensor with the counting capability, sorted.
    fn counting_sensors(&self) -> Vec<SensorId>;

    /// The sensor's current field.
    fn sensor_field(&self, id: SensorId) -> SpResult<SensorField>;

    /// How many of `targets` the sensor currently detects.
    ///
    /// # Errors
    /// [`SpError::InvalidOperation`] if the sensor cannot count.
    fn sensor_counts(&self, id: SensorId, targets: &[Position]) -> SpResult<usize>;
}

// ── SensorLayout ──────────────────────────────────────────────────────────────

/// A fixed arrangement of sensors, each at its own position.
///
/// Useful for estimation over static deployments without running a
/// simulation.
#[derive(Debug, Default)]
pub struct SensorLayout {
    ids:     IdGen,
    sensors: BTreeMap<SensorId, (Box<dyn Sensor>, Position)>,
}

impl SensorLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `sensor` at `at`.
    ///
    /// # Errors
    /// [`SpError::DuplicateSensor`] if its id is taken.
    pub fn add(&mut self, sensor: Box<dyn Sensor>, at: Position) -> SpResult<SensorId> {
        let id = sensor.id();
        if self.sensors.contains_key(&id) {
            return Err(SpError::DuplicateSensor(id));
        }
        self.ids.reserve_sensor(id);
        debug!(sensor = %id, %at, "sensor placed");
        self.sensors.insert(id, (sensor, at));
        Ok(id)
    }

    /// Place a fresh [`SimpleSensor`] of radius `radius` at `at`.
    pub fn add_simple(&mut self, radius: f64, at: Position) -> SpResult<SensorId> {
        let sensor = SimpleSensor::new(self.ids.sensor(), radius)?;
        self.add(Box::new(sensor), at)
    }

    pub fn get(&self, id: SensorId) -> SpResult<(&dyn Sensor, Position)> {
        self.sensors
            .get(&id)
            .map(|(s, at)| (s.as_ref(), *at))
            .ok_or(SpError::SensorNotFound(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&dyn Sensor, Position)> + '_ {
        self.sensors.values().map(|(s, at)| (s.as_ref(), *at))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }
}

impl SensorSource for SensorLayout {
    fn counting_sensors(&self) -> Vec<SensorId> {
        self.sensors
            .iter()
            .filter(|(_, (s, _))| s.as_counter().is_some())
            .map(|(&id, _)| id)
            .collect()
    }

    fn sensor_field(&self, id: SensorId) -> SpResult<SensorField> {
        let (s, at) = self.get(id)?;
        Ok(s.field(at))
    }

    fn sensor_counts(&self, id: SensorId, targets: &[Position]) -> SpResult<usize> {
        let (s, at) = self.get(id)?;
        let counter = s
            .as_counter()
            .ok_or_else(|| SpError::InvalidOperation(format!("{id} cannot count targets")))?;
        counter.counts(at, targets)
    }
}
