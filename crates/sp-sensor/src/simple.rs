//! `SimpleSensor` — an open ball of fixed radius.

use std::any::Any;

use tracing::trace;

use sp_core::{AgentId, Position, SensorId, SimTime, SpError, SpResult};

use crate::{
    Sensor, SensorField, Sighting, TargetCount, TargetDirection, TargetDistance, Triggered,
};

/// A sensor whose field is the open disc (or ball) of radius `radius` around
/// its agent.
///
/// It counts, ranges, takes bearings, and accepts triggers.  Every sample is
/// appended to [`trace`](Self::trace).
#[derive(Clone, Debug)]
pub struct SimpleSensor {
    id:          SensorId,
    radius:      f64,
    kind:        String,
    target_kind: Option<String>,
    last_count:  usize,
    trace:       Vec<(SimTime, usize)>,
    triggers:    Vec<(SimTime, AgentId)>,
}

impl SimpleSensor {
    /// # Errors
    /// [`SpError::InvalidValue`] unless `radius` is finite and positive.
    pub fn new(id: SensorId, radius: f64) -> SpResult<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SpError::InvalidValue(format!(
                "sensor radius must be positive and finite, got {radius}"
            )));
        }
        Ok(Self {
            id,
            radius,
            kind: "simple".to_owned(),
            target_kind: None,
            last_count: 0,
            trace: Vec::new(),
            triggers: Vec::new(),
        })
    }

    /// Relabel the sensor's own kind.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Only count agents of kind `kind`.
    pub fn counting(mut self, kind: impl Into<String>) -> Self {
        self.target_kind = Some(kind.into());
        self
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// `(time, count)` for every sample taken, oldest first.
    pub fn trace(&self) -> &[(SimTime, usize)] {
        &self.trace
    }

    /// Just the counts from [`trace`](Self::trace).
    pub fn counts_over_time(&self) -> Vec<usize> {
        self.trace.iter().map(|&(_, n)| n).collect()
    }

    /// `(time, source)` for every trigger received.
    pub fn triggers(&self) -> &[(SimTime, AgentId)] {
        &self.triggers
    }
}

impl Sensor for SimpleSensor {
    fn id(&self) -> SensorId {
        self.id
    }

    fn kind(&self) -> &str {
        &self.kind
    }

    fn field(&self, at: Position) -> SensorField {
        SensorField::Ball { centre: at, radius: self.radius }
    }

    fn target_kind(&self) -> Option<&str> {
        self.target_kind.as_deref()
    }

    fn sample(&mut self, now: SimTime, at: Position, in_view: &[Sighting]) -> SpResult<usize> {
        let targets: Vec<Position> = in_view.iter().map(|s| s.position).collect();
        let n = self.counts(at, &targets)?;
        self.last_count = n;
        self.trace.push((now, n));
        trace!(sensor = %self.id, %now, count = n, "sampled");
        Ok(n)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn as_counter(&self) -> Option<&dyn TargetCount> {
        Some(self)
    }

    fn as_ranging(&self) -> Option<&dyn TargetDistance> {
        Some(self)
    }

    fn as_bearing(&self) -> Option<&dyn TargetDirection> {
        Some(self)
    }

    fn as_triggered_mut(&mut self) -> Option<&mut dyn Triggered> {
        Some(self)
    }
}

impl TargetCount for SimpleSensor {
    fn number_of_targets(&self) -> usize {
        self.last_count
    }
}

impl TargetDistance for SimpleSensor {}

impl TargetDirection for SimpleSensor {}

impl Triggered for SimpleSensor {
    fn triggered_by(&mut self, source: AgentId, now: SimTime) -> SpResult<()> {
        self.triggers.push((now, source));
        Ok(())
    }

    fn trigger_count(&self) -> usize {
        self.triggers.len()
    }
}
