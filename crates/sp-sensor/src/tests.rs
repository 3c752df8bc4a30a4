//! Unit tests for sp-sensor.

use std::any::Any;

use sp_core::{BoundingBox, Position, SensorId};

use crate::{Sensor, SensorField};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// A sensor with a square field and no capabilities.
#[derive(Debug)]
struct Camera {
    id:   SensorId,
    half: f64,
}

impl Sensor for Camera {
    fn id(&self) -> SensorId {
        self.id
    }

    fn field(&self, at: Position) -> SensorField {
        SensorField::Region(BoundingBox::around(at, self.half))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn ball(x: f64, y: f64, radius: f64) -> SensorField {
    SensorField::Ball { centre: Position::xy(x, y), radius }
}

// ── SensorField ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod field {
    use sp_core::{ErrorKind, SpError};

    use super::*;

    #[test]
    fn balls_overlap_below_radius_sum() {
        assert!(ball(0.0, 0.0, 1.0).overlaps(&ball(0.0, 1.0, 1.0)).unwrap());
        assert!(!ball(0.0, 0.0, 1.0).overlaps(&ball(2.0, 0.0, 1.0)).unwrap());
        assert!(!ball(0.0, 0.0, 1.0).overlaps(&ball(3.0, 0.0, 1.0)).unwrap());
    }

    #[test]
    fn overlap_is_symmetric() {
        let a = ball(0.0, 0.0, 0.3);
        let b = ball(0.5, 0.0, 0.25);
        assert_eq!(a.overlaps(&b).unwrap(), b.overlaps(&a).unwrap());
    }

    #[test]
    fn mixed_shapes_fail_loudly() {
        let region = SensorField::Region(BoundingBox::around(Position::xy(0.0, 0.0), 1.0));
        let err = ball(0.0, 0.0, 1.0).overlaps(&region).unwrap_err();
        assert!(matches!(err, SpError::IncompatibleFields(_)));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn ball_is_open() {
        let f = ball(0.0, 0.0, 1.0);
        assert!(f.contains(&Position::xy(0.5, 0.5)).unwrap());
        assert!(!f.contains(&Position::xy(1.0, 0.0)).unwrap());
    }

    #[test]
    fn ball_bounding_box() {
        let bb = ball(1.0, 1.0, 1.0).bounding_box();
        assert_eq!(bb.corners(), (Position::xy(0.0, 0.0), Position::xy(2.0, 2.0)));
    }
}

// ── SimpleSensor ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod simple {
    use sp_core::{AgentId, SimTime};

    use crate::{SimpleSensor, Sighting, TargetCount, TargetDirection, TargetDistance, Triggered};

    use super::*;

    #[test]
    fn radius_must_be_positive() {
        assert!(SimpleSensor::new(SensorId(0), 0.0).is_err());
        assert!(SimpleSensor::new(SensorId(0), f64::NAN).is_err());
        assert!(SimpleSensor::new(SensorId(0), 0.5).is_ok());
    }

    #[test]
    fn counts_targets_strictly_inside() {
        let s = SimpleSensor::new(SensorId(0), 1.0).unwrap();
        let at = Position::xy(0.0, 0.0);
        let targets = [Position::xy(0.5, 0.0), Position::xy(1.0, 0.0), Position::xy(0.0, -0.9)];
        assert_eq!(s.counts(at, &targets).unwrap(), 2);
    }

    #[test]
    fn sampling_records_a_trace() {
        let mut s = SimpleSensor::new(SensorId(0), 1.0).unwrap();
        let at = Position::xy(0.0, 0.0);
        let near = Sighting { agent: AgentId(1), position: Position::xy(0.2, 0.2) };
        // Inside the field-of-view box but outside the disc.
        let corner = Sighting { agent: AgentId(2), position: Position::xy(0.9, 0.9) };

        assert_eq!(s.sample(SimTime(0.0), at, &[near, corner]).unwrap(), 1);
        assert_eq!(s.sample(SimTime(1.0), at, &[]).unwrap(), 0);
        assert_eq!(s.trace(), &[(SimTime(0.0), 1), (SimTime(1.0), 0)]);
        assert_eq!(s.number_of_targets(), 0);
    }

    #[test]
    fn ranging_and_bearing() {
        let s = SimpleSensor::new(SensorId(0), 1.0).unwrap();
        let at = Position::xy(0.0, 0.0);
        let targets = [Position::xy(0.0, 0.5), Position::xy(5.0, 0.0)];

        let d = s.as_ranging().unwrap().distances_to(at, &targets).unwrap();
        assert_eq!(d, vec![Some(0.5), None]);

        let b = s.as_bearing().unwrap().directions_to(at, &targets).unwrap();
        assert!((b[0].unwrap() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!(b[1].is_none());
    }

    #[test]
    fn triggers_accumulate() {
        let mut s = SimpleSensor::new(SensorId(0), 1.0).unwrap();
        s.triggered_by(AgentId(3), SimTime(2.0)).unwrap();
        assert_eq!(s.trigger_count(), 1);
        assert_eq!(s.triggers(), &[(SimTime(2.0), AgentId(3))]);
    }

    #[test]
    fn capability_queries() {
        let mut s = SimpleSensor::new(SensorId(0), 1.0).unwrap();
        assert!(s.as_counter().is_some());
        assert!(s.as_triggered_mut().is_some());

        let mut cam = Camera { id: SensorId(1), half: 1.0 };
        assert!(cam.as_counter().is_none());
        assert!(cam.as_ranging().is_none());
        assert!(cam.as_triggered_mut().is_none());
    }

    #[test]
    fn filters_and_labels() {
        let s = SimpleSensor::new(SensorId(0), 1.0).unwrap().with_kind("mic").counting("bird");
        assert_eq!(s.kind(), "mic");
        assert_eq!(s.target_kind(), Some("bird"));
    }
}

// ── SensorLayout ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod layout {
    use sp_core::SpError;

    use crate::{SensorLayout, SensorSource, SimpleSensor};

    use super::*;

    #[test]
    fn counting_sensors_skip_non_counters() {
        let mut layout = SensorLayout::new();
        let a = layout.add_simple(1.0, Position::xy(0.0, 0.0)).unwrap();
        layout.add(Box::new(Camera { id: SensorId(7), half: 1.0 }), Position::xy(5.0, 5.0)).unwrap();
        let b = layout.add_simple(1.0, Position::xy(0.0, 1.0)).unwrap();

        assert_eq!(layout.counting_sensors(), vec![a, b]);
        assert_eq!(b, SensorId(8));
        assert!(layout.sensor_counts(SensorId(7), &[]).is_err());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut layout = SensorLayout::new();
        let s = SimpleSensor::new(SensorId(0), 1.0).unwrap();
        layout.add(Box::new(s.clone()), Position::xy(0.0, 0.0)).unwrap();
        let err = layout.add(Box::new(s), Position::xy(1.0, 0.0)).unwrap_err();
        assert!(matches!(err, SpError::DuplicateSensor(SensorId(0))));
    }

    #[test]
    fn fields_follow_placement() {
        let mut layout = SensorLayout::new();
        let id = layout.add_simple(0.5, Position::xy(2.0, 3.0)).unwrap();
        assert_eq!(layout.sensor_field(id).unwrap(), ball(2.0, 3.0, 0.5));
        assert_eq!(layout.sensor_counts(id, &[Position::xy(2.1, 3.0)]).unwrap(), 1);
        assert!(layout.sensor_field(SensorId(99)).is_err());
    }
}
