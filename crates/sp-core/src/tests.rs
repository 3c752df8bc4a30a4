//! Unit tests for sp-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, IdGen, SensorId};

    #[test]
    fn ordering() {
        assert!(AgentId(0) < AgentId(1));
        assert!(SensorId(100) > SensorId(99));
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
        assert_eq!(SensorId(3).to_string(), "SensorId(3)");
    }

    #[test]
    fn generator_is_sequential_per_kind() {
        let mut ids = IdGen::new();
        assert_eq!(ids.agent(), AgentId(0));
        assert_eq!(ids.agent(), AgentId(1));
        assert_eq!(ids.sensor(), SensorId(0));
        assert!(ids.event() < ids.event());
    }

    #[test]
    fn reserved_ids_are_skipped() {
        let mut ids = IdGen::new();
        ids.reserve_agent(AgentId(10));
        assert_eq!(ids.agent(), AgentId(11));
        // Reserving a lower id never moves the counter backwards.
        ids.reserve_agent(AgentId(2));
        assert_eq!(ids.agent(), AgentId(12));
    }
}

#[cfg(test)]
mod time {
    use crate::SimTime;

    #[test]
    fn arithmetic() {
        let t = SimTime(1.5);
        assert_eq!(t + 0.5, SimTime(2.0));
        assert_eq!(t.offset(1.0), SimTime(2.5));
        assert_eq!(SimTime(3.0) - SimTime(1.0), 2.0);
        assert_eq!(SimTime(1.0).since(SimTime(3.0)), -2.0);
    }

    #[test]
    fn total_order() {
        let mut ts = vec![SimTime(2.0), SimTime(-1.0), SimTime(0.5)];
        ts.sort();
        assert_eq!(ts, vec![SimTime(-1.0), SimTime(0.5), SimTime(2.0)]);
        assert!(!SimTime(f64::INFINITY).is_finite());
    }
}

#[cfg(test)]
mod geo {
    use crate::{BoundingBox, ErrorKind, Position, SpError};

    #[test]
    fn distance_and_bearing() {
        let a = Position::xy(0.0, 0.0);
        let b = Position::xy(3.0, 4.0);
        assert_eq!(a.distance_to(&b).unwrap(), 5.0);
        let up = a.bearing_to(&Position::xy(0.0, 1.0)).unwrap();
        assert!((up - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn distance_requires_matching_dimension() {
        let err = Position::xy(0.0, 0.0)
            .distance_to(&Position::xyz(0.0, 0.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, SpError::DimensionMismatch { expected: 2, got: 3, .. }));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn from_slice_accepts_two_or_three() {
        assert_eq!(Position::from_slice(&[1.0, 2.0]).unwrap(), Position::xy(1.0, 2.0));
        assert_eq!(Position::from_slice(&[1.0, 2.0, 3.0]).unwrap().dimension(), 3);
        assert!(Position::from_slice(&[1.0]).is_err());
        assert!(Position::origin(4).is_err());
    }

    #[test]
    fn corners_are_canonical_in_any_order() {
        let bb = BoundingBox::new(Position::xy(2.0, -1.0), Position::xy(-3.0, 4.0)).unwrap();
        assert_eq!(bb.bottom_left(), Position::xy(-3.0, -1.0));
        assert_eq!(bb.top_right(), Position::xy(2.0, 4.0));
        assert_eq!(bb.dimension(), 2);
    }

    #[test]
    fn missing_second_corner_is_a_point() {
        let p = Position::xy(1.0, 1.0);
        let bb = BoundingBox::from_corners(p, None).unwrap();
        assert!(bb.is_point());
        assert_eq!(BoundingBox::from_corners(p, Some(p)).unwrap(), bb);
    }

    #[test]
    fn mismatched_corners_fail() {
        let err = BoundingBox::new(Position::xy(0.0, 0.0), Position::xyz(1.0, 1.0, 1.0));
        assert!(err.is_err());
    }

    #[test]
    fn contains_is_open() {
        let bb = BoundingBox::new(Position::xy(0.0, 0.0), Position::xy(2.0, 2.0)).unwrap();
        assert!(bb.contains(&Position::xy(1.0, 1.0)).unwrap());
        assert!(!bb.contains(&Position::xy(0.0, 1.0)).unwrap());
        assert!(!bb.contains(&Position::xy(2.0, 2.0)).unwrap());
        assert!(bb.contains(&Position::xyz(1.0, 1.0, 0.0)).is_err());
    }

    #[test]
    fn collapsed_axes_test_equality() {
        let p = Position::xy(1.0, 1.0);
        assert!(BoundingBox::point(p).contains(&p).unwrap());

        // A horizontal sweep has zero height but still contains its path.
        let sweep = BoundingBox::new(Position::xy(0.0, 1.5), Position::xy(2.0, 1.5)).unwrap();
        assert!(sweep.is_collapsed(1));
        assert!(sweep.contains(&Position::xy(1.0, 1.5)).unwrap());
        assert!(!sweep.contains(&Position::xy(1.0, 1.6)).unwrap());
        assert!(!sweep.contains(&Position::xy(0.0, 1.5)).unwrap());
    }

    #[test]
    fn union_is_idempotent_commutative_and_minimal() {
        let a = BoundingBox::new(Position::xy(0.0, 0.0), Position::xy(1.0, 1.0)).unwrap();
        let b = BoundingBox::new(Position::xy(2.0, -1.0), Position::xy(3.0, 0.5)).unwrap();
        assert_eq!(a.union(&a).unwrap(), a);
        let ab = a.union(&b).unwrap();
        assert_eq!(ab, b.union(&a).unwrap());
        assert_eq!(ab.corners(), (Position::xy(0.0, -1.0), Position::xy(3.0, 1.0)));
    }

    #[test]
    fn intersection_follows_open_convention() {
        let a = BoundingBox::new(Position::xy(0.0, 0.0), Position::xy(1.0, 1.0)).unwrap();
        let touching = BoundingBox::new(Position::xy(1.0, 0.0), Position::xy(2.0, 1.0)).unwrap();
        let overlapping = BoundingBox::new(Position::xy(0.5, 0.5), Position::xy(2.0, 2.0)).unwrap();
        assert!(!a.intersects(&touching).unwrap());
        assert!(a.intersects(&overlapping).unwrap());
        assert!(a.intersects(&BoundingBox::point(Position::xy(0.5, 0.5))).unwrap());
    }
}

#[cfg(test)]
mod trajectory {
    use crate::{BoundingBox, ErrorKind, Motion, Position, SimTime, SpError, Trajectory};

    fn across() -> Trajectory {
        Trajectory::new(Position::xy(0.0, 1.5), SimTime(0.0), Position::xy(2.0, 1.5), SimTime(1.0))
            .unwrap()
    }

    #[test]
    fn endpoints_are_exact() {
        let start = Position::xy(0.1, 0.7);
        let end = Position::xy(0.3, 0.9);
        let tr = Trajectory::new(start, SimTime(0.1), end, SimTime(0.7)).unwrap();
        assert_eq!(tr.position_at(SimTime(0.1)).unwrap(), start);
        assert_eq!(tr.position_at(SimTime(0.7)).unwrap(), end);
    }

    #[test]
    fn interpolates_linearly() {
        let p = across().position_at(SimTime(0.25)).unwrap();
        assert_eq!(p, Position::xy(0.5, 1.5));
    }

    #[test]
    fn outside_interval_fails() {
        let err = across().position_at(SimTime(1.5)).unwrap_err();
        assert!(matches!(err, SpError::OutsideInterval { .. }));
        assert!(!across().is_within_interval(SimTime(-0.1), false).unwrap());
    }

    #[test]
    fn construction_is_validated() {
        let p = Position::xy(0.0, 0.0);
        let empty = Trajectory::new(p, SimTime(1.0), p, SimTime(1.0)).unwrap_err();
        assert_eq!(empty.kind(), ErrorKind::TemporalOrdering);
        let mixed = Trajectory::new(p, SimTime(0.0), Position::xyz(0.0, 0.0, 0.0), SimTime(1.0));
        assert_eq!(mixed.unwrap_err().kind(), ErrorKind::Validation);
    }

    #[test]
    fn bounding_box_spans_endpoints() {
        let bb = across().bounding_box();
        assert_eq!(bb.corners(), (Position::xy(0.0, 1.5), Position::xy(2.0, 1.5)));
        assert!(across().is_within_bounding_box(&Position::xy(1.0, 1.5), true).unwrap());
        assert!(across().is_within_bounding_box(&Position::xy(1.0, 3.0), true).is_err());
    }

    #[test]
    fn crossing_times() {
        let bb = BoundingBox::new(Position::xy(0.5, 1.0), Position::xy(1.5, 2.0)).unwrap();
        let crossing = across().enters_leaves_at(&bb).unwrap().unwrap();
        assert_eq!(crossing.enter, SimTime(0.25));
        assert_eq!(crossing.leave, SimTime(0.75));
    }

    #[test]
    fn crossing_misses() {
        let far = BoundingBox::new(Position::xy(5.0, 5.0), Position::xy(6.0, 6.0)).unwrap();
        assert!(across().enters_leaves_at(&far).unwrap().is_none());

        // Box lies behind the start of the path.
        let tr = Trajectory::new(Position::xy(2.0, 1.5), SimTime(0.0), Position::xy(3.0, 1.5), SimTime(1.0))
            .unwrap();
        let behind = BoundingBox::new(Position::xy(0.5, 1.0), Position::xy(1.5, 2.0)).unwrap();
        assert!(tr.enters_leaves_at(&behind).unwrap().is_none());
    }

    #[test]
    fn crossing_from_inside_enters_at_start() {
        let bb = BoundingBox::new(Position::xy(-1.0, 1.0), Position::xy(1.0, 2.0)).unwrap();
        let crossing = across().enters_leaves_at(&bb).unwrap().unwrap();
        assert_eq!(crossing.enter, SimTime(0.0));
        assert_eq!(crossing.leave, SimTime(0.5));
    }

    #[test]
    fn advance_rebases_start() {
        let mut tr = across();
        tr.advance_to(SimTime(0.5)).unwrap();
        assert_eq!(tr.interval(), (SimTime(0.5), SimTime(1.0)));
        assert_eq!(tr.endpoints().0, Position::xy(1.0, 1.5));
        assert!(tr.advance_to(SimTime(1.0)).is_err());
    }
}

#[cfg(test)]
mod config {
    use crate::{PlaygroundConfig, SimTime};

    #[test]
    fn defaults() {
        let c = PlaygroundConfig::default();
        assert_eq!(c.dimension, 2);
        assert_eq!(c.max_simulation_time, SimTime(10_000.0));
        assert_eq!(c.compaction_threshold, 0.5);
    }
}
