//! Unit tests for sp-agent.

use sp_core::{AgentId, Position, SimTime};

use crate::Agent;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn walker() -> Agent {
    Agent::new(AgentId(0)).at(Position::xy(0.0, 0.0))
}

// ── Agent ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod agent {
    use sp_core::{BoundingBox, ErrorKind, SensorId, SpError, Trajectory};

    use super::*;

    #[test]
    fn unplaced_agent_has_no_position() {
        let a = Agent::new(AgentId(1));
        assert_eq!(a.kind(), "agent");
        assert!(a.position().is_none());
        assert!(!a.is_positioned(false).unwrap());
        let err = a.is_positioned(true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
        assert!(matches!(a.position_at(SimTime(0.0)), Err(SpError::NotPositioned(_))));
        assert!(a.index_box().is_none());
    }

    #[test]
    fn move_to_interpolates_then_finishes() {
        let mut a = walker();
        a.move_to(Position::xy(4.0, 0.0), 2.0, SimTime(1.0)).unwrap();
        assert!(a.is_moving(true).unwrap());
        assert!(a.position().is_none());
        assert_eq!(a.position_at(SimTime(2.0)).unwrap(), Position::xy(2.0, 0.0));
        assert_eq!(
            a.index_box().unwrap(),
            BoundingBox::new(Position::xy(0.0, 0.0), Position::xy(4.0, 0.0)).unwrap()
        );

        assert_eq!(a.finish_motion().unwrap(), Position::xy(4.0, 0.0));
        assert!(!a.is_moving(false).unwrap());
        assert!(a.trajectory().is_none());
        assert_eq!(a.index_box().unwrap(), BoundingBox::point(Position::xy(4.0, 0.0)));
    }

    #[test]
    fn stale_motion_is_a_state_error() {
        let mut a = walker();
        a.move_to(Position::xy(1.0, 0.0), 1.0, SimTime(0.0)).unwrap();
        let err = a.position_at(SimTime(5.0)).unwrap_err();
        assert!(matches!(err, SpError::StaleMotion { .. }));
        assert_eq!(err.kind(), ErrorKind::State);
    }

    #[test]
    fn motion_must_start_here_and_now() {
        let mut a = walker();
        let elsewhere = Trajectory::new(
            Position::xy(1.0, 1.0),
            SimTime(0.0),
            Position::xy(2.0, 2.0),
            SimTime(1.0),
        )
        .unwrap();
        assert!(a.begin_motion(Box::new(elsewhere), SimTime(0.0)).is_err());

        let later = Trajectory::new(
            Position::xy(0.0, 0.0),
            SimTime(3.0),
            Position::xy(2.0, 2.0),
            SimTime(4.0),
        )
        .unwrap();
        assert!(a.begin_motion(Box::new(later), SimTime(0.0)).is_err());
        assert!(a.begin_motion(Box::new(later), SimTime(3.0)).is_ok());
    }

    #[test]
    fn set_position_clears_motion() {
        let mut a = walker();
        a.move_to(Position::xy(1.0, 0.0), 1.0, SimTime(0.0)).unwrap();
        a.set_position(Position::xy(9.0, 9.0));
        assert!(!a.is_moving(false).unwrap());
        assert!(matches!(a.finish_motion(), Err(SpError::NotMoving(_))));
    }

    #[test]
    fn distance_between_agents() {
        let a = walker();
        let b = Agent::new(AgentId(1)).at(Position::xy(3.0, 4.0));
        assert_eq!(a.distance_to(&b, SimTime(0.0)).unwrap(), 5.0);
    }

    #[test]
    fn sensor_handles_are_a_set() {
        let mut a = walker();
        a.record_sensor(SensorId(1));
        a.record_sensor(SensorId(1));
        a.record_sensor(SensorId(2));
        assert_eq!(a.sensors(), &[SensorId(1), SensorId(2)]);
        assert!(a.forget_sensor(SensorId(1)));
        assert!(!a.forget_sensor(SensorId(1)));
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod store {
    use sp_core::SpError;

    use crate::AgentStore;

    use super::*;

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut store = AgentStore::new();
        store.insert(walker()).unwrap();
        assert!(matches!(store.insert(walker()), Err(SpError::DuplicateAgent(AgentId(0)))));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn lookups() {
        let mut store = AgentStore::new();
        store.insert(Agent::new(AgentId(5))).unwrap();
        store.insert(walker()).unwrap();
        assert_eq!(store.ids().collect::<Vec<_>>(), vec![AgentId(0), AgentId(5)]);
        assert!(store.get(AgentId(5)).is_ok());
        assert!(matches!(store.get(AgentId(9)), Err(SpError::AgentNotFound(_))));

        store.get_mut(AgentId(5)).unwrap().set_position(Position::xy(1.0, 1.0));
        assert_eq!(store.get(AgentId(5)).unwrap().position(), Some(Position::xy(1.0, 1.0)));

        store.remove(AgentId(5)).unwrap();
        assert!(!store.contains(AgentId(5)));
        assert!(store.remove(AgentId(5)).is_err());
    }
}
