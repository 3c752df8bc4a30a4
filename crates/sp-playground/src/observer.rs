//! Observer hooks invoked by [`Playground::run_with`][crate::Playground::run_with].

use sp_core::{AgentId, Position, SensorId, SimTime};
use sp_schedule::Owner;

/// Callbacks at key points of the event loop.
///
/// All methods have no-op defaults, so implementors only override what they
/// care about.
///
/// # Example — sample recorder
///
/// ```rust,ignore
/// #[derive(Default)]
/// struct Samples(Vec<(SensorId, SimTime, usize)>);
///
/// impl PlaygroundObserver for Samples {
///     fn on_sample(&mut self, sensor: SensorId, time: SimTime, count: usize) {
///         self.0.push((sensor, time, count));
///     }
/// }
/// ```
pub trait PlaygroundObserver {
    /// Called before each live event is dispatched.
    fn on_event(&mut self, _time: SimTime, _owner: Owner) {}

    /// Called when an agent's motion-start event fires.
    fn on_motion_start(&mut self, _agent: AgentId, _time: SimTime) {}

    /// Called after an agent has been collapsed to the end of its motion.
    fn on_motion_end(&mut self, _agent: AgentId, _time: SimTime, _position: Position) {}

    /// Called after a scheduled sample, with the number of targets detected.
    fn on_sample(&mut self, _sensor: SensorId, _time: SimTime, _count: usize) {}

    /// Called for each agent removed since the previous event.
    fn on_agent_removed(&mut self, _agent: AgentId, _time: SimTime) {}

    /// Called once when the run stops.
    fn on_run_end(&mut self, _final_time: SimTime, _fired: usize) {}
}

/// A [`PlaygroundObserver`] that does nothing.
pub struct NoopObserver;

impl PlaygroundObserver for NoopObserver {}
