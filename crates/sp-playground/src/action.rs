//! What an event does when it fires.

use std::fmt;

use sp_core::{AgentId, SensorId, SimTime, SpResult};

use crate::Playground;

/// A one-shot event body.  Receives the playground and the firing time.
pub type EventFn = Box<dyn FnOnce(&mut Playground, SimTime) -> SpResult<()>>;

/// A repeating event body, called once per firing.
pub type RepeatFn = Box<dyn FnMut(&mut Playground, SimTime) -> SpResult<()>>;

/// Payload of a playground event.
pub enum Action {
    Call(EventFn),
    /// Run `f`, then re-post at `time + interval` while the owner exists.
    Repeat { interval: f64, f: RepeatFn },
    Sample(SensorId),
    RepeatSample { sensor: SensorId, interval: f64 },
    MotionStart(AgentId),
    MotionEnd(AgentId),
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Call(_) => f.write_str("Call"),
            Action::Repeat { interval, .. } => write!(f, "Repeat(every {interval})"),
            Action::Sample(s) => write!(f, "Sample({s})"),
            Action::RepeatSample { sensor, interval } => {
                write!(f, "RepeatSample({sensor} every {interval})")
            }
            Action::MotionStart(a) => write!(f, "MotionStart({a})"),
            Action::MotionEnd(a) => write!(f, "MotionEnd({a})"),
        }
    }
}
