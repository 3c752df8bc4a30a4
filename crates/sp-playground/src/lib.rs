//! `sp-playground` — the discrete-event sensor playground.
//!
//! # Event loop
//!
//! ```text
//! while the next live event is due no later than max_simulation_time:
//!   ① Pop       — next (time, EventId); tombstones are skipped silently.
//!   ② Clock     — advance `now` to the event's time.
//!   ③ Dispatch  — Call / Repeat        → run the closure (Repeat re-posts
//!                                         itself at time + interval)
//!                 Sample / RepeatSample → sample the sensor
//!                 MotionStart           → notify the observer
//!                 MotionEnd             → collapse the agent to its end point
//!   ④ Observe   — observer hooks, then report agents removed by the action.
//! ```
//!
//! # Spatial index
//!
//! Each placed agent is indexed under its point, or under the sweep of its
//! current motion so that mid-motion queries see it wherever it might be.
//! Each attached sensor's field of view is indexed too, swept along with
//! its agent.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use sp_core::{PlaygroundConfig, Position, SimTime};
//! use sp_euler::EulerEstimator;
//! use sp_playground::Playground;
//!
//! let mut pg = Playground::new(PlaygroundConfig::default())?;
//! let post = pg.add_agent_at(Position::xy(1.0, 1.0))?;
//! let s = pg.add_simple_sensor(post, 1.0)?;
//! let bird = pg.add_agent_at(Position::xy(0.0, 1.5))?;
//! pg.move_to(bird, Position::xy(2.0, 1.5), 1.0)?;
//! pg.post_sample(s, SimTime(0.5))?;
//! pg.run()?;
//!
//! let targets = [Position::xy(1.0, 1.5)];
//! let estimate = EulerEstimator::new().estimate_from_targets(&pg, &targets)?;
//! ```

pub mod action;
pub mod observer;
pub mod playground;


pub use action::{Action, EventFn, RepeatFn};
pub use observer::{NoopObserver, PlaygroundObserver};
pub use playground::Playground;
