//! `sp-core` — foundational types for the sensor playground.
//!
//! This crate is a dependency of every other `sp-*` crate.  It has no `sp-*`
//! dependencies and only `thiserror` (plus optional `serde`) externally.
//!
//! # What lives here
//!
//! | Module         | Contents                                               |
//! |----------------|--------------------------------------------------------|
//! | [`ids`]        | `AgentId`, `SensorId`, `EventId`, `IdGen`              |
//! | [`geo`]        | `Position`, `BoundingBox`, `Direction`                 |
//! | [`time`]       | `SimTime`                                              |
//! | [`trajectory`] | `Motion` trait, linear `Trajectory`, `BoxCrossing`     |
//! | [`config`]     | `PlaygroundConfig`                                     |
//! | [`error`]      | `SpError`, `ErrorKind`, `SpResult`                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, geometry, time, and |
//! |         | configuration types.                                       |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod time;
pub mod trajectory;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::PlaygroundConfig;
pub use error::{ErrorKind, SpError, SpResult};
pub use geo::{BoundingBox, Direction, Position};
pub use ids::{AgentId, EventId, IdGen, SensorId};
pub use time::SimTime;
pub use trajectory::{BoxCrossing, Motion, Trajectory};
