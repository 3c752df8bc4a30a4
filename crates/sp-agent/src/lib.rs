//! `sp-agent` — agents and the arena that owns them.
//!
//! # Crate layout
//!
//! | Module    | Contents                                              |
//! |-----------|-------------------------------------------------------|
//! | [`agent`] | `Agent`, `Placement`                                  |
//! | [`store`] | `AgentStore` (id-keyed arena)                         |
//!
//! Agents never point at the playground or at their sensors.  They hold
//! `SensorId` handles, and the playground resolves them.

pub mod agent;
pub mod store;

#[cfg(test)]
mod tests;

pub use agent::{Agent, Placement};
pub use store::AgentStore;
